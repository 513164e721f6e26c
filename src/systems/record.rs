//! Record shapes handed to export collaborators.
//!
//! Rows are comma-delimited with 6-decimal numerics and a quoted rationale.
//! Documents are pretty JSON mirroring the structs field for field. Writing
//! them anywhere is the caller's business.

use crate::systems::curve_fit::FitPair;
use crate::systems::engine::{GameResult, MoveDetail};

pub const CSV_HEADER: &str =
    "round,player,move,linear_sum,quadratic_sum,alice_capacity,bazza_capacity,reason";

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

pub fn csv_row(d: &MoveDetail) -> String {
    format!(
        "{},{},{:.6},{:.6},{:.6},{:.6},{:.6},{}",
        d.round,
        d.player,
        d.value,
        d.linear_sum,
        d.square_sum,
        d.alice_capacity,
        d.bazza_capacity,
        quote(&d.reason)
    )
}

/// Header plus one row per recorded round.
pub fn csv_rows(result: &GameResult) -> Vec<String> {
    std::iter::once(CSV_HEADER.to_string())
        .chain(result.details.iter().map(csv_row))
        .collect()
}

pub fn json_document(result: &GameResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

pub fn fit_document(fits: &FitPair) -> serde_json::Result<String> {
    serde_json::to_string_pretty(fits)
}
