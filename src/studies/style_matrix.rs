//! Every style pair at one λ.

#[cfg(feature = "export")]
use serde::Serialize;
use tracing::info;

use crate::studies::sdk::{WinCounts, run_batch};
use crate::systems::engine::{GameConfig, GameEngine, GameResult};
use crate::systems::policy::Style;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "export", derive(Serialize))]
pub struct StyleMatrix {
    pub lambda: f64,
    /// Alice-major: index `5·alice + bazza` in [`Style::ALL`] order.
    pub results: Vec<GameResult>,
    pub counts: WinCounts,
}

impl StyleMatrix {
    pub fn get(&self, alice: Style, bazza: Style) -> Option<&GameResult> {
        self.results
            .iter()
            .find(|r| r.alice_style == alice && r.bazza_style == bazza)
    }
}

/// Runs all 25 pairs; round cap and constraints come from `base`.
pub fn style_matrix(lambda: f64, base: GameConfig) -> StyleMatrix {
    let pairs: Vec<(Style, Style)> = Style::ALL
        .into_iter()
        .flat_map(|a| Style::ALL.into_iter().map(move |b| (a, b)))
        .collect();
    let results = run_batch(&pairs, move |&(a, b)| {
        GameEngine::for_lambda(lambda, base.with_styles(a, b)).run()
    });
    let counts = WinCounts::tally(&results);
    info!(lambda, alice = counts.alice, bazza = counts.bazza, draw = counts.draw, "style matrix complete");
    StyleMatrix { lambda, results, counts }
}
