// tests/record.rs
#![cfg(feature = "export")]

use lambda_game::systems::curve_fit::fit_power_law;
use lambda_game::systems::record::{CSV_HEADER, csv_row, csv_rows, fit_document, json_document};
use lambda_game::{
    AliceConstraint, BazzaConstraint, FitPair, GameConfig, GameEngine, GameResult, LambdaSweepConfig,
    Player, Style, SweepRange,
};

fn game() -> GameResult {
    GameEngine::for_lambda(0.75, GameConfig::default()).run()
}

#[test]
fn csv_has_header_and_one_row_per_round() {
    let r = game();
    let rows = csv_rows(&r);
    assert_eq!(rows[0], CSV_HEADER);
    assert_eq!(rows.len(), r.details.len() + 1);
    assert!(rows[1].starts_with("1,Alice,0.000000,0.000000,0.000000,"), "{}", rows[1]);
}

#[test]
fn csv_row_quotes_the_reason() {
    let mut d = game().details[0].clone();
    d.reason = "says \"hold\", then waits".into();
    let row = csv_row(&d);
    assert!(row.ends_with(",\"says \"\"hold\"\", then waits\""), "{row}");
    let fields: Vec<&str> = row.splitn(8, ',').collect();
    assert_eq!(fields[1], Player::Alice.to_string());
    assert!(fields[2..7].iter().all(|f| f.split('.').nth(1).map(str::len) == Some(6)), "{row}");
}

#[test]
fn json_document_round_trips() {
    let r = game();
    let doc = json_document(&r).expect("serialize");
    let back: GameResult = serde_json::from_str(&doc).expect("deserialize");
    assert_eq!(back.winner, r.winner);
    assert_eq!(back.reason, r.reason);
    assert_eq!(back.critical_round, r.critical_round);
    assert_eq!(back.details.len(), r.details.len());
    assert!(back.moves.iter().zip(&r.moves).all(|(a, b)| (a - b).abs() < 1e-12));

    let v: serde_json::Value = serde_json::from_str(&doc).expect("json");
    assert_eq!(v["winner"], "Alice");
    assert_eq!(v["alice_style"], "optimal");
    assert_eq!(v["total_rounds"], 30);
}

#[test]
fn fit_document_carries_both_sides() {
    let cfg = LambdaSweepConfig::new(0.5, 1.0, 0.05, GameConfig::default()).expect("valid");
    let results = lambda_game::studies::sweep_lambda(&cfg);
    let fits = fit_power_law(&results);
    let doc = fit_document(&fits).expect("serialize");
    let back: FitPair = serde_json::from_str(&doc).expect("deserialize");
    let (a, b) = (back.alice.expect("alice side"), fits.alice.expect("alice side"));
    assert!((a.b - b.b).abs() < 1e-12);
    assert_eq!(a.n, b.n);
    assert!(back.bazza.is_some());
}

#[test]
fn config_deserialises_through_validation() {
    let ok: SweepRange = serde_json::from_str(r#"{"start":0.5,"end":1.0,"step":0.1}"#).expect("valid");
    assert_eq!(ok.count(), 6);
    assert!(serde_json::from_str::<SweepRange>(r#"{"start":1.0,"end":0.5,"step":0.1}"#).is_err());

    let game: GameConfig = serde_json::from_str(
        r#"{"max_rounds":40,"alice_style":"balanced","bazza_style":"optimal",
            "alice_constraint":"cubic","bazza_constraint":"quartic"}"#,
    )
    .expect("valid game config");
    assert_eq!(game.max_rounds, 40);
    assert_eq!(game.alice_style, Style::Balanced);
    assert_eq!(game.alice_constraint, AliceConstraint::Cubic);
    assert_eq!(game.bazza_constraint, BazzaConstraint::Quartic);

    let zero = serde_json::from_str::<GameConfig>(
        r#"{"max_rounds":0,"alice_style":"optimal","bazza_style":"optimal",
            "alice_constraint":"standard","bazza_constraint":"standard"}"#,
    );
    assert!(zero.is_err(), "a zero round cap must not deserialise: {zero:?}");
    let err = zero.map(|_| ()).unwrap_err().to_string();
    assert!(err.contains("max_rounds must be at least 1"), "{err}");
}
