// demos/threshold.rs
// Run with:
//   RUST_LOG=lambda_game=debug cargo run --example threshold --features parallel

use lambda_game::studies::{style_matrix, threshold_study};
use lambda_game::systems::bootstrap::bootstrap_exponent;
use lambda_game::systems::curve_fit::{FitSchedule, transformed_points};
use lambda_game::systems::diagnostics::diagnose;
use lambda_game::systems::record::csv_rows;
use lambda_game::{ConfigError, GameConfig, GameEngine, LAMBDA_CRITICAL, LambdaSweepConfig, Player, Style};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), ConfigError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // One game, dumped as CSV
    let one = GameEngine::for_lambda(0.75, GameConfig::default()).run();
    println!("== λ = 0.75 ==");
    println!("{} after {} rounds: {}", one.winner, one.total_rounds, one.reason);
    for row in csv_rows(&one).iter().take(6) {
        println!("{row}");
    }
    let d = diagnose(&one.moves);
    println!("mean {:.4}  std {:.4}  CS ratio {:.4}", d.mean, d.std_dev, d.cauchy_schwarz.ratio);

    // Wide sweep and fit
    let cfg = LambdaSweepConfig::new(0.3, 1.5, 0.01, GameConfig::default())?;
    let study = threshold_study(&cfg);
    println!();
    println!("== Sweep λ ∈ [0.30, 1.50] ==");
    println!(
        "Alice {}  Bazza {}  Draw {}  matched {:.1}%",
        study.counts.alice,
        study.counts.bazza,
        study.counts.draw,
        100.0 * study.matched_fraction
    );
    if let Some(b) = study.boundary {
        println!("empirical boundary {b:.4}  (λ* = {LAMBDA_CRITICAL:.4})");
    }
    for side in [Player::Alice, Player::Bazza] {
        match study.fits.side(side) {
            Some(m) => println!("{side:<5} {}", m.formula()),
            None => println!("{side:<5} no fit"),
        }
        let pts = transformed_points(&study.results, side, LAMBDA_CRITICAL);
        if let Some(s) = bootstrap_exponent(&pts, 50, FitSchedule::default(), 7) {
            println!("      b = {:.3} ± {:.3}  ({} of {} resamples)", s.mean, s.std_dev, s.fitted, s.requested);
        }
    }

    // Style pairs
    let m = style_matrix(0.9, GameConfig::default());
    println!();
    println!("== Style matrix at λ = 0.9 (rows Alice, columns Bazza) ==");
    for a in Style::ALL {
        let cells: Vec<String> = Style::ALL
            .into_iter()
            .filter_map(|b| m.get(a, b))
            .map(|r| format!("{}@{}", r.winner, r.total_rounds))
            .collect();
        println!("{a:<12} {}", cells.join("  "));
    }
    Ok(())
}
