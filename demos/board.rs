//! Compute and print pick-and-place angles for a board.
//!
//! Usage: `cargo run --example board --features tracing -- [points.csv] [shader] [unit] [orientation]`
//! Set `RUST_LOG=ledspin=debug` to see parameter fallbacks and bypasses.

use ledspin::{
    Orientation, ParamValues, Registry, Unit, compute_angles, parse_points, to_csv,
};
use miette::IntoDiagnostic;

const DEFAULT_BOARD: &str = include_str!("../tests/boards/matrix52.csv");

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let (name, text) = match args.next() {
        Some(path) => {
            let text = std::fs::read_to_string(&path).into_diagnostic()?;
            (path, text)
        }
        None => ("matrix52.csv".to_string(), DEFAULT_BOARD.to_string()),
    };
    let shader = args.next().unwrap_or_else(|| "radial".to_string());
    let unit: Unit = match args.next() {
        Some(u) => u.parse().map_err(|e: String| miette::miette!("{e}"))?,
        None => Unit::Millimeter,
    };
    let orientation: Orientation = match args.next() {
        Some(o) => o.parse().map_err(|e: String| miette::miette!("{e}"))?,
        None => Orientation::Deg0,
    };

    let points = parse_points(&name, &text, unit)?;
    let registry = Registry::builtin()?;

    if let Some(entry) = registry.get(&shader) {
        eprintln!("{}: {}", entry.name(), entry.description().unwrap_or("(no description)"));
        for param in entry.params() {
            eprintln!(
                "  {} {} = {}",
                param.name(),
                param.ty(),
                param.default_value()
            );
        }
    }

    let results = compute_angles(&registry, &points, &shader, &ParamValues::new(), &ParamValues::new())?;
    println!("{}", to_csv(&results, orientation));
    Ok(())
}
