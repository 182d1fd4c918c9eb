//! CircuitVision - grid circuit solver
//!
//! Reads a layout file, solves it, and prints every component's current
//! and every terminal's potential.
//!
//! # Usage
//!
//! ```bash
//! circuitvision demos/parallel.layout
//! RUST_LOG=debug circuitvision demos/parallel.layout
//! ```

use std::path::{Path, PathBuf};

use circuit_vision::{
    circuit::Circuit,
    error::{CircuitError, Result},
    layout, ComponentKind,
};
use clap::Parser;

/// Solve a resistive DC circuit laid out on a terminal grid
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the layout file
    #[arg(value_name = "LAYOUT_FILE")]
    layout_file: PathBuf,

    /// Log intermediate results (nodes, branches, loops, the equations)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if !run(&args.layout_file)? {
        eprintln!("Short circuit or incomplete circuit!");
        std::process::exit(1);
    }
    Ok(())
}

/// Load and solve a layout, printing the report on success.
///
/// Returns `Ok(false)` when the layout loads but cannot be solved.
fn run(path: &Path) -> Result<bool> {
    let layout = layout::parse_file(path)?;
    let mut circuit = Circuit::from_layout(&layout)?;

    match circuit.solve() {
        Ok(currents) => {
            log::info!("solved {} branch currents", currents.len());
            print_report(&circuit);
            Ok(true)
        }
        Err(CircuitError::ShortOrIncompleteCircuit) => Ok(false),
        Err(e) => Err(e),
    }
}

fn print_report(circuit: &Circuit) {
    println!("{:<10} {:<8} {:<8} {:>10} {:>10}  flows into", "kind", "from", "to", "value", "amps");
    for (id, c) in circuit.components() {
        let Some([a, b]) = c.endpoints() else {
            continue;
        };
        let value = match c.kind() {
            ComponentKind::Wire => String::from("-"),
            ComponentKind::Resistor(ohms) => format!("{ohms} Ω"),
            ComponentKind::Battery(batt) => format!("{} V", batt.voltage()),
        };
        let direction = c
            .current_direction()
            .map_or_else(|| String::from("(dead end)"), |d| d.to_string());
        let drop = circuit
            .potential_drop(id)
            .map(|v| format!("  drop {v:.4} V"))
            .unwrap_or_default();
        println!(
            "{:<10} {:<8} {:<8} {:>10} {:>10.4}  {direction}{drop}",
            c.kind().label(),
            a.to_string(),
            b.to_string(),
            value,
            c.current(),
        );
    }

    println!();
    println!("potentials (V):");
    for row in 0..circuit.rows() {
        let cells: Vec<String> = circuit
            .terminal_row(row)
            .iter()
            .map(|t| match t.assigned_potential() {
                Some(v) => format!("{v:>8.3}"),
                None => format!("{:>8}", "."),
            })
            .collect();
        println!("{}", cells.join(" "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsolvable_layout_is_not_an_error() {
        assert!(!run(Path::new("demos/short.layout")).unwrap());
    }

    #[test]
    fn test_solvable_layout() {
        assert!(run(Path::new("demos/parallel.layout")).unwrap());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(matches!(
            run(Path::new("demos/no-such.layout")),
            Err(CircuitError::FileReadError { .. })
        ));
    }
}
