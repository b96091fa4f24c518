//! # SiteCalc CLI
//!
//! Builder's calculators from the terminal. Every command prints a short
//! text report, or the full result as JSON with `--json`.
//!
//! ```text
//! sitecalc trig --a 300 --b 400
//! sitecalc stairs 2700
//! sitecalc cabin --length 4000 --width 2000 --cladding corrugate
//! sitecalc convert drill 4.2
//! ```

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
