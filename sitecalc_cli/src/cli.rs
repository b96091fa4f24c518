use std::path::PathBuf;

use anyhow::Context as _;
use clap::ArgAction;
use serde::Serialize;
use sitecalc_core::{file_io, PricingSettings};

mod calc;
mod convert;
mod estimate;
mod settings;

#[derive(Debug, clap::Parser)]
#[command(name = "sitecalc", version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Pricing file (JSON); built-in rates are used when omitted
    #[arg(long, value_name = "PATH", global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let context = Context {
            json: self.json,
            settings_path: self.settings,
        };
        self.command.run(&context)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Solve a right triangle from any two values
    Trig(calc::Trig),

    /// Roof and common rafter geometry
    Roof(calc::Roof),

    /// Minimum pitch advisories for a roof cladding
    Pitch(calc::Pitch),

    /// Stair layout and NZBC D1/AS1 compliance
    Stairs(calc::Stairs),

    /// Cabin bill of materials and price
    Cabin(calc::Cabin),

    /// Wall or floor framing estimate from a JSON file
    Framing(calc::Framing),

    /// GST from an exclusive, inclusive or GST amount
    Gst(calc::Gst),

    /// Unit and engineering conversions
    #[command(subcommand)]
    Convert(convert::Convert),

    /// Write, check or show pricing files
    #[command(subcommand)]
    Settings(settings::Settings),

    /// Create, extend and evaluate saved estimates (.scx)
    #[command(subcommand)]
    Estimate(estimate::Estimate),
}

impl Command {
    fn run(self, context: &Context) -> anyhow::Result<()> {
        match self {
            Self::Trig(command) => command.run(context),
            Self::Roof(command) => command.run(context),
            Self::Pitch(command) => command.run(context),
            Self::Stairs(command) => command.run(context),
            Self::Cabin(command) => command.run(context),
            Self::Framing(command) => command.run(context),
            Self::Gst(command) => command.run(context),
            Self::Convert(command) => command.run(context),
            Self::Settings(command) => command.run(context),
            Self::Estimate(command) => command.run(context),
        }
    }
}

/// Global options shared by every command.
#[derive(Debug, Default)]
pub struct Context {
    json: bool,
    settings_path: Option<PathBuf>,
}

impl Context {
    /// Pricing from `--settings`, or the built-in defaults
    pub fn pricing(&self) -> anyhow::Result<PricingSettings> {
        match &self.settings_path {
            Some(path) => file_io::load_settings(path)
                .with_context(|| format!("Failed to load pricing from {}", path.display())),
            None => Ok(PricingSettings::default()),
        }
    }

    /// Print `value` as JSON with `--json`, otherwise as `text` renders it.
    pub fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce(&T) -> String) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            print!("{}", text(value));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["sitecalc", "stairs", "2700", "--json", "-vv"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Stairs(_)));
    }

    #[test]
    fn requires_a_subcommand() {
        assert!(Cli::try_parse_from(["sitecalc"]).is_err());
    }

    #[test]
    fn default_pricing_without_settings_flag() {
        let pricing = Context::default().pricing().unwrap();
        assert_eq!(pricing, PricingSettings::default());
    }

    #[test]
    fn missing_settings_file_is_an_error() {
        let context = Context {
            json: false,
            settings_path: Some(PathBuf::from("/definitely/not/here/pricing.json")),
        };
        let err = context.pricing().unwrap_err();
        assert!(err.to_string().contains("Failed to load pricing"));
    }
}
