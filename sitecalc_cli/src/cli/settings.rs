use std::path::{Path, PathBuf};

use sitecalc_core::{file_io, PricingSettings};
use tracing::instrument;

use super::Context;

#[derive(Debug, clap::Subcommand)]
pub enum Settings {
    /// Write the built-in rates to a pricing file
    Init {
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Check that a pricing file loads and every rate is valid
    Validate { path: PathBuf },

    /// Print the pricing in effect (from --settings, or built-in)
    Show,
}

impl Settings {
    #[instrument(skip(context))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        match self {
            Self::Init { path, force } => init(&path, force),
            Self::Validate { path } => {
                let settings = file_io::load_settings(&path)?;
                println!("{} is valid (schema {})", path.display(), settings.schema_version);
                Ok(())
            }
            Self::Show => {
                let settings = context.pricing()?;
                context.emit(&settings, render_settings)
            }
        }
    }
}

fn init(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    file_io::save_settings(&PricingSettings::default(), path)?;
    tracing::info!(path = %path.display(), "wrote default pricing");
    println!("Wrote default pricing to {}", path.display());
    Ok(())
}

fn render_settings(s: &PricingSettings) -> String {
    let rows = [
        ("Timber", s.timber_per_m, "/m"),
        ("Pile", s.pile_per_each, "/each"),
        ("Window", s.window_per_m2, "/m²"),
        ("Door", s.door_per_unit, "/unit"),
        ("Door hardware", s.door_hardware_per_unit, "/unit"),
        ("Paint", s.paint_per_m2, "/m²"),
        ("Building wrap", s.building_wrap_per_m2, "/m²"),
        ("Underlay", s.underlay_per_m2, "/m²"),
        ("Insulation", s.insulation_per_m2, "/m²"),
        ("Fixings", s.fixings_allowance_per_m2, "/m²"),
        ("Flashings", s.flashings_allowance_per_m, "/m"),
        ("Gutter", s.gutter_per_m, "/m"),
        ("Fascia", s.fascia_per_m, "/m"),
        ("Ridge cap", s.ridge_cap_per_m, "/m"),
        ("Barge cap", s.barge_cap_per_m, "/m"),
        ("Electrical", s.electrical_per_m2, "/m²"),
        ("Electrical (fixed)", s.electrical_fixed, ""),
        ("Labour", s.labour_per_m2, "/m²"),
    ];
    let mut text: String = rows
        .iter()
        .map(|(name, rate, unit)| format!("{name:<20} {rate:>9.2}{unit}\n"))
        .collect();
    text += &format!("{:<20} {:>9.1}%\n", "GST", s.gst_rate * 100.0);
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_writes_loadable_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pricing.json");

        init(&path, false).unwrap();
        assert_eq!(file_io::load_settings(&path).unwrap(), PricingSettings::default());

        let err = init(&path, false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        init(&path, true).unwrap();
    }

    #[test]
    fn renders_rates() {
        let text = render_settings(&PricingSettings::default());
        assert!(text.contains("Timber"));
        assert!(text.lines().any(|l| l.starts_with("GST") && l.ends_with("15.0%")));
    }
}
