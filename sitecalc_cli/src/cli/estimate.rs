use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Serialize;
use sitecalc_core::calculations::{CalculationItem, CalculationOutput};
use sitecalc_core::{file_io, Estimate as EstimateFile};
use tracing::instrument;
use uuid::Uuid;

use super::Context;

#[derive(Debug, clap::Subcommand)]
pub enum Estimate {
    /// Start a new estimate file, priced from --settings or the built-in rates
    New {
        path: PathBuf,
        /// Job name
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        client: String,
        /// Site address
        #[arg(long, default_value = "")]
        site: String,
    },

    /// Add a calculation (JSON, e.g. {"type": "Stairs", "label": "...", "input": {...}})
    Add { path: PathBuf, item: PathBuf },

    /// Remove a calculation by id
    Remove { path: PathBuf, id: Uuid },

    /// Evaluate every calculation in an estimate
    Show { path: PathBuf },
}

#[derive(Debug, Serialize)]
struct ItemReport {
    id: Uuid,
    label: String,
    calc_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<CalculationOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct EstimateReport {
    name: String,
    client: String,
    site: String,
    items: Vec<ItemReport>,
    cabin_total_incl_gst: f64,
}

impl Estimate {
    #[instrument(skip(context))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        match self {
            Self::New {
                path,
                name,
                client,
                site,
            } => {
                let mut estimate = EstimateFile::new(name, client, site);
                estimate.settings = context.pricing()?;
                file_io::save_estimate(&estimate, &path)?;
                println!("Created {}", path.display());
                Ok(())
            }
            Self::Add { path, item } => {
                let id = add_item(&path, &item)?;
                println!("{id}");
                Ok(())
            }
            Self::Remove { path, id } => {
                let mut estimate = file_io::load_estimate(&path)?;
                let removed = estimate
                    .remove_item(&id)
                    .with_context(|| format!("No calculation {id} in {}", path.display()))?;
                file_io::save_estimate(&estimate, &path)?;
                println!("Removed '{}'", removed.label());
                Ok(())
            }
            Self::Show { path } => {
                let estimate = file_io::load_estimate(&path)?;
                context.emit(&report(&estimate), render_report)
            }
        }
    }
}

fn add_item(path: &Path, item_path: &Path) -> anyhow::Result<Uuid> {
    let mut estimate = file_io::load_estimate(path)?;
    let text = std::fs::read_to_string(item_path)
        .with_context(|| format!("Failed to read {}", item_path.display()))?;
    let item: CalculationItem = serde_json::from_str(&text)
        .with_context(|| format!("Invalid calculation JSON in {}", item_path.display()))?;
    let id = estimate.add_item(item);
    file_io::save_estimate(&estimate, path)?;
    Ok(id)
}

fn report(estimate: &EstimateFile) -> EstimateReport {
    let items = estimate
        .evaluate_all()
        .into_iter()
        .filter_map(|(id, result)| {
            let item = estimate.get_item(&id)?;
            let (output, error) = match result {
                Ok(output) => (Some(output), None),
                Err(e) => (None, Some(e.user_message())),
            };
            Some(ItemReport {
                id,
                label: item.label().to_string(),
                calc_type: item.calc_type(),
                output,
                error,
            })
        })
        .collect();

    EstimateReport {
        name: estimate.meta.name.clone(),
        client: estimate.meta.client.clone(),
        site: estimate.meta.site.clone(),
        items,
        cabin_total_incl_gst: estimate.cabin_total_incl_gst(),
    }
}

fn summary(output: &CalculationOutput) -> String {
    match output {
        CalculationOutput::Triangle(Some(t)) => format!("c = {:.2}, A = {:.2}°, B = {:.2}°", t.c, t.angle_a, t.angle_b),
        CalculationOutput::RoofRafter(Some(r)) => format!("rise {:.0} mm, common {:.0} mm", r.rise, r.common),
        CalculationOutput::Triangle(None) | CalculationOutput::RoofRafter(None) => "not enough values".to_string(),
        CalculationOutput::Pitch(warnings) => format!("{} advisories", warnings.len()),
        CalculationOutput::Stairs(s) => format!(
            "{} risers at {:.1} mm, going {:.0} mm{}",
            s.risers,
            s.riser_height,
            s.going,
            if s.compliant { "" } else { " (non-compliant)" }
        ),
        CalculationOutput::Cabin(c) => format!("${:.2} incl. GST, {} warnings", c.totals.incl_gst, c.warnings.len()),
        CalculationOutput::Framing(f) => format!("${:.2}, {} members", f.costs.grand_total, f.total_members),
        CalculationOutput::Gst(g) => format!("${:.2} excl. / ${:.2} incl.", g.excl, g.incl),
    }
}

fn render_report(r: &EstimateReport) -> String {
    let mut text = format!("{} ({})\n", r.name, r.client);
    if !r.site.is_empty() {
        text += &format!("{}\n", r.site);
    }
    text += "\n";
    for item in &r.items {
        let detail = match (&item.output, &item.error) {
            (Some(output), _) => summary(output),
            (None, Some(error)) => format!("error: {error}"),
            (None, None) => String::new(),
        };
        text += &format!("{:<10} {:<24} {}\n", item.calc_type, item.label, detail);
    }
    if r.cabin_total_incl_gst > 0.0 {
        text += &format!("\nCabins total ${:.2} incl. GST\n", r.cabin_total_incl_gst);
    }
    text
}

#[cfg(test)]
mod tests {
    use sitecalc_core::calculations::StairsInput;

    use super::*;

    #[test]
    fn add_item_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.scx");
        let item_path = dir.path().join("stairs.json");

        file_io::save_estimate(&EstimateFile::new("Deck", "Client", ""), &path).unwrap();
        std::fs::write(&item_path, r#"{ "type": "Stairs", "label": "Deck stair", "input": { "total_rise": 1350.0 } }"#)
            .unwrap();

        let id = add_item(&path, &item_path).unwrap();
        let estimate = file_io::load_estimate(&path).unwrap();
        assert_eq!(estimate.get_item(&id).map(CalculationItem::label), Some("Deck stair"));
    }

    #[test]
    fn report_lists_every_item() {
        let mut estimate = EstimateFile::new("Deck", "Client", "");
        estimate.add_item(CalculationItem::Stairs {
            label: "Deck stair".to_string(),
            input: StairsInput::from_rise(1350.0),
        });
        let report = report(&estimate);
        assert_eq!(report.items.len(), 1);
        assert!(report.items[0].output.is_some());
        assert_eq!(report.cabin_total_incl_gst, 0.0);

        let text = render_report(&report);
        assert!(text.contains("Deck stair"));
        assert!(text.contains("risers"));
    }
}
