//! # Estimate Data Structures
//!
//! The `Estimate` struct is the root container for a job's saved calculations.
//! Estimates serialize to `.scx` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Estimate
//! ├── meta: EstimateMeta (version, job name, client, site, timestamps)
//! ├── settings: PricingSettings (rates used by the cabin BOM)
//! └── items: HashMap<Uuid, CalculationItem> (all calculations)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use sitecalc_core::estimate::Estimate;
//! use sitecalc_core::calculations::{CalculationItem, StairsInput};
//!
//! let mut estimate = Estimate::new("Smith deck", "J. Smith", "12 Beach Rd");
//! let id = estimate.add_item(CalculationItem::Stairs {
//!     label: "Deck stair".to_string(),
//!     input: StairsInput::from_rise(1350.0),
//! });
//!
//! let json = serde_json::to_string_pretty(&estimate).unwrap();
//! assert!(json.contains("Deck stair"));
//! assert!(estimate.get_item(&id).is_some());
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{CalculationItem, CalculationOutput};
use crate::errors::CalcResult;
use crate::settings::PricingSettings;

/// Current schema version for .scx files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root estimate container.
///
/// Items are stored in a flat UUID-keyed map so they keep stable ids
/// however the UI orders them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Estimate {
    pub meta: EstimateMeta,

    /// Pricing used when evaluating priced items
    #[serde(default)]
    pub settings: PricingSettings,

    pub items: HashMap<Uuid, CalculationItem>,
}

impl Estimate {
    /// Create a new empty estimate with default pricing.
    ///
    /// ```rust
    /// use sitecalc_core::estimate::Estimate;
    ///
    /// let estimate = Estimate::new("Garden studio", "A. Client", "");
    /// assert_eq!(estimate.meta.name, "Garden studio");
    /// assert_eq!(estimate.item_count(), 0);
    /// ```
    pub fn new(name: impl Into<String>, client: impl Into<String>, site: impl Into<String>) -> Self {
        let now = Utc::now();
        Estimate {
            meta: EstimateMeta {
                version: SCHEMA_VERSION.to_string(),
                name: name.into(),
                client: client.into(),
                site: site.into(),
                created: now,
                modified: now,
            },
            settings: PricingSettings::default(),
            items: HashMap::new(),
        }
    }

    /// Add a calculation item; returns the UUID assigned to it.
    pub fn add_item(&mut self, item: CalculationItem) -> Uuid {
        let id = Uuid::new_v4();
        self.items.insert(id, item);
        self.touch();
        id
    }

    /// Remove a calculation item by UUID.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<CalculationItem> {
        let item = self.items.remove(id);
        if item.is_some() {
            self.touch();
        }
        item
    }

    pub fn get_item(&self, id: &Uuid) -> Option<&CalculationItem> {
        self.items.get(id)
    }

    /// Mutable access to an item. Marks the estimate modified when found.
    pub fn get_item_mut(&mut self, id: &Uuid) -> Option<&mut CalculationItem> {
        if self.items.contains_key(id) {
            self.meta.modified = Utc::now();
            self.items.get_mut(id)
        } else {
            None
        }
    }

    /// Replace the pricing settings
    pub fn set_settings(&mut self, settings: PricingSettings) {
        self.settings = settings;
        self.touch();
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Items ordered by label, then id, for stable listings.
    pub fn items_sorted(&self) -> Vec<(&Uuid, &CalculationItem)> {
        let mut items: Vec<_> = self.items.iter().collect();
        items.sort_by(|(a_id, a), (b_id, b)| a.label().cmp(b.label()).then(a_id.cmp(b_id)));
        items
    }

    /// Evaluate every item against this estimate's pricing.
    ///
    /// One failing item does not stop the rest; each entry carries its own
    /// result. Order follows [`Estimate::items_sorted`].
    pub fn evaluate_all(&self) -> Vec<(Uuid, CalcResult<CalculationOutput>)> {
        self.items_sorted()
            .into_iter()
            .map(|(id, item)| {
                let result = item.evaluate(&self.settings);
                if let Err(e) = &result {
                    tracing::warn!(%id, label = item.label(), error = %e, "item failed to evaluate");
                }
                (*id, result)
            })
            .collect()
    }

    /// Sum of GST-inclusive totals over every cabin item.
    pub fn cabin_total_incl_gst(&self) -> f64 {
        self.items
            .values()
            .filter_map(|item| match item {
                CalculationItem::Cabin { config, .. } => {
                    Some(crate::calculations::cabin::compute(config, &self.settings).totals.incl_gst)
                }
                _ => None,
            })
            .sum()
    }
}

impl Default for Estimate {
    fn default() -> Self {
        Estimate::new("", "", "")
    }
}

/// Estimate metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateMeta {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Job name
    pub name: String,

    pub client: String,

    /// Site address
    #[serde(default)]
    pub site: String,

    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{CabinConfig, GstInput, TriangleInput};
    use crate::calculations::gst::GstSource;

    #[test]
    fn test_estimate_creation() {
        let estimate = Estimate::new("Studio", "Acme", "1 Main St");
        assert_eq!(estimate.meta.name, "Studio");
        assert_eq!(estimate.meta.client, "Acme");
        assert_eq!(estimate.meta.site, "1 Main St");
        assert_eq!(estimate.meta.version, SCHEMA_VERSION);
        assert_eq!(estimate.settings, PricingSettings::default());
    }

    #[test]
    fn test_estimate_serialization() {
        let mut estimate = Estimate::new("Studio", "Acme", "");
        estimate.add_item(CalculationItem::Gst {
            label: "Invoice".to_string(),
            input: GstInput::new(GstSource::Incl, 115.0, 0.15),
        });
        let json = serde_json::to_string_pretty(&estimate).unwrap();
        assert!(json.contains("\"type\": \"Gst\""));

        let roundtrip: Estimate = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.item_count(), 1);
        assert_eq!(roundtrip.meta.name, "Studio");
    }

    #[test]
    fn test_missing_settings_fill_from_defaults() {
        let json = r#"{
            "meta": {
                "version": "0.1.0",
                "name": "Old file",
                "client": "",
                "created": "2025-01-01T00:00:00Z",
                "modified": "2025-01-01T00:00:00Z"
            },
            "items": {}
        }"#;
        let estimate: Estimate = serde_json::from_str(json).unwrap();
        assert_eq!(estimate.settings, PricingSettings::default());
        assert_eq!(estimate.meta.site, "");
    }

    #[test]
    fn test_add_remove_item() {
        let mut estimate = Estimate::default();
        let id = estimate.add_item(CalculationItem::Triangle {
            label: "Brace".to_string(),
            input: TriangleInput {
                a: Some(300.0),
                b: Some(400.0),
                ..Default::default()
            },
        });
        assert_eq!(estimate.item_count(), 1);
        assert!(estimate.get_item(&id).is_some());
        assert!(estimate.get_item_mut(&id).is_some());

        assert!(estimate.remove_item(&id).is_some());
        assert!(estimate.remove_item(&id).is_none());
        assert_eq!(estimate.item_count(), 0);
    }

    #[test]
    fn test_evaluate_all_keeps_going_past_errors() {
        let mut estimate = Estimate::default();
        estimate.add_item(CalculationItem::Triangle {
            label: "A bad triangle".to_string(),
            input: TriangleInput {
                a: Some(500.0),
                c: Some(400.0),
                ..Default::default()
            },
        });
        estimate.add_item(CalculationItem::Gst {
            label: "B invoice".to_string(),
            input: GstInput::new(GstSource::Excl, 100.0, 0.15),
        });

        let results = estimate.evaluate_all();
        assert_eq!(results.len(), 2);
        assert!(results[0].1.is_err());
        match &results[1].1 {
            Ok(CalculationOutput::Gst(gst)) => assert_eq!(gst.incl, 115.0),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_cabin_total_uses_estimate_settings() {
        let mut estimate = Estimate::default();
        estimate.add_item(CalculationItem::Cabin {
            label: "Cabin".to_string(),
            config: CabinConfig::default(),
        });
        let base = estimate.cabin_total_incl_gst();
        assert!(base > 0.0);

        let mut dearer = PricingSettings::default();
        dearer.labour_per_m2 += 100.0;
        estimate.set_settings(dearer);
        assert!(estimate.cabin_total_incl_gst() > base);
    }
}
