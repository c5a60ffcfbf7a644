//! SKU catalog returned by `/upload` and `/skus`

use crate::{ServiceStatus, Sku};
use serde::{Deserialize, Serialize};

/// Aggregate figures over the whole uploaded dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalStats {
    #[serde(default)]
    pub total_skus: u64,
    #[serde(default)]
    pub total_sales_30d: f64,
    /// Growth in percent
    #[serde(default)]
    pub growth: f64,
}

/// Known SKUs plus dataset-wide stats
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkuCatalog {
    #[serde(default)]
    pub skus: Vec<Sku>,
    #[serde(default)]
    pub global_stats: Option<GlobalStats>,
}

impl SkuCatalog {
    pub fn is_empty(&self) -> bool {
        self.skus.is_empty()
    }

    pub fn contains(&self, sku: &Sku) -> bool {
        self.skus.contains(sku)
    }

    /// SKUs eligible as a comparison target for `active`
    pub fn comparison_candidates<'a>(&'a self, active: Option<&'a Sku>) -> impl Iterator<Item = &'a Sku> {
        self.skus.iter().filter(move |s| Some(*s) != active)
    }

    /// Tracked SKU count, falling back to the list length
    pub fn total_skus(&self) -> u64 {
        match &self.global_stats {
            Some(stats) if stats.total_skus > 0 => stats.total_skus,
            _ => self.skus.len() as u64,
        }
    }

    pub fn total_sales_30d(&self) -> f64 {
        self.global_stats.as_ref().map_or(0.0, |s| s.total_sales_30d)
    }

    pub fn status(&self) -> ServiceStatus {
        if self.is_empty() {
            ServiceStatus::NoData
        } else {
            ServiceStatus::Ready
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_catalog() {
        let body = r#"{
            "skus": ["SKU-A", "SKU-B"],
            "global_stats": {"total_skus": 2, "total_sales_30d": 1830, "growth": 8}
        }"#;
        let catalog: SkuCatalog = serde_json::from_str(body).unwrap();
        assert_eq!(catalog.skus.len(), 2);
        assert_eq!(catalog.total_skus(), 2);
        assert_eq!(catalog.total_sales_30d(), 1830.0);
        assert_eq!(catalog.status(), ServiceStatus::Ready);
    }

    #[test]
    fn test_empty_catalog_status() {
        let catalog = SkuCatalog::default();
        assert_eq!(catalog.status(), ServiceStatus::NoData);
        assert_eq!(catalog.total_skus(), 0);
    }

    #[test]
    fn test_comparison_candidates_exclude_active() {
        let catalog = SkuCatalog {
            skus: vec![Sku::new("A"), Sku::new("B"), Sku::new("C")],
            global_stats: None,
        };
        let active = Sku::new("B");
        let candidates: Vec<_> = catalog.comparison_candidates(Some(&active)).collect();
        assert_eq!(candidates, vec![&Sku::new("A"), &Sku::new("C")]);
    }
}
