use serde::Serialize;

use crate::model::ordered::OrderedMap;
use crate::model::quality::{QualityCategory, QualityThresholds};
use crate::model::report::ReportTable;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub near: usize,
    pub substantial: usize,
    pub moderate: usize,
    pub partial: usize,
}

impl CategoryCounts {
    pub fn add(&mut self, category: QualityCategory) {
        match category {
            QualityCategory::Near => self.near += 1,
            QualityCategory::Substantial => self.substantial += 1,
            QualityCategory::Moderate => self.moderate += 1,
            QualityCategory::Partial => self.partial += 1,
        }
    }

    pub fn get(&self, category: QualityCategory) -> usize {
        match category {
            QualityCategory::Near => self.near,
            QualityCategory::Substantial => self.substantial,
            QualityCategory::Moderate => self.moderate,
            QualityCategory::Partial => self.partial,
        }
    }

    pub fn total(&self) -> usize {
        self.near + self.substantial + self.moderate + self.partial
    }
}

#[derive(Debug, Clone)]
pub struct Stage4Output {
    /// One category per table row, same order.
    pub categories: Vec<QualityCategory>,
    pub per_sample: OrderedMap<CategoryCounts>,
    pub totals: CategoryCounts,
}

pub fn run_stage4(table: &ReportTable, thresholds: &QualityThresholds) -> Stage4Output {
    let mut categories = Vec::with_capacity(table.len());
    let mut per_sample = OrderedMap::new();
    let mut totals = CategoryCounts::default();

    for row in &table.rows {
        let category = thresholds.classify(row.completeness());
        categories.push(category);
        per_sample
            .get_or_insert_with(&row.sample_id, CategoryCounts::default)
            .add(category);
        totals.add(category);
    }

    tracing::info!(
        "classified {} bins: {} near, {} substantial, {} moderate, {} partial",
        totals.total(),
        totals.near,
        totals.substantial,
        totals.moderate,
        totals.partial
    );

    Stage4Output {
        categories,
        per_sample,
        totals,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_classify.rs"]
mod tests;
