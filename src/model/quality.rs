use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityCategory {
    Near,
    Substantial,
    Moderate,
    Partial,
}

impl QualityCategory {
    pub fn all() -> &'static [QualityCategory] {
        &[
            QualityCategory::Near,
            QualityCategory::Substantial,
            QualityCategory::Moderate,
            QualityCategory::Partial,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QualityCategory::Near => "near",
            QualityCategory::Substantial => "substantial",
            QualityCategory::Moderate => "moderate",
            QualityCategory::Partial => "partial",
        }
    }
}

/// Lower completeness bounds (inclusive) for each category above `partial`.
#[derive(Debug, Clone)]
pub struct QualityThresholds {
    pub near: f64,
    pub substantial: f64,
    pub moderate: f64,
}

impl QualityThresholds {
    pub fn default_v1() -> Self {
        Self {
            near: 90.0,
            substantial: 70.0,
            moderate: 50.0,
        }
    }

    /// Out-of-range scores are not rejected; NaN lands in `partial`.
    pub fn classify(&self, completeness: f64) -> QualityCategory {
        if completeness >= self.near {
            QualityCategory::Near
        } else if completeness >= self.substantial {
            QualityCategory::Substantial
        } else if completeness >= self.moderate {
            QualityCategory::Moderate
        } else {
            QualityCategory::Partial
        }
    }
}
