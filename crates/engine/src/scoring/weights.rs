//! Dimension weight configuration and failure redistribution.

use serde::{Deserialize, Serialize};

use crate::models::ElementCategory;

/// Weights must sum to 1.0 within this tolerance at all times, including
/// after a dimension-failure redistribution.
pub const WEIGHT_TOLERANCE: f64 = 0.01;

/// The five scoring dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Keywords,
    Skills,
    Attributes,
    Experience,
    Level,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Keywords,
        Dimension::Skills,
        Dimension::Attributes,
        Dimension::Experience,
        Dimension::Level,
    ];

    /// Which dimension a job element's category contributes to.
    /// Concepts are keyword-shaped evidence and bucket with keywords.
    pub fn for_category(category: ElementCategory) -> Dimension {
        match category {
            ElementCategory::Keyword | ElementCategory::Concept => Dimension::Keywords,
            ElementCategory::Skill => Dimension::Skills,
            ElementCategory::Attribute => Dimension::Attributes,
            ElementCategory::Experience => Dimension::Experience,
        }
    }
}

/// Per-dimension weights used to combine dimension scores into the overall
/// score. Invariant: `sum()` stays within [`WEIGHT_TOLERANCE`] of 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionWeights {
    pub keywords: f64,
    pub skills: f64,
    pub attributes: f64,
    pub experience: f64,
    pub level: f64,
}

impl Default for DimensionWeights {
    fn default() -> Self {
        Self {
            keywords: 0.20,
            skills: 0.35,
            attributes: 0.20,
            experience: 0.15,
            level: 0.10,
        }
    }
}

impl DimensionWeights {
    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Keywords => self.keywords,
            Dimension::Skills => self.skills,
            Dimension::Attributes => self.attributes,
            Dimension::Experience => self.experience,
            Dimension::Level => self.level,
        }
    }

    fn set(&mut self, dimension: Dimension, weight: f64) {
        match dimension {
            Dimension::Keywords => self.keywords = weight,
            Dimension::Skills => self.skills = weight,
            Dimension::Attributes => self.attributes = weight,
            Dimension::Experience => self.experience = weight,
            Dimension::Level => self.level = weight,
        }
    }

    pub fn sum(&self) -> f64 {
        self.keywords + self.skills + self.attributes + self.experience + self.level
    }

    /// Degradation path for a failed dimension: zero its weight and scale the
    /// survivors by `1 / (1 - failed_weight)` so the sum stays at 1.0.
    ///
    /// If the failed dimension held (almost) all the weight there is nothing
    /// to redistribute to; the weights collapse to zero in that case.
    pub fn redistribute_without(&self, failed: Dimension) -> Self {
        let failed_weight = self.get(failed);
        let remaining = 1.0 - failed_weight;

        let mut redistributed = *self;
        redistributed.set(failed, 0.0);

        if remaining <= f64::EPSILON {
            for dimension in Dimension::ALL {
                redistributed.set(dimension, 0.0);
            }
            return redistributed;
        }

        for dimension in Dimension::ALL {
            if dimension != failed {
                redistributed.set(dimension, self.get(dimension) / remaining);
            }
        }
        redistributed
    }
}
