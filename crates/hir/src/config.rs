//! Blend weights for the scorer.

use crate::error::{HirError, Result};
use serde::{Deserialize, Serialize};

/// Slack allowed when checking that the two weights sum to at most 1
const WEIGHT_TOLERANCE: f64 = 1e-9;

/// How much of the ranking comes from direct association and from
/// proximity. Whatever is left, `1 - direct_association - proximity`, carries
/// the user's own normalized preferences.
///
/// Deserializes from JSON such as `{"direct_association": 0.4}`; missing
/// fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    pub direct_association: f64,
    pub proximity: f64,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            direct_association: 0.3,
            proximity: 0.2,
        }
    }
}

impl ScorerConfig {
    pub fn new(direct_association: f64, proximity: f64) -> Self {
        Self {
            direct_association,
            proximity,
        }
    }

    pub fn with_direct_association(mut self, weight: f64) -> Self {
        self.direct_association = weight;
        self
    }

    pub fn with_proximity(mut self, weight: f64) -> Self {
        self.proximity = weight;
        self
    }

    /// Weight left for the preference vector itself
    pub fn residual_weight(&self) -> f64 {
        1.0 - self.direct_association - self.proximity
    }

    /// Both weights in [0, 1] and their sum at most 1.
    pub fn validate(&self) -> Result<()> {
        let unit = 0.0..=1.0;
        let valid = unit.contains(&self.direct_association)
            && unit.contains(&self.proximity)
            && self.direct_association + self.proximity <= 1.0 + WEIGHT_TOLERANCE;

        if valid {
            Ok(())
        } else {
            Err(HirError::InvalidWeights {
                direct_association: self.direct_association,
                proximity: self.proximity,
            })
        }
    }
}
