//! Scaling factors and the value tiers they apply to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A scalar multiplier applied to a recipe's base value or base weight.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Factor(pub f64);

impl Factor {
    /// Leaves the base unchanged.
    pub const IDENTITY: Factor = Factor(1.0);

    pub fn value(self) -> f64 {
        self.0
    }

    /// Scale `base` by this factor.
    pub fn apply(self, base: f64) -> f64 {
        base * self.0
    }
}

impl Default for Factor {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<f64> for Factor {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// Value tier of a property type. Each tier carries its own factor and its
/// own descriptive variant labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueTier {
    Minor,
    Average,
    Major,
}

impl ValueTier {
    pub const ALL: [ValueTier; 3] = [ValueTier::Minor, ValueTier::Average, ValueTier::Major];
}

impl fmt::Display for ValueTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ValueTier::Minor => "minor",
            ValueTier::Average => "average",
            ValueTier::Major => "major",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_factor_is_identity() {
        assert_eq!(Factor::default(), Factor::IDENTITY);
        assert!((Factor::default().apply(42.5) - 42.5).abs() < f64::EPSILON);
    }

    #[test]
    fn apply_scales_base() {
        let f = Factor(1.5);
        assert!((f.apply(10.0) - 15.0).abs() < f64::EPSILON);
        assert!((Factor(0.0).apply(10.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn factor_deserializes_from_bare_number() {
        let f: Factor = serde_json::from_str("2.25").unwrap();
        assert!((f.value() - 2.25).abs() < f64::EPSILON);
    }

    #[test]
    fn tier_display_and_order() {
        let labels: Vec<String> = ValueTier::ALL.iter().map(|t| t.to_string()).collect();
        assert_eq!(labels, vec!["minor", "average", "major"]);
    }
}
