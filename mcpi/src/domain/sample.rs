//! Samples and the quarter-circle classifier

use serde::{Deserialize, Serialize};

/// One (x, y) observation submitted for classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl Sample {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Classify this sample against the unit circle
    pub fn class(&self) -> Class {
        classify(self.x, self.y)
    }
}

impl From<(f64, f64)> for Sample {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Outcome of classifying a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Class {
    /// Strictly inside the unit circle
    Inner,
    /// On or outside the unit circle (including NaN coordinates)
    Outer,
}

impl std::fmt::Display for Class {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inner => write!(f, "inner"),
            Self::Outer => write!(f, "outer"),
        }
    }
}

/// Classify a point: `Inner` iff `x² + y² < 1`
///
/// Total over all `f64` inputs. Any NaN makes the comparison false, so NaN
/// points land in `Outer`.
pub fn classify(x: f64, y: f64) -> Class {
    if x * x + y * y < 1.0 { Class::Inner } else { Class::Outer }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_classify_origin_is_inner() {
        assert_eq!(classify(0.0, 0.0), Class::Inner);
    }

    #[test]
    fn test_classify_boundary_is_outer() {
        assert_eq!(classify(1.0, 0.0), Class::Outer);
        assert_eq!(classify(0.0, 1.0), Class::Outer);
        assert_eq!(classify(-1.0, 0.0), Class::Outer);
    }

    #[test]
    fn test_classify_near_boundary() {
        let eps = 1e-9;
        assert_eq!(classify(1.0 - eps, 0.0), Class::Inner);
        assert_eq!(classify(1.0 + eps, 0.0), Class::Outer);

        let d = std::f64::consts::FRAC_1_SQRT_2;
        assert_eq!(classify(d - eps, d - eps), Class::Inner);
        assert_eq!(classify(d + eps, d + eps), Class::Outer);
    }

    #[test]
    fn test_classify_non_finite() {
        assert_eq!(classify(f64::NAN, 0.0), Class::Outer);
        assert_eq!(classify(0.0, f64::INFINITY), Class::Outer);
        assert_eq!(classify(f64::NEG_INFINITY, f64::NAN), Class::Outer);
    }

    #[test]
    fn test_sample_class_matches_classify() {
        assert_eq!(Sample::new(0.5, 0.5).class(), Class::Inner);
        assert_eq!(Sample::from((2.0, 2.0)).class(), Class::Outer);
    }

    #[test]
    fn test_class_serde() {
        assert_eq!(serde_json::to_string(&Class::Inner).unwrap(), "\"inner\"");
        let class: Class = serde_json::from_str("\"outer\"").unwrap();
        assert_eq!(class, Class::Outer);
    }

    proptest! {
        #[test]
        fn prop_classify_matches_predicate(x in -10.0f64..10.0, y in -10.0f64..10.0) {
            let expected = if x * x + y * y < 1.0 { Class::Inner } else { Class::Outer };
            prop_assert_eq!(classify(x, y), expected);
        }

        #[test]
        fn prop_classify_is_symmetric(x in -2.0f64..2.0, y in -2.0f64..2.0) {
            prop_assert_eq!(classify(x, y), classify(-x, y));
            prop_assert_eq!(classify(x, y), classify(x, -y));
            prop_assert_eq!(classify(x, y), classify(y, x));
        }
    }
}
