use serde::Deserialize;

use super::Classifier;
use crate::sample::{TelemetrySample, WindowAverages};

/// Averaged quantity a rule can test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Pitch,
    Roll,
    Yaw,
    VerticalSpeed,
    Altitude,
    Latitude,
    Longitude,
    VelocityNorth,
    VelocityEast,
    VelocityDown,
    GroundSpeed,
    Heading,
}

impl Metric {
    pub fn value(&self, averages: &WindowAverages) -> f64 {
        match self {
            Metric::Pitch => averages.pitch,
            Metric::Roll => averages.roll,
            Metric::Yaw => averages.yaw,
            Metric::VerticalSpeed => averages.vertical_speed,
            Metric::Altitude => averages.altitude,
            Metric::Latitude => averages.latitude,
            Metric::Longitude => averages.longitude,
            Metric::VelocityNorth => averages.velocity_north,
            Metric::VelocityEast => averages.velocity_east,
            Metric::VelocityDown => averages.velocity_down,
            Metric::GroundSpeed => averages.ground_speed,
            Metric::Heading => averages.heading,
        }
    }
}

/// Inclusive range check on one metric.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Bound {
    pub metric: Metric,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    /// Compare the magnitude instead of the signed value.
    #[serde(default)]
    pub abs: bool,
}

impl Bound {
    pub fn matches(&self, averages: &WindowAverages) -> bool {
        let mut value = self.metric.value(averages);
        if self.abs {
            value = value.abs();
        }
        if value.is_nan() {
            return false;
        }
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Rule {
    pub profile: String,
    #[serde(default)]
    pub bounds: Vec<Bound>,
}

impl Rule {
    pub fn matches(&self, averages: &WindowAverages) -> bool {
        self.bounds.iter().all(|b| b.matches(averages))
    }
}

/// Ordered rules; the first match wins, otherwise `fallback`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(default)]
    pub fallback: Option<String>,
}

impl Classifier for RuleSet {
    fn classify(&self, sample: &TelemetrySample) -> Option<String> {
        let averages = sample.averages();
        self.rules
            .iter()
            .find(|rule| rule.matches(averages))
            .map(|rule| rule.profile.clone())
            .or_else(|| self.fallback.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::{reference_averages, reference_sample};

    fn speed_rules() -> RuleSet {
        serde_yaml::from_str(
            r#"
fallback: cruising
rules:
  - profile: aggressive
    bounds:
      - { metric: ground_speed, min: 60.0 }
  - profile: climbing
    bounds:
      - { metric: pitch, abs: true, min: 0.03 }
      - { metric: vertical_speed, max: 1.0 }
"#,
        )
        .unwrap()
    }

    fn sample_with(averages: WindowAverages) -> TelemetrySample {
        TelemetrySample::new("JE8LDRJSJT", 36, averages)
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let rules = speed_rules();
        let fast = sample_with(WindowAverages {
            ground_speed: 80.0,
            ..reference_averages()
        });

        assert_eq!(rules.classify(&fast).as_deref(), Some("aggressive"));
    }

    #[test]
    fn test_abs_bound_uses_magnitude() {
        // reference pitch is -0.0348
        assert_eq!(
            speed_rules().classify(&reference_sample()).as_deref(),
            Some("climbing")
        );
    }

    #[test]
    fn test_fallback_when_nothing_matches() {
        let level = sample_with(WindowAverages {
            pitch: 0.0,
            ..reference_averages()
        });
        assert_eq!(speed_rules().classify(&level).as_deref(), Some("cruising"));

        let no_fallback = RuleSet {
            fallback: None,
            ..speed_rules()
        };
        assert_eq!(no_fallback.classify(&level), None);
    }

    #[test]
    fn test_nan_never_matches() {
        let bound = Bound {
            metric: Metric::Altitude,
            min: None,
            max: None,
            abs: false,
        };
        let unknown = WindowAverages {
            altitude: f64::NAN,
            ..reference_averages()
        };

        assert!(bound.matches(&reference_averages()));
        assert!(!bound.matches(&unknown));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let bound = Bound {
            metric: Metric::Altitude,
            min: Some(765.29144),
            max: Some(765.29144),
            abs: false,
        };
        assert!(bound.matches(&reference_averages()));
    }

    #[test]
    fn test_rule_without_bounds_matches_everything() {
        let rules = RuleSet {
            rules: vec![Rule {
                profile: "any".into(),
                bounds: Vec::new(),
            }],
            fallback: None,
        };
        assert_eq!(rules.classify(&reference_sample()).as_deref(), Some("any"));
    }
}
