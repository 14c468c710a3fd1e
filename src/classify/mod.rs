mod rules;

pub use rules::{Bound, Metric, Rule, RuleSet};

use crate::sample::{RideRequest, TelemetrySample};

/// Decides which ride profile a sample belongs to.
///
/// Returning `None` leaves the sample unclassified.
pub trait Classifier: Send + Sync {
    fn classify(&self, sample: &TelemetrySample) -> Option<String>;
}

/// Assigns the same profile to every sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedLabel(pub String);

impl Classifier for FixedLabel {
    fn classify(&self, _sample: &TelemetrySample) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Runs `classifier` over the record and returns the labeled copy.
pub fn label_sample(classifier: &dyn Classifier, record: &RideRequest) -> RideRequest {
    match classifier.classify(record.sample()) {
        Some(profile) => {
            log::debug!(
                "{}/{} classified as {}",
                record.sample().device_id(),
                record.sample().window_id(),
                profile
            );
            record.with_label(profile)
        }
        None => record.clone(),
    }
}
