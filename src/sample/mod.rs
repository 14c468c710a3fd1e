mod parsing;
mod record;
mod types;

pub use record::{RideRequest, SchemaVersion};
pub use types::{ObservationKey, TelemetrySample, WindowAverages};

#[cfg(test)]
pub(crate) use types::tests::{reference_averages, reference_sample};
