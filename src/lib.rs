//! Ride telemetry samples and the labeling stage that attaches a ride
//! profile to them.

pub mod classify;
pub mod codec;
pub mod config;
pub mod labeler;
pub mod report;
pub mod sample;

pub use sample::{ObservationKey, RideRequest, SchemaVersion, TelemetrySample, WindowAverages};
