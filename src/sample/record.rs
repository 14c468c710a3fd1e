use serde::{Deserialize, Serialize};
use strum_macros::Display;

use super::types::TelemetrySample;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[strum(serialize_all = "snake_case")]
pub enum SchemaVersion {
    Legacy,
    Current,
}

/// A sample as it travels between pipeline stages.
///
/// Older producers still attach a `track_id` to every record. Rather than
/// hang a mutable field off the sample, the legacy schema is its own variant
/// and the id is fixed for the life of the record like everything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireRecord", into = "WireRecord")]
pub enum RideRequest {
    Legacy {
        track_id: i64,
        sample: TelemetrySample,
    },
    Current(TelemetrySample),
}

impl RideRequest {
    pub fn schema_version(&self) -> SchemaVersion {
        match self {
            RideRequest::Legacy { .. } => SchemaVersion::Legacy,
            RideRequest::Current(_) => SchemaVersion::Current,
        }
    }

    pub fn sample(&self) -> &TelemetrySample {
        match self {
            RideRequest::Legacy { sample, .. } => sample,
            RideRequest::Current(sample) => sample,
        }
    }

    pub fn track_id(&self) -> Option<i64> {
        match self {
            RideRequest::Legacy { track_id, .. } => Some(*track_id),
            RideRequest::Current(_) => None,
        }
    }

    pub fn into_sample(self) -> TelemetrySample {
        match self {
            RideRequest::Legacy { sample, .. } => sample,
            RideRequest::Current(sample) => sample,
        }
    }

    /// Labels the inner sample, keeping the schema variant and track id.
    pub fn with_label(&self, label: impl Into<String>) -> Self {
        match self {
            RideRequest::Legacy { track_id, sample } => RideRequest::Legacy {
                track_id: *track_id,
                sample: sample.with_label(label),
            },
            RideRequest::Current(sample) => RideRequest::Current(sample.with_label(label)),
        }
    }

    /// Drops the legacy track id.
    pub fn upgrade(self) -> Self {
        RideRequest::Current(self.into_sample())
    }
}

impl From<TelemetrySample> for RideRequest {
    fn from(sample: TelemetrySample) -> Self {
        RideRequest::Current(sample)
    }
}

/// Flat on-the-wire layout shared by both schema versions.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    track_id: Option<i64>,
    #[serde(flatten)]
    sample: TelemetrySample,
}

impl From<WireRecord> for RideRequest {
    fn from(wire: WireRecord) -> Self {
        match wire.track_id {
            Some(track_id) => RideRequest::Legacy {
                track_id,
                sample: wire.sample,
            },
            None => RideRequest::Current(wire.sample),
        }
    }
}

impl From<RideRequest> for WireRecord {
    fn from(request: RideRequest) -> Self {
        let track_id = request.track_id();
        WireRecord {
            track_id,
            sample: request.into_sample(),
        }
    }
}
