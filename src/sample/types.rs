use serde::{Deserialize, Serialize};

use super::parsing::nan_if_null;

/// Per-window averages computed upstream from the raw sensor stream.
///
/// Units are whatever the producer uses; nothing here is range checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowAverages {
    #[serde(rename = "avg_pitch", deserialize_with = "nan_if_null")]
    pub pitch: f64,
    #[serde(rename = "avg_roll", deserialize_with = "nan_if_null")]
    pub roll: f64,
    #[serde(rename = "avg_yaw", deserialize_with = "nan_if_null")]
    pub yaw: f64,
    #[serde(rename = "avg_v_speed", deserialize_with = "nan_if_null")]
    pub vertical_speed: f64,
    #[serde(rename = "avg_altitude", deserialize_with = "nan_if_null")]
    pub altitude: f64,
    #[serde(rename = "avg_lati", deserialize_with = "nan_if_null")]
    pub latitude: f64,
    #[serde(rename = "avg_long", deserialize_with = "nan_if_null")]
    pub longitude: f64,
    /// NED frame.
    #[serde(rename = "avg_vn", deserialize_with = "nan_if_null")]
    pub velocity_north: f64,
    #[serde(rename = "avg_ve", deserialize_with = "nan_if_null")]
    pub velocity_east: f64,
    #[serde(rename = "avg_vd", deserialize_with = "nan_if_null")]
    pub velocity_down: f64,
    // Producers already emit the misspelled key.
    #[serde(rename = "avg_gspped", deserialize_with = "nan_if_null")]
    pub ground_speed: f64,
    #[serde(rename = "avg_h", deserialize_with = "nan_if_null")]
    pub heading: f64,
}

/// Identity of a physical observation: one device, one sampling window.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ObservationKey {
    pub device_id: String,
    pub window_id: i64,
}

/// One aggregated observation window from a single device.
///
/// Every field is fixed at construction. The classification label is the
/// only thing that can differ between copies of the same observation, and it
/// only changes by deriving a new sample through [`TelemetrySample::with_label`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    #[serde(rename = "spider")]
    device_id: String,
    #[serde(rename = "power_cycle")]
    window_id: i64,
    #[serde(flatten)]
    averages: WindowAverages,
    #[serde(
        rename = "profile",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    classification_label: Option<String>,
}

impl TelemetrySample {
    /// Builds an unclassified sample.
    pub fn new(device_id: impl Into<String>, window_id: i64, averages: WindowAverages) -> Self {
        Self::with_parts(device_id, window_id, averages, None)
    }

    /// Builds a sample with an explicit, possibly absent, label.
    pub fn with_parts(
        device_id: impl Into<String>,
        window_id: i64,
        averages: WindowAverages,
        classification_label: Option<String>,
    ) -> Self {
        Self {
            device_id: device_id.into(),
            window_id,
            averages,
            classification_label,
        }
    }

    /// Returns a copy carrying `label`. An existing label is replaced.
    pub fn with_label(&self, label: impl Into<String>) -> Self {
        self.clone().into_labeled(label)
    }

    /// Consuming form of [`with_label`](Self::with_label).
    pub fn into_labeled(self, label: impl Into<String>) -> Self {
        Self {
            classification_label: Some(label.into()),
            ..self
        }
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn window_id(&self) -> i64 {
        self.window_id
    }

    pub fn averages(&self) -> &WindowAverages {
        &self.averages
    }

    pub fn avg_pitch(&self) -> f64 {
        self.averages.pitch
    }

    pub fn avg_roll(&self) -> f64 {
        self.averages.roll
    }

    pub fn avg_yaw(&self) -> f64 {
        self.averages.yaw
    }

    pub fn avg_vertical_speed(&self) -> f64 {
        self.averages.vertical_speed
    }

    pub fn avg_altitude(&self) -> f64 {
        self.averages.altitude
    }

    pub fn avg_latitude(&self) -> f64 {
        self.averages.latitude
    }

    pub fn avg_longitude(&self) -> f64 {
        self.averages.longitude
    }

    pub fn avg_velocity_north(&self) -> f64 {
        self.averages.velocity_north
    }

    pub fn avg_velocity_east(&self) -> f64 {
        self.averages.velocity_east
    }

    pub fn avg_velocity_down(&self) -> f64 {
        self.averages.velocity_down
    }

    pub fn avg_ground_speed(&self) -> f64 {
        self.averages.ground_speed
    }

    pub fn avg_heading(&self) -> f64 {
        self.averages.heading
    }

    pub fn classification_label(&self) -> Option<&str> {
        self.classification_label.as_deref()
    }

    pub fn is_labeled(&self) -> bool {
        self.classification_label.is_some()
    }

    pub fn observation_key(&self) -> ObservationKey {
        ObservationKey {
            device_id: self.device_id.clone(),
            window_id: self.window_id,
        }
    }

    /// True when both samples describe the same device window, whatever
    /// their labels.
    pub fn is_same_observation(&self, other: &TelemetrySample) -> bool {
        self.device_id == other.device_id && self.window_id == other.window_id
    }
}
