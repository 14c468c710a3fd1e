mod error;
mod lines;

pub use error::CodecError;
pub use lines::{RecordReader, RecordWriter};

use crate::sample::RideRequest;

/// Decodes one flat JSON record.
pub fn decode_record(json: &str) -> Result<RideRequest, CodecError> {
    Ok(serde_json::from_str(json)?)
}

/// Encodes one record as a single-line JSON object.
pub fn encode_record(record: &RideRequest) -> Result<String, CodecError> {
    Ok(serde_json::to_string(record)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::{reference_sample, SchemaVersion, TelemetrySample};
    use serde_json::Value;

    const LEGACY_PAYLOAD: &str = r#"{ "track_id": 36, "spider": "JE8LDRJSJT", "power_cycle": 36,
        "avg_pitch": -0.034775496, "avg_roll": 0.008343337, "avg_yaw": 0.32535574,
        "avg_v_speed": 0.0070177596, "avg_altitude": 765.29144, "avg_lati": 30.505756,
        "avg_long": -95.14779, "avg_vn": 0.1617198057, "avg_ve": -0.2067287654,
        "avg_vd": -0.0070177596, "avg_gspped": 40.792923471, "avg_h": 0.3073974703 }"#;

    #[test]
    fn test_decode_legacy_payload() {
        let record = decode_record(LEGACY_PAYLOAD).unwrap();

        assert_eq!(record.schema_version(), SchemaVersion::Legacy);
        assert_eq!(record.track_id(), Some(36));
        assert_eq!(record.sample(), &reference_sample());
    }

    #[test]
    fn test_decode_current_payload() {
        let mut value: Value = serde_json::from_str(LEGACY_PAYLOAD).unwrap();
        value.as_object_mut().unwrap().remove("track_id");
        value["profile"] = Value::from("smooth-rider");

        let record = decode_record(&value.to_string()).unwrap();

        assert_eq!(record.schema_version(), SchemaVersion::Current);
        assert_eq!(
            record.sample(),
            &reference_sample().with_label("smooth-rider")
        );
    }

    #[test]
    fn test_decode_null_optionals() {
        let mut value: Value = serde_json::from_str(LEGACY_PAYLOAD).unwrap();
        value["track_id"] = Value::Null;
        value["profile"] = Value::Null;

        let record = decode_record(&value.to_string()).unwrap();

        assert_eq!(record.track_id(), None);
        assert_eq!(record.sample().classification_label(), None);
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let mut value: Value = serde_json::from_str(LEGACY_PAYLOAD).unwrap();
        value["firmware"] = Value::from("2.1.0");

        assert!(decode_record(&value.to_string()).is_ok());
    }

    #[test]
    fn test_decode_missing_identifier_fails() {
        let mut value: Value = serde_json::from_str(LEGACY_PAYLOAD).unwrap();
        value.as_object_mut().unwrap().remove("spider");

        assert!(matches!(
            decode_record(&value.to_string()),
            Err(CodecError::Json(_))
        ));
    }

    #[test]
    fn test_decode_missing_average_fails() {
        let mut value: Value = serde_json::from_str(LEGACY_PAYLOAD).unwrap();
        value.as_object_mut().unwrap().remove("avg_gspped");

        assert!(decode_record(&value.to_string()).is_err());
    }

    #[test]
    fn test_encode_uses_wire_names() {
        let record = RideRequest::Legacy {
            track_id: 36,
            sample: reference_sample(),
        };
        let value: Value = serde_json::from_str(&encode_record(&record).unwrap()).unwrap();
        let object = value.as_object().unwrap();

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "avg_altitude",
                "avg_gspped",
                "avg_h",
                "avg_lati",
                "avg_long",
                "avg_pitch",
                "avg_roll",
                "avg_v_speed",
                "avg_vd",
                "avg_ve",
                "avg_vn",
                "avg_yaw",
                "power_cycle",
                "spider",
                "track_id",
            ]
        );
        assert_eq!(object["spider"], "JE8LDRJSJT");
        assert_eq!(object["avg_gspped"], 40.792923471);
    }

    #[test]
    fn test_encode_current_labeled() {
        let record = RideRequest::from(reference_sample().with_label("smooth-rider"));
        let value: Value = serde_json::from_str(&encode_record(&record).unwrap()).unwrap();

        assert!(value.get("track_id").is_none());
        assert_eq!(value["profile"], "smooth-rider");
        assert_eq!(decode_record(&value.to_string()).unwrap(), record);
    }

    #[test]
    fn test_non_finite_averages_survive_the_wire() {
        let mut averages = *reference_sample().averages();
        averages.pitch = f64::NAN;
        let record = RideRequest::from(TelemetrySample::new("JE8LDRJSJT", 36, averages));

        let encoded = encode_record(&record).unwrap();
        assert!(encoded.contains("\"avg_pitch\":null"));

        let decoded = decode_record(&encoded).unwrap();
        assert!(decoded.sample().avg_pitch().is_nan());
        assert_eq!(decoded.sample().avg_roll(), 0.008343337);
    }
}
