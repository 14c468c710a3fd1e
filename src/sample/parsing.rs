use serde::{Deserialize, Deserializer};

/// Reads an averaged value, mapping JSON `null` to NaN.
///
/// serde_json writes non-finite floats as `null`, so this keeps NaN and the
/// infinities from turning a sample into a decode error on the way back in.
pub fn nan_if_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}
