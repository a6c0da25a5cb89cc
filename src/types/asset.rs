use serde::{Deserialize, Serialize};

/// Per-asset capacity summary as computed by the backend.
///
/// Numeric fields are decimal strings of base-unit amounts (already decoded,
/// not hex).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetAnalysis {
    pub name: String,
    #[serde(deserialize_with = "super::de_decimal_string")]
    pub max: String,
    #[serde(deserialize_with = "super::de_decimal_string")]
    pub min: String,
    #[serde(deserialize_with = "super::de_decimal_string")]
    pub avg: String,
    #[serde(deserialize_with = "super::de_decimal_string")]
    pub median: String,
    #[serde(deserialize_with = "super::de_decimal_string")]
    pub total: String,
    #[serde(deserialize_with = "super::de_decimal_string")]
    pub channel_len: String,
}

impl AssetAnalysis {
    /// Summary with every numeric field set to zero
    pub fn zero(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            max: "0".to_string(),
            min: "0".to_string(),
            avg: "0".to_string(),
            median: "0".to_string(),
            total: "0".to_string(),
            channel_len: "0".to_string(),
        }
    }
}
