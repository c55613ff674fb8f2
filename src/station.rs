use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::fmt::Formatter;
use std::sync::Arc;

pub type StationId = Arc<str>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Station {
    #[serde(deserialize_with = "station_id")]
    pub id: StationId,
    pub name: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_to_coast: Option<f64>,
    /// Status as recorded by the directory, e.g. "ACTIVE" or "maintenance".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Directories key stations either by name-like strings or by numeric ids.
pub(crate) fn station_id<'de, D>(deserializer: D) -> Result<StationId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => Arc::from(s),
        RawId::Number(n) => Arc::from(n.to_string()),
    })
}
