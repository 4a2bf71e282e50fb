use serde::{Deserialize, Deserializer, Serialize};

/// A draft row as listed by the backend (`getAllDraftData`).
/// Values are kept as the backend sent them; numbers may arrive as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftRow {
    pub date: String,
    #[serde(default)]
    pub time_in: Option<String>,
    #[serde(default)]
    pub time_out: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub lunch_timeout: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub total_hours: Option<String>,
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
