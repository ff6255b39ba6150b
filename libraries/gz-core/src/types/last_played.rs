/// Last-played record
use serde::{Deserialize, Serialize};

use super::TrackId;

/// Last played track and position, restored at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastPlayed {
    /// Track id
    pub id: TrackId,

    /// Position in seconds
    #[serde(rename = "t", default)]
    pub position_secs: f64,
}

impl LastPlayed {
    /// Create a record
    pub fn new(id: TrackId, position_secs: f64) -> Self {
        Self { id, position_secs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_short_field_names() {
        let record = LastPlayed::new(TrackId::new("t3"), 42.0);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, serde_json::json!({ "id": "t3", "t": 42.0 }));
    }
}
