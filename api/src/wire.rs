//! Wire shape of the sports-events feed.
//!
//! The feed is a flat JSON array of heterogeneous records whose keys have
//! drifted over time (`overall_wins` vs `overallWins`, `dataType` vs the
//! DynamoDB sort key `SK`, ...). Records stay an open map until
//! classification; each logical field is an ordered alias list resolved by a
//! single first-present-wins lookup.
use serde::Deserialize;
use serde_json::{Map, Value};

// Accepted spellings per logical field, most current first.
pub const DATA_TYPE: &[&str] = &["dataType", "datatype", "SK"];
pub const SPORT: &[&str] = &["sport", "Sport"];
pub const TEAM_NAME: &[&str] = &["team_name"];
pub const TEAM_LOGO_URL: &[&str] = &["team_logo_url"];
pub const PRIMARY_COLOR: &[&str] = &["primaryThemeColor", "primary_color", "primaryColor"];
pub const SECONDARY_COLOR: &[&str] = &["secondaryThemeColor", "secondary_color", "secondaryColor"];
pub const CONFERENCE_NAME: &[&str] = &["conference_name"];

pub const GAME_ID: &[&str] = &["game_id"];
pub const START_TIME: &[&str] = &["start_time_utc"];
pub const OPPONENT_NAME: &[&str] = &["opponent_name"];
pub const OPPONENT_LOGO_URL: &[&str] = &["opponent_logo_url"];
pub const GAME_OUTCOME: &[&str] = &["game_outcome"];
pub const GAME_LOCATION: &[&str] = &["game_location"];
pub const TEAM_SCORE: &[&str] = &["score_team"];
pub const OPPONENT_SCORE: &[&str] = &["score_opponent"];

pub const OVERALL_WINS: &[&str] = &["overall_wins", "overallWins"];
pub const OVERALL_LOSSES: &[&str] = &["overall_losses", "overallLosses"];
pub const CONF_WINS: &[&str] = &["conf_wins", "confWins", "conference_wins"];
pub const CONF_LOSSES: &[&str] = &["conf_losses", "confLosses", "conference_losses"];
pub const RANK: &[&str] = &["rank", "Rank"];
pub const STANDING_TYPE: &[&str] = &["standing_type", "standingType", "conference_name", "SK"];
pub const STREAK: &[&str] = &["streak", "Streak"];

/// One raw feed record, pre-classification: an open JSON object.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct RawItem(pub Map<String, Value>);

impl RawItem {
    /// First present, non-null value among `keys`.
    pub fn first(&self, keys: &[&str]) -> Option<&Value> {
        keys.iter()
            .find_map(|k| self.0.get(*k).filter(|v| !v.is_null()))
    }

    /// Whether any of `keys` is present with a non-null value.
    pub fn has_any(&self, keys: &[&str]) -> bool {
        self.first(keys).is_some()
    }

    /// String form of the first present value. Numbers are stringified since
    /// the feed has shipped both `"rank": 3` and `"rank": "3"`.
    pub fn text(&self, keys: &[&str]) -> Option<String> {
        match self.first(keys)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Numeric form of the first present value, accepting numeric strings.
    pub fn number(&self, keys: &[&str]) -> Option<u32> {
        match self.first(keys)? {
            Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Lowercased record-type tag (`dataType`, `datatype`, or the `SK` sort
    /// key), empty when absent.
    pub fn data_type(&self) -> String {
        self.text(DATA_TYPE).unwrap_or_default().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: serde_json::Value) -> RawItem {
        serde_json::from_value(value).expect("test item should deserialize")
    }

    #[test]
    fn first_present_alias_wins() {
        let raw = item(json!({ "overall_wins": "12", "overallWins": "99" }));
        assert_eq!(raw.number(OVERALL_WINS), Some(12));
    }

    #[test]
    fn null_values_fall_through_to_later_aliases() {
        let raw = item(json!({ "overall_wins": null, "overallWins": 7 }));
        assert_eq!(raw.number(OVERALL_WINS), Some(7));
    }

    #[test]
    fn number_accepts_numeric_strings() {
        let raw = item(json!({ "rank": "3" }));
        assert_eq!(raw.number(RANK), Some(3));
        let raw = item(json!({ "rank": 3 }));
        assert_eq!(raw.number(RANK), Some(3));
        let raw = item(json!({ "rank": "third" }));
        assert_eq!(raw.number(RANK), None);
    }

    #[test]
    fn data_type_reads_any_spelling_and_the_sort_key() {
        assert_eq!(item(json!({ "dataType": "TeamInfo" })).data_type(), "teaminfo");
        assert_eq!(item(json!({ "datatype": "Standing" })).data_type(), "standing");
        assert_eq!(item(json!({ "SK": "TeamInfo#42" })).data_type(), "teaminfo#42");
        assert_eq!(item(json!({})).data_type(), "");
    }
}
