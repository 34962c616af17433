//! Statistics and ranking data attached to a collection entry.

use crate::raw::{self, RawMap};
use log::warn;
use serde::{Serialize, Serializer};

/// Name of the rank record carrying the overall board game rank.
pub const BOARDGAME_RANK: &str = "boardgame";

/// Placeholder the service reports for an unranked game.
const NOT_RANKED: &str = "Not Ranked";

/// One entry of a game's ranking list, e.g. the overall rank or a family rank.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RankRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub rank_type: Option<String>,
    pub name: String,
    #[serde(rename = "friendlyname", skip_serializing_if = "Option::is_none")]
    pub friendly_name: Option<String>,
    /// `None` when the game is not ranked in this category.
    #[serde(serialize_with = "serialize_rank_value")]
    pub value: Option<u32>,
    #[serde(rename = "bayesaverage", skip_serializing_if = "Option::is_none")]
    pub bayes_average: Option<f64>,
}

fn serialize_rank_value<S: Serializer>(
    value: &Option<u32>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(rank) => serializer.serialize_str(&rank.to_string()),
        None => serializer.serialize_str(NOT_RANKED),
    }
}

impl RankRecord {
    pub(crate) fn from_map(map: &RawMap) -> Self {
        Self {
            id: raw::int_field(map, "id"),
            rank_type: raw::str_field(map, "type"),
            name: raw::str_field(map, "name").unwrap_or_default(),
            friendly_name: raw::str_field(map, "friendlyname"),
            value: raw::int_field(map, "value"),
            bayes_average: raw::float_field(map, "bayesaverage"),
        }
    }
}

/// Aggregated statistics of a game as reported alongside a collection item.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GameStats {
    #[serde(rename = "usersrated")]
    pub users_rated: u32,
    /// The owner's own rating.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average: Option<f64>,
    #[serde(rename = "bayesaverage", skip_serializing_if = "Option::is_none")]
    pub bayes_average: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stddev: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median: Option<f64>,
    pub ranks: Vec<RankRecord>,
}

impl GameStats {
    pub(crate) fn from_map(map: &RawMap) -> Self {
        Self {
            users_rated: raw::int_field(map, "usersrated").unwrap_or(0),
            rating: raw::float_field(map, "rating"),
            average: raw::float_field(map, "average"),
            bayes_average: raw::float_field(map, "bayesaverage"),
            stddev: raw::float_field(map, "stddev"),
            median: raw::float_field(map, "median"),
            ranks: ranks_from_map(map),
        }
    }

    /// The overall rank: the value of the first record named `boardgame`.
    pub fn bgg_rank(&self) -> Option<u32> {
        self.ranks
            .iter()
            .find(|rank| rank.name == BOARDGAME_RANK)
            .and_then(|rank| rank.value)
    }
}

fn ranks_from_map(map: &RawMap) -> Vec<RankRecord> {
    let Some(ranks) = map.get("ranks") else {
        return Vec::new();
    };
    // A single record may arrive unwrapped
    let records = match ranks {
        serde_json::Value::Array(records) => records.as_slice(),
        serde_json::Value::Object(_) => std::slice::from_ref(ranks),
        other => {
            warn!("Ignoring ranks: expected a sequence, found {}", raw::kind_of(other));
            return Vec::new();
        }
    };
    records
        .iter()
        .filter_map(|record| match record.as_object() {
            Some(record) => Some(RankRecord::from_map(record)),
            None => {
                warn!(
                    "Skipping rank record: expected a mapping, found {}",
                    raw::kind_of(record)
                );
                None
            }
        })
        .collect()
}
