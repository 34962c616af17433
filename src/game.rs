//! A single normalized entry of a user's collection.

use crate::error::DataError;
use crate::private::PrivateInfo;
use crate::raw::{self, RawMap};
use crate::stats::{GameStats, RankRecord};
use crate::version::BoardGameVersion;
use serde::Serialize;
use serde_json::Value;
use std::fmt::{self, Write as _};

/// Controls how optional blocks of a raw item are honored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectionOptions {
    /// Drop `version` blocks, as when version expansion was not requested.
    pub ignore_versions: bool,
}

/// The owner's relationship to a game: owned, wanted, for trade and so on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollectionStatus {
    pub own: bool,
    #[serde(rename = "prevowned")]
    pub prev_owned: bool,
    #[serde(rename = "fortrade")]
    pub for_trade: bool,
    pub want: bool,
    #[serde(rename = "wanttoplay")]
    pub want_to_play: bool,
    #[serde(rename = "wanttobuy")]
    pub want_to_buy: bool,
    pub wishlist: bool,
    pub preordered: bool,
    #[serde(rename = "wishlistpriority", skip_serializing_if = "Option::is_none")]
    pub wishlist_priority: Option<u8>,
    #[serde(rename = "lastmodified", skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
}

impl CollectionStatus {
    fn from_map(map: &RawMap) -> Self {
        let flag = |key| raw::bool_field(map, key).unwrap_or(false);
        Self {
            own: flag("own"),
            prev_owned: flag("prevowned"),
            for_trade: flag("fortrade"),
            want: flag("want"),
            want_to_play: flag("wanttoplay"),
            want_to_buy: flag("wanttobuy"),
            wishlist: flag("wishlist"),
            preordered: flag("preordered"),
            wishlist_priority: raw::int_field(map, "wishlistpriority"),
            last_modified: raw::str_field(map, "lastmodified"),
        }
    }
}

/// Fields without which an item cannot be accepted.
struct Identity {
    id: i64,
    name: String,
}

impl Identity {
    fn from_map(map: &RawMap) -> Result<Self, DataError> {
        Ok(Self {
            id: raw::require_id(map, "id")?,
            name: raw::require_name(map, "name")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionBoardGame {
    pub id: i64,
    pub name: String,
    #[serde(rename = "yearpublished", skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub image: String,
    pub thumbnail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "minplayers")]
    pub min_players: u32,
    #[serde(rename = "maxplayers")]
    pub max_players: u32,
    #[serde(rename = "minplaytime")]
    pub min_playing_time: u32,
    #[serde(rename = "maxplaytime")]
    pub max_playing_time: u32,
    #[serde(rename = "playingtime")]
    pub playing_time: u32,
    pub numplays: u32,
    pub stats: GameStats,
    pub status: CollectionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<BoardGameVersion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<PrivateInfo>,
}

impl CollectionBoardGame {
    pub fn from_value(value: &Value) -> Result<Self, DataError> {
        Self::from_value_with_options(value, CollectionOptions::default())
    }

    /// Validates the identity fields strictly, then maps everything else
    /// leniently. Only the first step can fail.
    pub fn from_value_with_options(
        value: &Value,
        options: CollectionOptions,
    ) -> Result<Self, DataError> {
        let map = raw::as_mapping(value)?;
        let identity = Identity::from_map(map)?;
        Ok(Self::with_supplementary(identity, map, options))
    }

    fn with_supplementary(identity: Identity, map: &RawMap, options: CollectionOptions) -> Self {
        let count = |key| raw::int_field(map, key).unwrap_or(0);
        let version = if options.ignore_versions {
            None
        } else {
            raw::map_field(map, "version").and_then(BoardGameVersion::from_map)
        };
        Self {
            id: identity.id,
            name: identity.name,
            year: raw::int_field(map, "yearpublished"),
            image: raw::str_field(map, "image").unwrap_or_default(),
            thumbnail: raw::str_field(map, "thumbnail").unwrap_or_default(),
            comment: raw::str_field(map, "comment"),
            min_players: count("minplayers"),
            max_players: count("maxplayers"),
            min_playing_time: count("minplaytime"),
            max_playing_time: count("maxplaytime"),
            playing_time: count("playingtime"),
            numplays: count("numplays"),
            stats: raw::map_field(map, "stats")
                .map(GameStats::from_map)
                .unwrap_or_default(),
            status: raw::map_field(map, "status")
                .map(CollectionStatus::from_map)
                .unwrap_or_default(),
            version,
            private: raw::map_field(map, "private").map(PrivateInfo::from_map),
        }
    }

    pub fn users_rated(&self) -> u32 {
        self.stats.users_rated
    }

    pub fn rating(&self) -> Option<f64> {
        self.stats.rating
    }

    pub fn rating_bayes_average(&self) -> Option<f64> {
        self.stats.bayes_average
    }

    pub fn bgg_rank(&self) -> Option<u32> {
        self.stats.bgg_rank()
    }

    pub fn ranks(&self) -> &[RankRecord] {
        &self.stats.ranks
    }

    fn private_str(&self, field: impl FnOnce(&PrivateInfo) -> &Option<String>) -> Option<&str> {
        self.private.as_ref().and_then(|p| field(p).as_deref())
    }

    pub fn private_comment(&self) -> Option<&str> {
        self.private_str(|p| &p.comment)
    }

    pub fn paid(&self) -> Option<f64> {
        self.private.as_ref().and_then(|p| p.paid)
    }

    pub fn currency(&self) -> Option<&str> {
        self.private_str(|p| &p.currency)
    }

    pub fn currvalue(&self) -> Option<f64> {
        self.private.as_ref().and_then(|p| p.currvalue)
    }

    pub fn cv_currency(&self) -> Option<&str> {
        self.private_str(|p| &p.cv_currency)
    }

    pub fn quantity(&self) -> Option<&str> {
        self.private_str(|p| &p.quantity)
    }

    pub fn acquired_on(&self) -> Option<&str> {
        self.private_str(|p| &p.acquired_on)
    }

    pub fn acquired_from(&self) -> Option<&str> {
        self.private_str(|p| &p.acquired_from)
    }

    pub fn location(&self) -> Option<&str> {
        self.private_str(|p| &p.location)
    }

    /// Multi-line listing of every field, absent ones shown as `-`.
    pub fn details(&self) -> String {
        fn opt<T: fmt::Display>(value: Option<T>) -> String {
            value.map_or_else(|| "-".to_string(), |v| v.to_string())
        }

        let mut out = String::new();
        let mut line = |label: &str, value: String| {
            let _ = writeln!(out, "{label:<18}: {value}");
        };
        line("boardgame id", self.id.to_string());
        line("boardgame name", self.name.clone());
        line("year", opt(self.year));
        line("players", format!("{}-{}", self.min_players, self.max_players));
        line(
            "playing time",
            format!(
                "{} ({}-{})",
                self.playing_time, self.min_playing_time, self.max_playing_time
            ),
        );
        line("number of plays", self.numplays.to_string());
        line("rank", opt(self.bgg_rank()));
        line("users rated", self.users_rated().to_string());
        line("bayes average", opt(self.rating_bayes_average()));
        line("rating", opt(self.rating()));
        line("own", self.status.own.to_string());
        line("wishlist", self.status.wishlist.to_string());
        line("last modified", opt(self.status.last_modified.as_deref()));
        line("comment", opt(self.comment.as_deref()));
        if let Some(version) = &self.version {
            line(
                "version",
                format!("{} ({})", opt(version.name.as_deref()), version.id),
            );
        }
        if self.private.is_some() {
            line("private comment", opt(self.private_comment()));
            line(
                "paid",
                format!("{} {}", opt(self.paid()), self.currency().unwrap_or_default()),
            );
            line(
                "current value",
                format!("{} {}", opt(self.currvalue()), self.cv_currency().unwrap_or_default()),
            );
            line("quantity", opt(self.quantity()));
            line("acquired on", opt(self.acquired_on()));
            line("acquired from", opt(self.acquired_from()));
            line("location", opt(self.location()));
        }
        out
    }
}

impl fmt::Display for CollectionBoardGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id, self.name)?;
        if let Some(year) = self.year {
            write!(f, " ({year})")?;
        }
        if let Some(rank) = self.bgg_rank() {
            write!(f, ", rank {rank}")?;
        }
        write!(f, ", {} plays", self.numplays)
    }
}
