//! Published editions of a game, present only when version expansion was
//! requested from the service.

use crate::raw::{self, RawMap};
use log::warn;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardGameVersion {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "yearpublished", skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(rename = "productcode", skip_serializing_if = "Option::is_none")]
    pub product_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl BoardGameVersion {
    /// Maps a raw `version` block.
    ///
    /// A block without a usable `id` is dropped rather than failing the
    /// entry that carries it.
    pub(crate) fn from_map(map: &RawMap) -> Option<Self> {
        // The XML conversion wraps the version record in an `item` key
        let map = raw::map_field(map, "item").unwrap_or(map);
        let id = match raw::require_id(map, "id") {
            Ok(id) => id,
            Err(err) => {
                warn!("Dropping version block: {err}");
                return None;
            }
        };
        Some(Self {
            id,
            name: raw::require_name(map, "name").ok(),
            year: raw::int_field(map, "yearpublished"),
            language: raw::str_field(map, "language"),
            publisher: raw::str_field(map, "publisher"),
            artist: raw::str_field(map, "artist"),
            product_code: raw::str_field(map, "productcode"),
            width: raw::float_field(map, "width"),
            length: raw::float_field(map, "length"),
            depth: raw::float_field(map, "depth"),
            weight: raw::float_field(map, "weight"),
            image: raw::str_field(map, "image"),
            thumbnail: raw::str_field(map, "thumbnail"),
        })
    }
}
