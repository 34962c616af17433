//! Private ownership metadata, visible only to the collection owner.

use crate::raw::{self, RawMap};
use serde::Serialize;
use serde_json::Value;

/// Ownership details attached to a collection entry.
///
/// Every field is optional. Construction never fails: a malformed value is
/// dropped on its own without affecting the other fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PrivateInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currvalue: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cv_currency: Option<String>,
    /// Kept verbatim, the service is not consistent about its encoding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acquired_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acquired_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Returns the first usable value among `keys`, so the XML attribute names of
/// the service are understood next to the short ones.
fn first_of<T>(
    map: &RawMap,
    keys: &[&str],
    read: impl Fn(&RawMap, &str) -> Option<T>,
) -> Option<T> {
    keys.iter().find_map(|key| read(map, *key))
}

impl PrivateInfo {
    /// Maps a raw `private` block. Anything but a mapping yields empty info.
    pub fn from_value(value: &Value) -> Self {
        value.as_object().map(Self::from_map).unwrap_or_default()
    }

    pub(crate) fn from_map(map: &RawMap) -> Self {
        Self {
            comment: first_of(map, &["comment", "privatecomment"], raw::str_field),
            paid: first_of(map, &["paid", "pricepaid"], raw::float_field),
            currency: first_of(map, &["currency", "pp_currency"], raw::str_field),
            currvalue: first_of(map, &["currvalue"], raw::float_field),
            cv_currency: first_of(map, &["cv_currency"], raw::str_field),
            quantity: first_of(map, &["quantity"], raw::str_field),
            acquired_on: first_of(map, &["acquired_on", "acquisitiondate"], raw::str_field),
            acquired_from: first_of(map, &["acquired_from", "acquiredfrom"], raw::str_field),
            location: first_of(map, &["location", "inventorylocation"], raw::str_field),
        }
    }
}
