//! The ordered collection of a user's games.

use crate::error::{DataError, Error, Result};
use crate::game::{CollectionBoardGame, CollectionOptions};
use crate::raw;
use log::debug;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::ops::Index;

/// A user's collection, in the order the service listed it.
///
/// Entries only enter through [`Collection::from_value`] or
/// [`Collection::add_game`], both of which validate every entry first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Collection {
    owner: String,
    items: Vec<CollectionBoardGame>,
}

impl Collection {
    /// An empty collection belonging to `owner`.
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            items: Vec::new(),
        }
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        Self::from_value_with_options(value, CollectionOptions::default())
    }

    /// Builds a collection from a raw response body.
    ///
    /// Fails as a whole if any item is rejected; the error names the index of
    /// the first offending item.
    pub fn from_value_with_options(value: &Value, options: CollectionOptions) -> Result<Self> {
        let map = raw::as_mapping(value)?;
        let owner = raw::str_field(map, "owner").unwrap_or_default();
        let raw_items = match map.get("items") {
            None | Some(Value::Null) => &[][..],
            Some(Value::Array(items)) => items.as_slice(),
            // A single item may arrive unwrapped
            Some(item @ Value::Object(_)) => std::slice::from_ref(item),
            Some(other) => {
                return Err(DataError::NotASequence {
                    field: "items",
                    found: raw::kind_of(other),
                }
                .into());
            }
        };
        let items = raw_items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                CollectionBoardGame::from_value_with_options(item, options)
                    .map_err(|source| Error::InvalidItem { index, source })
            })
            .collect::<Result<Vec<_>>>()?;
        debug!("Built collection of '{owner}' with {} items", items.len());
        Ok(Self { owner, items })
    }

    /// Validates a raw item and appends it. On failure the collection is left
    /// untouched.
    pub fn add_game(&mut self, value: &Value) -> Result<&CollectionBoardGame> {
        self.add_game_with_options(value, CollectionOptions::default())
    }

    pub fn add_game_with_options(
        &mut self,
        value: &Value,
        options: CollectionOptions,
    ) -> Result<&CollectionBoardGame> {
        let game = CollectionBoardGame::from_value_with_options(value, options)?;
        self.items.push(game);
        Ok(&self.items[self.items.len() - 1])
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub(crate) fn set_owner(&mut self, owner: impl Into<String>) {
        self.owner = owner.into();
    }

    pub fn items(&self) -> &[CollectionBoardGame] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CollectionBoardGame> {
        self.items.get(index)
    }

    /// The first entry for game `id`. A game may be listed more than once,
    /// e.g. for different versions.
    pub fn find(&self, id: i64) -> Option<&CollectionBoardGame> {
        self.items.iter().find(|game| game.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CollectionBoardGame> {
        self.items.iter()
    }

    /// Plain nested data in the shape accepted by [`Collection::from_value`].
    pub fn to_plain_data(&self) -> Value {
        // Only plain structs, maps and strings are serialized here
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl Index<usize> for Collection {
    type Output = CollectionBoardGame;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a CollectionBoardGame;
    type IntoIter = std::slice::Iter<'a, CollectionBoardGame>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let owner = if self.owner.is_empty() {
            "unknown owner"
        } else {
            &self.owner
        };
        let count = self.items.len();
        let noun = if count == 1 { "item" } else { "items" };
        write!(f, "Collection of {owner} ({count} {noun})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_data() -> Value {
        json!({
            "owner": "me",
            "items": [{
                "id": 100,
                "name": "foobar",
                "image": "",
                "thumbnail": "",
                "yearpublished": 1900,
                "numplays": 32,
                "comment": "This game is great!",
                "minplayers": 1,
                "maxplayers": 5,
                "minplaytime": 60,
                "maxplaytime": 120,
                "playingtime": 100,
                "stats": {
                    "usersrated": 123,
                    "ranks": [{
                        "id": "1",
                        "type": "subtype",
                        "name": "boardgame",
                        "friendlyname": "friendly",
                        "value": "10",
                        "bayesaverage": "0.51"
                    }]
                },
                "private": {
                    "comment": "private comment",
                    "paid": 42.0,
                    "currency": "USD",
                    "currvalue": 23.0,
                    "cv_currency": "EUR",
                    "quantity": "1",
                    "acquired_on": "2000-01-01",
                    "acquired_from": "store",
                    "location": "home"
                }
            }]
        })
    }

    #[test]
    fn test_invalid_item_rejects_collection() {
        let err = Collection::from_value(&json!({"items": [{"id": 102}]})).unwrap_err();
        assert!(err.is_invalid_data());
        assert!(matches!(
            err,
            Error::InvalidItem {
                index: 0,
                source: DataError::MissingField { field: "name" }
            }
        ));
    }

    #[test]
    fn test_any_integer_id_is_accepted() {
        let c = Collection::from_value(&json!({
            "items": [
                {"id": 1, "name": "a"},
                {"id": "0", "name": "b"},
                {"id": -5, "name": "c"}
            ]
        }))
        .unwrap();
        let ids: Vec<i64> = c.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![1, 0, -5]);
    }

    #[test]
    fn test_error_names_offending_item() {
        let err = Collection::from_value(&json!({
            "items": [
                {"id": 1, "name": "one"},
                {"id": 2, "name": "two"},
                {"name": "three"}
            ]
        }))
        .unwrap_err();
        assert!(matches!(err, Error::InvalidItem { index: 2, .. }));
    }

    #[test]
    fn test_collection_from_raw_data() {
        let c = Collection::from_value(&sample_data()).unwrap();

        assert_eq!(c.len(), 1);
        assert_eq!(c.owner(), "me");

        let ci = &c[0];
        assert_eq!(ci.id, 100);
        assert_eq!(ci.name, "foobar");
        assert_eq!(ci.year, Some(1900));
        assert_eq!(ci.numplays, 32);
        assert_eq!(ci.comment.as_deref(), Some("This game is great!"));
        assert_eq!(ci.min_players, 1);
        assert_eq!(ci.max_players, 5);
        assert_eq!(ci.min_playing_time, 60);
        assert_eq!(ci.max_playing_time, 120);
        assert_eq!(ci.playing_time, 100);
        assert_eq!(ci.bgg_rank(), Some(10));
        assert_eq!(ci.users_rated(), 123);
        assert_eq!(ci.rating_bayes_average(), None);
        assert_eq!(ci.version, None);
        assert!(ci.private.is_some());
        assert_eq!(ci.private_comment(), Some("private comment"));
        assert_eq!(ci.paid(), Some(42.0));
        assert_eq!(ci.currency(), Some("USD"));
        assert_eq!(ci.currvalue(), Some(23.0));
        assert_eq!(ci.cv_currency(), Some("EUR"));
        assert_eq!(ci.quantity(), Some("1"));
        assert_eq!(ci.acquired_on(), Some("2000-01-01"));
        assert_eq!(ci.acquired_from(), Some("store"));
        assert_eq!(ci.location(), Some("home"));
    }

    #[test]
    fn test_add_game_rejects_without_mutation() {
        let mut c = Collection::from_value(&sample_data()).unwrap();
        let before = c.clone();

        let err = c.add_game(&json!({"bla": "bla"})).unwrap_err();
        assert!(err.is_invalid_data());
        assert_eq!(c, before);

        assert!(c.add_game(&json!({"id": 7, "name": ""})).is_err());
        assert!(c.add_game(&json!(["id", 7])).is_err());
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_add_game_appends_in_order() {
        let mut c = Collection::new("someone");
        assert!(c.is_empty());

        let added = c.add_game(&json!({"id": 2, "name": "second"})).unwrap();
        assert_eq!(added.name, "second");
        c.add_game(&json!({"id": 1, "name": "first"})).unwrap();

        let ids: Vec<i64> = c.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(c.len(), 2);
        assert_eq!(c.get(2), None);
    }

    #[test]
    fn test_iteration_is_restartable() {
        let c = Collection::from_value(&json!({
            "owner": "me",
            "items": [
                {"id": 3, "name": "c"},
                {"id": 1, "name": "a"},
                {"id": 2, "name": "b"}
            ]
        }))
        .unwrap();

        let first: Vec<&str> = (&c).into_iter().map(|g| g.name.as_str()).collect();
        let mut second = Vec::new();
        for g in &c {
            second.push(g.name.as_str());
        }
        assert_eq!(first, vec!["c", "a", "b"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_items_shapes() {
        let empty = Collection::from_value(&json!({"owner": "me"})).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.owner(), "me");

        let nulled = Collection::from_value(&json!({"items": null})).unwrap();
        assert!(nulled.is_empty());
        assert_eq!(nulled.owner(), "");

        let single = Collection::from_value(&json!({"items": {"id": 9, "name": "nine"}})).unwrap();
        assert_eq!(single.len(), 1);

        let err = Collection::from_value(&json!({"items": "nope"})).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidData(DataError::NotASequence { field: "items", .. })
        ));

        let err = Collection::from_value(&json!([])).unwrap_err();
        assert!(matches!(err, Error::InvalidData(DataError::NotAMapping { .. })));
    }

    #[test]
    fn test_versions_can_be_ignored() {
        let raw = json!({
            "items": [
                {"id": 1, "name": "a", "version": {"id": 10}},
                {"id": 2, "name": "b"}
            ]
        });

        let with_versions = Collection::from_value(&raw).unwrap();
        assert!(with_versions[0].version.is_some());
        assert!(with_versions[1].version.is_none());

        let options = CollectionOptions {
            ignore_versions: true,
        };
        let without = Collection::from_value_with_options(&raw, options).unwrap();
        assert!(without.iter().all(|g| g.version.is_none()));
    }

    #[test]
    fn test_find_returns_first_match() {
        let c = Collection::from_value(&json!({
            "items": [
                {"id": 5, "name": "five", "numplays": 1},
                {"id": 5, "name": "five", "numplays": 2}
            ]
        }))
        .unwrap();
        assert_eq!(c.find(5).map(|g| g.numplays), Some(1));
        assert!(c.find(6).is_none());
    }

    #[test]
    fn test_plain_data_shape() {
        let c = Collection::from_value(&sample_data()).unwrap();
        let data = c.to_plain_data();

        assert_eq!(data["owner"], "me");
        let item = &data["items"][0];
        assert_eq!(item["id"], 100);
        assert_eq!(item["name"], "foobar");
        assert_eq!(item["yearpublished"], 1900);
        assert_eq!(item["minplaytime"], 60);
        assert_eq!(item["stats"]["usersrated"], 123);
        assert_eq!(item["stats"]["ranks"][0]["value"], "10");
        assert_eq!(item["private"]["quantity"], "1");
        assert_eq!(item["private"]["paid"], 42.0);
        assert!(item.get("version").is_none());
    }

    #[test]
    fn test_plain_data_rebuilds_same_collection() {
        let mut raw = sample_data();
        raw["items"][0]["status"] = json!({"own": "1", "wishlistpriority": "3"});
        raw["items"][0]["version"] = json!({"id": 42, "name": "Second edition"});
        let c = Collection::from_value(&raw).unwrap();

        let rebuilt = Collection::from_value(&c.to_plain_data()).unwrap();
        assert_eq!(rebuilt, c);
    }

    #[test]
    fn test_display() {
        let c = Collection::from_value(&sample_data()).unwrap();
        assert_eq!(c.to_string(), "Collection of me (1 item)");
        assert_eq!(
            Collection::default().to_string(),
            "Collection of unknown owner (0 items)"
        );
    }
}
