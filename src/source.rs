//! Local data source for raw collection responses.
//!
//! Responses are stored as `<user>.json` in the data directory, in the shape
//! the service returns after deserialization.

use crate::collection::Collection;
use crate::error::{Error, Result};
use crate::game::CollectionOptions;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub fn get_data_dir() -> anyhow::Result<PathBuf> {
    let project_dirs = directories::ProjectDirs::from("com", "boardgamegeek", "bgg-collection")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = project_dirs.data_dir().to_path_buf();
    fs::create_dir_all(&data_dir)?;
    Ok(data_dir)
}

pub fn load_raw(path: &Path) -> Result<Value> {
    let file = fs::File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = io::BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

/// Path of the stored response for `user`.
pub fn user_collection_path(data_dir: &Path, user: &str) -> PathBuf {
    data_dir.join(format!("{}.json", user.trim()))
}

/// The message of the service's error envelope, if `raw` is one.
fn error_message(raw: &Value) -> Option<&str> {
    let errors = raw.get("errors")?;
    let first = match errors {
        Value::Array(errors) => errors.first()?,
        other => other,
    };
    let message = first.get("message").or_else(|| first.get("error"))?;
    match message {
        Value::Object(nested) => nested.get("value").and_then(Value::as_str),
        other => other.as_str(),
    }
}

/// Loads and maps the stored collection of `user`.
///
/// A collection without an `owner` is attributed to `user`.
pub fn load_user_collection(
    user: &str,
    data_dir: &Path,
    options: CollectionOptions,
) -> Result<Collection> {
    let user = user.trim();
    if user.is_empty() {
        return Err(Error::InvalidValue {
            reason: "user name must not be empty".to_string(),
        });
    }

    let path = user_collection_path(data_dir, user);
    let raw = match load_raw(&path) {
        Err(Error::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            return Err(Error::ItemNotFound {
                what: format!("collection of user '{user}'"),
            });
        }
        other => other?,
    };

    if let Some(message) = error_message(&raw) {
        log::debug!("Service reported an error for '{user}': {message}");
        return Err(Error::ItemNotFound {
            what: format!("collection of user '{user}' ({message})"),
        });
    }

    let mut collection = Collection::from_value_with_options(&raw, options)?;
    if collection.owner().is_empty() {
        collection.set_owner(user);
    }
    Ok(collection)
}
