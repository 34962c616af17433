//! bgg-collection library: typed, validated mapping of raw BoardGameGeek
//! collection responses.
//!
//! Raw data arrives as already deserialized [`serde_json::Value`] trees.
//! Items missing their identity (`id`, `name`) reject the whole collection;
//! every other field degrades to a default when absent or malformed.

pub mod collection;
pub mod error;
pub mod game;
pub mod private;
mod raw;
pub mod source;
pub mod stats;
pub mod version;

pub use collection::Collection;
pub use error::{DataError, Error, Result};
pub use game::{CollectionBoardGame, CollectionOptions, CollectionStatus};
pub use private::PrivateInfo;
pub use stats::{GameStats, RankRecord};
pub use version::BoardGameVersion;
