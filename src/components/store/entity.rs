use serde::{de::DeserializeOwned, Serialize};

/// A record type that can live in a [`FileStore`](super::file_store::FileStore).
///
/// Keys are numeric and unique within a collection. Key 0 is reserved to mean
/// "not yet stored"; the store assigns the real key on add.
pub trait Entity: Serialize + DeserializeOwned + Clone {
    /// File stem of the collection on disk, e.g. `teachers` -> `teachers.db`.
    const COLLECTION: &'static str;

    fn key(&self) -> u64;

    fn set_key(&mut self, key: u64);
}
