use std::{
    collections::BTreeMap,
    fs,
    marker::PhantomData,
    path::{Path, PathBuf},
};

use sha2::{Digest, Sha256};

use super::{entity::Entity, error::StoreError};

/// Flat-file record store: one collection per file, the whole file re-read
/// and re-written on every operation. O(n) everywhere, which is fine for the
/// record counts this system handles.
///
/// The on-disk image is an 8-byte SHA-256 prefix followed by the
/// bincode-encoded key map. The prefix is verified on every load so a
/// truncated or garbled file surfaces as [`StoreError::Corrupt`] instead of
/// deserializing garbage.
///
/// Not safe for concurrent writers; callers serialize access externally.
#[derive(Debug)]
pub struct FileStore<T: Entity> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

const CHECKSUM_LEN: usize = 8;

impl<T: Entity> FileStore<T> {
    /// Opens (and creates if needed) the collection file under `data_dir`.
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        fs::create_dir_all(&data_dir)?;
        let path = data_dir.as_ref().join(format!("{}.db", T::COLLECTION));
        log::debug!("opened collection '{}' at {:?}", T::COLLECTION, path);
        Ok(FileStore {
            path,
            _marker: PhantomData,
        })
    }

    /// Full snapshot of the collection in key order.
    pub fn get_all(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.load()?.into_values().collect())
    }

    pub fn get(&self, key: u64) -> Result<Option<T>, StoreError> {
        Ok(self.load()?.remove(&key))
    }

    /// Inserts a record. A record carrying key 0 gets the next free key
    /// assigned; a caller-supplied key that is already present fails with
    /// [`StoreError::DuplicateKey`]. Returns the record as stored.
    pub fn add(&self, mut record: T) -> Result<T, StoreError> {
        let mut records = self.load()?;

        if record.key() == 0 {
            let next = records.keys().next_back().map_or(1, |last| last + 1);
            record.set_key(next);
        } else if records.contains_key(&record.key()) {
            return Err(StoreError::DuplicateKey(record.key()));
        }

        records.insert(record.key(), record.clone());
        self.save(&records)?;
        log::info!("added record {} to '{}'", record.key(), T::COLLECTION);
        Ok(record)
    }

    /// Replaces the stored record with the same key.
    pub fn update(&self, record: T) -> Result<(), StoreError> {
        let mut records = self.load()?;

        if !records.contains_key(&record.key()) {
            return Err(StoreError::NotFound(record.key()));
        }

        let key = record.key();
        records.insert(key, record);
        self.save(&records)?;
        log::info!("updated record {} in '{}'", key, T::COLLECTION);
        Ok(())
    }

    /// Removes and returns the record under `key`.
    pub fn delete_by_key(&self, key: u64) -> Result<T, StoreError> {
        let mut records = self.load()?;

        let removed = records.remove(&key).ok_or(StoreError::NotFound(key))?;
        self.save(&records)?;
        log::info!("deleted record {} from '{}'", key, T::COLLECTION);
        Ok(removed)
    }

    fn load(&self) -> Result<BTreeMap<u64, T>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let bytes = fs::read(&self.path)?;
        if bytes.len() < CHECKSUM_LEN {
            return Err(StoreError::Corrupt(format!(
                "file shorter than checksum prefix ({} bytes)",
                bytes.len()
            )));
        }

        let (prefix, payload) = bytes.split_at(CHECKSUM_LEN);
        let expected = u64::from_be_bytes(prefix.try_into().unwrap());
        let actual = checksum(payload);
        if expected != actual {
            return Err(StoreError::Corrupt(format!(
                "checksum mismatch (expected {}, got {})",
                expected, actual
            )));
        }

        Ok(bincode::deserialize(payload)?)
    }

    fn save(&self, records: &BTreeMap<u64, T>) -> Result<(), StoreError> {
        let payload = bincode::serialize(records)?;
        let mut bytes = checksum(&payload).to_be_bytes().to_vec();
        bytes.extend_from_slice(&payload);
        fs::write(&self.path, bytes)?;
        Ok(())
    }
}

fn checksum(payload: &[u8]) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(payload);
    u64::from_be_bytes(hasher.finalize()[..CHECKSUM_LEN].try_into().unwrap())
}
