//! Memtable + SSTable storage engine.

use crate::store::types::Entry;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Memtable entry count that triggers a flush to disk.
pub const FLUSH_THRESHOLD: usize = 1000;

const SSTABLE_EXT: &str = "sst";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Single-node key-value engine with versioned last-writer-wins writes.
///
/// One reader-writer lock guards the memtable: `put` and the flush it may
/// trigger are exclusive, `get` takes a shared lock only for the memtable
/// probe. SSTable files are immutable once named, so file reads need no
/// locking at all.
pub struct Store {
    memtable: RwLock<HashMap<String, Entry>>,
    dir: PathBuf,
    flush_threshold: usize,
}

impl Store {
    /// Opens (or creates) a store writing SSTables into `dir`.
    pub fn new(dir: impl Into<PathBuf>, flush_threshold: usize) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Store {
            memtable: RwLock::new(HashMap::new()),
            dir,
            flush_threshold,
        })
    }

    /// Stores `entry` if its version strictly beats the current memtable
    /// version for the key. Returns whether the entry was stored.
    ///
    /// Reaching the flush threshold triggers a flush before returning; a
    /// failed flush is logged and the memtable kept so the next trigger
    /// retries. The write itself still counts as stored.
    pub fn put(&self, entry: Entry) -> bool {
        let mut memtable = self.memtable.write();

        if let Some(existing) = memtable.get(&entry.key) {
            if entry.version <= existing.version {
                return false;
            }
        }

        memtable.insert(entry.key.clone(), entry);

        if memtable.len() >= self.flush_threshold {
            if let Err(e) = Self::flush(&self.dir, &mut memtable) {
                tracing::warn!("SSTable flush failed, keeping memtable: {}", e);
            }
        }

        true
    }

    /// Retrieves the entry for `key` from the memtable, falling back to
    /// SSTables newest-first.
    ///
    /// Later flushes always contain later writes, so the first file hit is
    /// the freshest stored version; no cross-file version comparison is done.
    pub fn get(&self, key: &str) -> Option<Entry> {
        {
            let memtable = self.memtable.read();
            if let Some(entry) = memtable.get(key) {
                return Some(entry.clone());
            }
        }

        for path in self.sstable_paths_newest_first() {
            if let Some(entry) = Self::read_sstable(&path, key) {
                return Some(entry);
            }
        }

        None
    }

    /// Number of live entries in the memtable.
    pub fn memtable_len(&self) -> usize {
        self.memtable.read().len()
    }

    /// Number of SSTable files on disk.
    pub fn sstable_count(&self) -> usize {
        self.sstable_paths_newest_first().len()
    }

    /// Writes the memtable as a new SSTable, then clears it.
    ///
    /// Entries are sorted by key and written one JSON object per line to a
    /// file named by the current nanosecond timestamp. The memtable is only
    /// cleared after every write succeeded.
    fn flush(dir: &Path, memtable: &mut HashMap<String, Entry>) -> Result<(), StoreError> {
        if memtable.is_empty() {
            return Ok(());
        }

        let mut snapshot: Vec<&Entry> = memtable.values().collect();
        snapshot.sort_by(|a, b| a.key.cmp(&b.key));

        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        let path = dir.join(format!("{}.{}", ts, SSTABLE_EXT));

        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);
        for entry in snapshot {
            serde_json::to_writer(&mut writer, entry)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;

        tracing::debug!("flushed {} entries to {:?}", memtable.len(), path);
        memtable.clear();

        Ok(())
    }

    /// SSTable paths sorted by their timestamp stem, newest first.
    ///
    /// The filename is the ordering key: stems are compared numerically so
    /// ordering holds even if stem widths differ.
    fn sstable_paths_newest_first(&self) -> Vec<PathBuf> {
        let Ok(dir) = std::fs::read_dir(&self.dir) else {
            return Vec::new();
        };

        let mut tables: Vec<(u64, PathBuf)> = dir
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().and_then(|s| s.to_str()) == Some(SSTABLE_EXT))
            .filter_map(|p| {
                let ts = p.file_stem()?.to_str()?.parse::<u64>().ok()?;
                Some((ts, p))
            })
            .collect();

        tables.sort_by(|a, b| b.0.cmp(&a.0));
        tables.into_iter().map(|(_, p)| p).collect()
    }

    /// Scans one SSTable for `key`. Any read or parse problem is treated as
    /// "not in this file" so a damaged table degrades to a miss.
    fn read_sstable(path: &Path, key: &str) -> Option<Entry> {
        let file = File::open(path).ok()?;
        let reader = BufReader::new(file);

        for line in reader.lines() {
            let Ok(line) = line else {
                return None;
            };
            match serde_json::from_str::<Entry>(&line) {
                Ok(entry) if entry.key == key => return Some(entry),
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!("skipping corrupt SSTable line in {:?}: {}", path, e);
                }
            }
        }

        None
    }
}
