//! Bounded cache of open output file handles.
//!
//! Routing a day of flight data fans out into one file per callsign, which
//! can mean thousands of destinations per run. [`FileCache`] keeps at most
//! `limit` handles resident and reclaims the least recently used ones in
//! batches once the bound is reached. Evicting an entry closes its handle;
//! the file stays on disk and is reopened in append mode the next time a
//! row routes to it, so earlier writes survive.

use crate::types::Result;
use log::{debug, info};
use std::collections::{BTreeMap, HashSet};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

/// Default maximum number of resident handles.
pub const DEFAULT_FILE_LIMIT: usize = 1000;

/// Default extra headroom reclaimed per trim pass.
pub const DEFAULT_TRIM_SIZE: usize = 100;

/// How the cache opens a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Create the file, discarding any previous content.
    Truncate,
    /// Create the file if missing, append to existing content.
    Append,
}

impl OpenMode {
    fn options(self) -> OpenOptions {
        let mut opts = OpenOptions::new();
        match self {
            OpenMode::Truncate => {
                opts.write(true).create(true).truncate(true);
            }
            OpenMode::Append => {
                opts.append(true).create(true);
            }
        }
        opts
    }
}

#[derive(Debug)]
struct Entry {
    last_used: u64,
    handle: File,
}

/// Bounded map from output path to an open, appendable file handle.
///
/// Recency is tracked with a logical clock bumped on every access rather
/// than wall time, so eviction order is deterministic. One instance is
/// shared across all databases of a run; the set of paths it has ever
/// opened decides whether an open truncates (first time) or appends.
#[derive(Debug)]
pub struct FileCache {
    limit: usize,
    trim_size: usize,
    create_mode: OpenMode,
    reopen_mode: OpenMode,
    clock: u64,
    resident: BTreeMap<PathBuf, Entry>,
    seen: HashSet<PathBuf>,
}

impl Default for FileCache {
    fn default() -> Self {
        Self::new(DEFAULT_FILE_LIMIT, DEFAULT_TRIM_SIZE)
    }
}

impl FileCache {
    /// Create a cache holding at most `limit` open handles, reclaiming
    /// `trim_size` extra entries per trim pass.
    pub fn new(limit: usize, trim_size: usize) -> Self {
        Self {
            limit,
            trim_size,
            create_mode: OpenMode::Truncate,
            reopen_mode: OpenMode::Append,
            clock: 0,
            resident: BTreeMap::new(),
            seen: HashSet::new(),
        }
    }

    /// Set the mode used the first time a path is opened.
    pub fn with_create_mode(mut self, mode: OpenMode) -> Self {
        self.create_mode = mode;
        self
    }

    /// Set the mode used when a previously seen path is opened again.
    pub fn with_reopen_mode(mut self, mode: OpenMode) -> Self {
        self.reopen_mode = mode;
        self
    }

    /// Get the handle for `path`, opening it if it is not resident.
    ///
    /// A hit refreshes the entry's recency so busy files stay resident.
    pub fn get(&mut self, path: &Path) -> Result<&mut File> {
        if !self.resident.contains_key(path) {
            return self.open(path);
        }
        self.clock += 1;
        let entry = self
            .resident
            .get_mut(path)
            .expect("residency checked above");
        entry.last_used = self.clock;
        Ok(&mut entry.handle)
    }

    /// Open `path` and make it resident, trimming first to make room.
    ///
    /// Missing parent directories are created. The first open of a path
    /// uses the create mode (truncate by default); any later open uses the
    /// reopen mode (append by default).
    pub fn open(&mut self, path: &Path) -> Result<&mut File> {
        self.trim();

        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                info!("mkdir {}", dir.display());
                fs::create_dir_all(dir)?;
            }
        }

        let handle = if self.seen.contains(path) {
            info!("reopening {}", path.display());
            self.reopen_mode.options().open(path)?
        } else {
            self.seen.insert(path.to_path_buf());
            debug!("opening {}", path.display());
            self.create_mode.options().open(path)?
        };

        self.clock += 1;
        self.resident.insert(
            path.to_path_buf(),
            Entry {
                last_used: self.clock,
                handle,
            },
        );
        let entry = self
            .resident
            .get_mut(path)
            .expect("entry inserted above");
        Ok(&mut entry.handle)
    }

    /// Evict the least recently used entries once the bound is reached.
    ///
    /// Removes enough entries to leave `trim_size` headroom below `limit`.
    pub fn trim(&mut self) {
        if self.resident.len() < self.limit {
            return;
        }

        let trim_count = (self.resident.len() - self.limit + self.trim_size)
            .min(self.resident.len());
        let mut by_age: Vec<(u64, PathBuf)> = self
            .resident
            .iter()
            .map(|(path, entry)| (entry.last_used, path.clone()))
            .collect();
        by_age.sort();

        info!("trimming {} of {} open handles", trim_count, by_age.len());
        for (_, path) in by_age.into_iter().take(trim_count) {
            self.resident.remove(&path);
        }
    }

    /// Whether `path` currently has an open handle in the cache.
    pub fn is_resident(&self, path: &Path) -> bool {
        self.resident.contains_key(path)
    }

    /// Number of handles currently resident.
    pub fn resident_count(&self) -> usize {
        self.resident.len()
    }

    /// Number of distinct paths opened over the cache lifetime.
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }
}
