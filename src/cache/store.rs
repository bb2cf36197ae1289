//! Checksum cache backed by a ledger file
//!
//! The ledger on disk is the source of truth. Every query and update
//! re-reads it before acting, so two caches pointed at the same ledger and
//! used one after the other always see each other's writes.
//!
//! There is no locking: two processes updating the same ledger at the same
//! time can lose one of the updates (the last rewrite wins).

use crate::cache::checksum::calc_checksum;
use crate::cache::ledger::{is_representable, LedgerLine, DEFAULT_LEDGER_FILE_NAME};
use crate::cache::observer::{CacheObserver, MissReason, TracingObserver};
use crate::cache::path::{cache_key, clean_path};
use crate::error::{ArtefactorError, ArtefactorResult};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// A file recorded in the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheEntry {
    /// Absolute, cleaned path of the tracked file
    pub path: PathBuf,
    /// Base name as written in the ledger
    pub file_name: String,
    /// SHA256 hex digest
    pub checksum: String,
}

impl CacheEntry {
    fn ledger_line(&self) -> LedgerLine {
        LedgerLine::new(&self.checksum, &self.file_name)
    }
}

/// Outcome of a cache lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// File exists and its entry matches
    Hit,
    /// File is not on disk, whatever the ledger says
    FileMissing,
    /// File exists but the ledger has no entry for it
    Untracked,
    /// File exists but the recorded checksum differs from the expected one
    Mismatch,
}

impl CacheStatus {
    /// Whether the lookup hit
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit)
    }

    /// The miss reason, if this was a miss
    pub fn miss_reason(&self) -> Option<MissReason> {
        match self {
            Self::Hit => None,
            Self::FileMissing => Some(MissReason::FileMissing),
            Self::Untracked => Some(MissReason::Untracked),
            Self::Mismatch => Some(MissReason::ChecksumMismatch),
        }
    }
}

/// In-memory view of one directory's checksum ledger
pub struct ChecksumCache {
    entries: BTreeMap<PathBuf, CacheEntry>,
    dir: PathBuf,
    ledger_path: PathBuf,
    observer: Arc<dyn CacheObserver>,
}

impl ChecksumCache {
    /// Open the default ledger in `dir`. Fails if the ledger does not exist.
    pub fn from_dir(dir: &Path) -> ArtefactorResult<Self> {
        Self::from_dir_named(dir, DEFAULT_LEDGER_FILE_NAME, true)
    }

    /// Open a ledger with a custom file name in `dir`
    pub fn from_dir_named(
        dir: &Path,
        ledger_file_name: &str,
        err_if_missing: bool,
    ) -> ArtefactorResult<Self> {
        Self::from_checksums_file(&dir.join(ledger_file_name), err_if_missing)
    }

    /// Open a specific ledger file.
    ///
    /// With `err_if_missing` unset a missing ledger gives an empty cache,
    /// and the file is created on the first update.
    pub fn from_checksums_file(file: &Path, err_if_missing: bool) -> ArtefactorResult<Self> {
        let ledger_path = cache_key(file)?;
        let dir = match (ledger_path.parent(), ledger_path.file_name()) {
            (Some(dir), Some(_)) => dir.to_path_buf(),
            _ => {
                return Err(ArtefactorError::path_invalid(
                    &ledger_path,
                    "checksum file must be a file inside a directory",
                ))
            }
        };

        if err_if_missing {
            match fs::metadata(&ledger_path) {
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Err(ArtefactorError::LedgerNotFound(ledger_path));
                }
                Err(e) => {
                    return Err(ArtefactorError::io(
                        format!("checking checksum file {}", ledger_path.display()),
                        e,
                    ));
                }
            }
        }

        let mut cache = Self {
            entries: BTreeMap::new(),
            dir,
            ledger_path,
            observer: Arc::new(TracingObserver),
        };
        cache.refresh()?;
        Ok(cache)
    }

    /// Open the default ledger next to `file`, tolerating a missing ledger.
    ///
    /// With `create` set, `file` is hashed and recorded straight away.
    pub fn from_existing_file(file: &Path, create: bool) -> ArtefactorResult<Self> {
        Self::from_existing_file_named(file, DEFAULT_LEDGER_FILE_NAME, create)
    }

    /// Like [`from_existing_file`](Self::from_existing_file) with a custom ledger name
    pub fn from_existing_file_named(
        file: &Path,
        ledger_file_name: &str,
        create: bool,
    ) -> ArtefactorResult<Self> {
        let key = cache_key(file)?;
        let dir = key.parent().ok_or_else(|| {
            ArtefactorError::path_invalid(&key, "file has no containing directory")
        })?;

        let mut cache = Self::from_dir_named(dir, ledger_file_name, false)?;
        if create {
            cache.update(&key)?;
        }
        Ok(cache)
    }

    /// Replace the event observer. Applies to events from the next call on.
    pub fn with_observer(mut self, observer: Arc<dyn CacheObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Re-read the ledger from disk, replacing the in-memory entries.
    ///
    /// A missing ledger leaves the cache empty. Lines that are not exactly
    /// `<checksum> <file name>` are reported to the observer and skipped.
    pub fn refresh(&mut self) -> ArtefactorResult<()> {
        let file = match File::open(&self.ledger_path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.observer.ledger_missing(&self.ledger_path);
                self.entries.clear();
                return Ok(());
            }
            Err(e) => {
                return Err(ArtefactorError::io(
                    format!("opening checksum file {}", self.ledger_path.display()),
                    e,
                ));
            }
        };

        let mut entries = BTreeMap::new();
        for (index, line) in BufReader::new(file).split(b'\n').enumerate() {
            let line = line.map_err(|e| {
                ArtefactorError::io(
                    format!("reading checksum file {}", self.ledger_path.display()),
                    e,
                )
            })?;

            match std::str::from_utf8(&line).ok().and_then(LedgerLine::parse) {
                Some(parsed) => {
                    let entry = self.entry_from_line(parsed);
                    entries.insert(entry.path.clone(), entry);
                }
                None => self.observer.malformed_line(
                    &self.ledger_path,
                    index + 1,
                    &String::from_utf8_lossy(&line),
                ),
            }
        }

        debug!(
            "Read {} entries from {}",
            entries.len(),
            self.ledger_path.display()
        );
        self.entries = entries;
        Ok(())
    }

    /// Look up a file, optionally requiring a specific checksum
    pub fn status(&mut self, path: &Path, expected: Option<&str>) -> ArtefactorResult<CacheStatus> {
        let key = cache_key(path)?;

        let status = if !key.exists() {
            CacheStatus::FileMissing
        } else {
            self.refresh()?;
            match self.entries.get(&key) {
                None => CacheStatus::Untracked,
                Some(entry) => match expected {
                    Some(checksum) if entry.checksum != checksum => CacheStatus::Mismatch,
                    _ => CacheStatus::Hit,
                },
            }
        };

        match status.miss_reason() {
            None => self.observer.cache_hit(&key),
            Some(reason) => self.observer.cache_miss(&key, reason),
        }
        Ok(status)
    }

    /// Whether `path` exists on disk and has a ledger entry
    pub fn is_cached(&mut self, path: &Path) -> ArtefactorResult<bool> {
        Ok(self.status(path, None)?.is_hit())
    }

    /// Whether `path` exists on disk and its entry holds exactly `checksum`
    pub fn is_cached_matched(&mut self, path: &Path, checksum: &str) -> ArtefactorResult<bool> {
        Ok(self.status(path, Some(checksum))?.is_hit())
    }

    /// Hash `path` and record it, replacing any previous entry, then
    /// rewrite the whole ledger. Returns the new checksum.
    pub fn update(&mut self, path: &Path) -> ArtefactorResult<String> {
        let key = cache_key(path)?;
        if !key.exists() {
            return Err(ArtefactorError::FileNotFound(key));
        }
        if key.parent() != Some(self.dir.as_path()) {
            return Err(ArtefactorError::path_invalid(
                &key,
                format!("file is not in cached directory {}", self.dir.display()),
            ));
        }
        if key == self.ledger_path || key == self.tmp_path() {
            return Err(ArtefactorError::path_invalid(
                &key,
                "checksum file cannot track itself",
            ));
        }
        let file_name = key
            .file_name()
            .and_then(|name| name.to_str())
            .filter(|name| is_representable(name))
            .ok_or_else(|| {
                ArtefactorError::path_invalid(&key, "file name cannot be stored in checksum file")
            })?
            .to_string();

        self.refresh()?;

        info!("Updating checksum for {}", key.display());
        let checksum = calc_checksum(&key)?;

        self.entries.insert(
            key.clone(),
            CacheEntry {
                path: key.clone(),
                file_name,
                checksum: checksum.clone(),
            },
        );
        self.write_ledger()?;

        self.observer.entry_updated(&key, &checksum);
        Ok(checksum)
    }

    /// Entry for `path` as of the last refresh
    pub fn get(&self, path: &Path) -> Option<&CacheEntry> {
        let key = cache_key(path).ok()?;
        self.entries.get(&key)
    }

    /// All entries as of the last refresh, ordered by path
    pub fn entries(&self) -> impl Iterator<Item = &CacheEntry> {
        self.entries.values()
    }

    /// Paths of all tracked files as of the last refresh
    pub fn tracked_files(&self) -> Vec<PathBuf> {
        self.entries.keys().cloned().collect()
    }

    /// Number of entries as of the last refresh
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the last refresh found no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Directory the ledger covers
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the ledger file
    pub fn ledger_path(&self) -> &Path {
        &self.ledger_path
    }

    /// Sibling file the ledger is staged in before the rename
    fn tmp_path(&self) -> PathBuf {
        let ledger_name = self
            .ledger_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.dir.join(format!(".{}.tmp", ledger_name))
    }

    fn entry_from_line(&self, line: LedgerLine) -> CacheEntry {
        CacheEntry {
            path: clean_path(&self.dir.join(&line.file_name)),
            file_name: line.file_name,
            checksum: line.checksum,
        }
    }

    /// Replace the ledger with the current entries via a sibling temp file
    fn write_ledger(&self) -> ArtefactorResult<()> {
        let mut contents = String::new();
        for entry in self.entries.values() {
            contents.push_str(&entry.ledger_line().to_string());
            contents.push('\n');
        }

        replace_file(&self.tmp_path(), &self.ledger_path, &contents)?;

        debug!(
            "Wrote {} entries to {}",
            self.entries.len(),
            self.ledger_path.display()
        );
        Ok(())
    }
}

/// Write `contents` to `tmp_path` and rename it over `path`.
/// The temp file is removed if either step fails.
fn replace_file(tmp_path: &Path, path: &Path, contents: &str) -> ArtefactorResult<()> {
    let result = write_with_mode(tmp_path, contents).and_then(|()| {
        fs::rename(tmp_path, path).map_err(|e| {
            ArtefactorError::io(format!("replacing checksum file {}", path.display()), e)
        })
    });
    if result.is_err() {
        let _ = fs::remove_file(tmp_path);
    }
    result
}

fn write_with_mode(path: &Path, contents: &str) -> ArtefactorResult<()> {
    fs::write(path, contents)
        .map_err(|e| ArtefactorError::io(format!("writing {}", path.display()), e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = fs::Permissions::from_mode(0o644);
        fs::set_permissions(path, perms)
            .map_err(|e| ArtefactorError::io("setting checksum file permissions", e))?;
    }

    Ok(())
}

impl fmt::Debug for ChecksumCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChecksumCache")
            .field("ledger_path", &self.ledger_path)
            .field("dir", &self.dir)
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

/// Tracked file paths for `dir`. A missing ledger yields an empty list.
pub fn list_tracked_files(dir: &Path) -> ArtefactorResult<Vec<PathBuf>> {
    let cache = ChecksumCache::from_dir_named(dir, DEFAULT_LEDGER_FILE_NAME, false)?;
    Ok(cache.tracked_files())
}

/// Record `file` in the ledger next to it and return its checksum
pub fn update_cache(file: &Path) -> ArtefactorResult<String> {
    let mut cache = ChecksumCache::from_existing_file(file, false)?;
    cache.update(file)
}

/// Recorded checksum for `file`, if the file exists and is tracked
pub fn cached_checksum(file: &Path) -> ArtefactorResult<String> {
    let mut cache = ChecksumCache::from_existing_file(file, false)?;
    if cache.is_cached(file)? {
        if let Some(entry) = cache.get(file) {
            return Ok(entry.checksum.clone());
        }
    }
    Err(ArtefactorError::NotCached(cache_key(file)?))
}
