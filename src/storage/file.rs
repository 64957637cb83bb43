//! Transaction list persisted as one JSON file.
//!
//! The file is named after [`STORAGE_KEY`] and lives in a configurable
//! directory, by default `fintrack-rs` under the platform data dir.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::{fs, io};

use crate::error::{FintrackError, Result};
use crate::models::Transaction;

use super::STORAGE_KEY;

/// Directory name under the platform data dir.
const APP_NAME: &str = "fintrack-rs";

/// Advisory lock sentinel kept next to the data file.
const LOCK_FILE: &str = "storage.lock";

/// How the sentinel is locked around an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LockMode {
    /// Many readers at once.
    Shared,
    /// One writer, no readers.
    Exclusive,
}

/// Storage that keeps the whole list in `<dir>/transactions.json`.
///
/// Writers go through a temporary file and a rename, so readers never see a
/// half-written list. Loads take a shared lock on `storage.lock` and saves
/// take an exclusive one, which keeps two `fintrack` processes pointed at
/// the same directory from interleaving. A [`Mutex`] does the same job
/// between threads of one process.
#[derive(Debug)]
pub struct FileStorage {
    /// Directory holding the data file and the lock sentinel.
    dir: PathBuf,
    /// Serializes access from threads of this process.
    guard: Mutex<()>,
    /// Open handle on `storage.lock`.
    sentinel: fs::File,
}

impl FileStorage {
    /// Opens storage in `dir`, creating the directory and the lock
    /// sentinel when missing.
    ///
    /// # Errors
    ///
    /// Returns [`FintrackError::Storage`] if either cannot be created.
    #[inline]
    pub fn new(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir).map_err(storage_io_error)?;
        let sentinel = open_sentinel(&dir).map_err(storage_io_error)?;
        tracing::debug!(dir = %dir.display(), "opened file storage");
        Ok(Self {
            dir,
            guard: Mutex::new(()),
            sentinel,
        })
    }

    /// Platform default directory, e.g. `~/.local/share/fintrack-rs` on
    /// Linux.
    ///
    /// # Errors
    ///
    /// Returns [`FintrackError::Storage`] when the platform has no data
    /// directory.
    #[inline]
    pub fn default_dir() -> Result<PathBuf> {
        let Some(base) = dirs::data_dir() else {
            return Err(FintrackError::Storage(
                "could not determine platform data directory".into(),
            ));
        };
        Ok(base.join(APP_NAME))
    }

    /// Path of the JSON file holding the list.
    #[inline]
    #[must_use]
    pub fn data_path(&self) -> PathBuf {
        self.dir.join(format!("{STORAGE_KEY}.json"))
    }

    /// Runs `op` while holding the in-process guard and the sentinel lock.
    ///
    /// An unlock failure is reported only when `op` itself succeeded.
    fn with_file_lock<R, F: FnOnce() -> Result<R>>(&self, mode: LockMode, op: F) -> Result<R> {
        let _held = self.guard.lock().map_err(|err| lock_poison_error(&err))?;
        let locked = match mode {
            LockMode::Shared => self.sentinel.lock_shared(),
            LockMode::Exclusive => self.sentinel.lock(),
        };
        locked.map_err(storage_io_error)?;

        let outcome = op();
        match (outcome, self.sentinel.unlock()) {
            (Ok(_), Err(err)) => Err(storage_io_error(err)),
            (outcome, _) => outcome,
        }
    }

    /// Reads the list; a missing file is an empty list.
    fn read_list(&self) -> Result<Vec<Transaction>> {
        let path = self.data_path();
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no stored transactions yet");
                return Ok(Vec::new());
            }
            Err(err) => return Err(storage_io_error(err)),
        };
        let list: Vec<Transaction> = serde_json::from_str(&contents)?;
        tracing::debug!(count = list.len(), path = %path.display(), "loaded transactions");
        Ok(list)
    }

    /// Replaces the file contents with `transactions`.
    fn write_list(&self, transactions: &[Transaction]) -> Result<()> {
        let path = self.data_path();
        let staging = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(transactions)?;
        fs::write(&staging, json)
            .and_then(|()| fs::rename(&staging, &path))
            .map_err(storage_io_error)?;
        tracing::debug!(count = transactions.len(), path = %path.display(), "saved transactions");
        Ok(())
    }

    /// Deletes the data file. The sentinel stays.
    fn remove_list(&self) -> Result<()> {
        match fs::remove_file(self.data_path()) {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(storage_io_error(err)),
            Ok(()) | Err(_) => Ok(()),
        }
    }
}

/// Opens (or creates) the lock sentinel without truncating it.
fn open_sentinel(dir: &Path) -> io::Result<fs::File> {
    fs::OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(dir.join(LOCK_FILE))
}

/// Wraps an I/O failure as a storage error.
fn storage_io_error(err: io::Error) -> FintrackError {
    FintrackError::Storage(Box::new(err))
}

/// Wraps a poisoned guard as a storage error.
fn lock_poison_error<T>(err: &std::sync::PoisonError<T>) -> FintrackError {
    FintrackError::Storage(err.to_string().into())
}

impl super::Storage for FileStorage {
    #[inline]
    fn load(&self) -> Result<Vec<Transaction>> {
        self.with_file_lock(LockMode::Shared, || self.read_list())
    }

    #[inline]
    fn save(&self, transactions: &[Transaction]) -> Result<()> {
        self.with_file_lock(LockMode::Exclusive, || self.write_list(transactions))
    }

    #[inline]
    fn clear(&self) -> Result<()> {
        self.with_file_lock(LockMode::Exclusive, || self.remove_list())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;

    fn open_in_tempdir() -> (FileStorage, tempfile::TempDir) {
        let tmp = tempfile::tempdir().unwrap();
        (FileStorage::new(tmp.path().to_path_buf()).unwrap(), tmp)
    }

    fn test_transaction(key: &str, description: &str, amount: f64) -> Transaction {
        Transaction::new(key.into(), description, amount, "29/03/2025")
    }

    #[test]
    fn empty_storage_loads_empty_list() {
        let (storage, _dir) = open_in_tempdir();
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let (storage, _dir) = open_in_tempdir();
        let txs = vec![
            test_transaction("1", "Venda", 200.0),
            test_transaction("2", "Compra", -50.0),
        ];
        storage.save(&txs).unwrap();
        assert_eq!(storage.load().unwrap(), txs);
    }

    #[test]
    fn data_file_is_named_after_storage_key() {
        let (storage, dir) = open_in_tempdir();
        storage.save(&[test_transaction("1", "Venda", 200.0)]).unwrap();
        assert!(dir.path().join("transactions.json").exists());
        assert!(!dir.path().join("transactions.json.tmp").exists());
    }

    #[test]
    fn reads_blob_written_by_another_client() {
        let (storage, dir) = open_in_tempdir();
        let blob = r#"[
            {"key":"1743206400000","description":"Venda","amount":200,"date":"29/03/2025","type":"income"},
            {"description":"Compra","amount":-50,"date":"2025-03-28"},
            {"description":"Transferência","amount":-20,"date":"2025-03-27","type":"transfer"},
            {"description":"Rascunho","date":"2025-03-26"}
        ]"#;
        fs::write(dir.path().join("transactions.json"), blob).unwrap();
        let loaded = storage.load().unwrap();
        assert_eq!(loaded.len(), 4);
        assert_eq!(loaded[0].key.as_inner(), "1743206400000");
        assert!(loaded[1].is_expense());
        assert_eq!(loaded[1].kind, None);
        assert_eq!(loaded[2].kind, None);
        assert!(loaded[2].is_expense());
        assert!(loaded[3].amount.abs() < f64::EPSILON);
    }

    #[test]
    fn corrupt_blob_is_a_serialization_error() {
        let (storage, dir) = open_in_tempdir();
        fs::write(dir.path().join("transactions.json"), "{not json").unwrap();
        let err = storage.load().unwrap_err();
        assert!(matches!(err, FintrackError::Serialization(_)));
    }

    #[test]
    fn save_replaces_existing() {
        let (storage, _dir) = open_in_tempdir();
        storage.save(&[test_transaction("1", "Old", 1.0)]).unwrap();
        storage.save(&[test_transaction("2", "New", 2.0)]).unwrap();
        let loaded = storage.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].description, "New");
    }

    #[test]
    fn clear_removes_data_but_preserves_lockfile() {
        let (storage, dir) = open_in_tempdir();
        storage.save(&[test_transaction("1", "Venda", 200.0)]).unwrap();
        storage.clear().unwrap();
        assert!(storage.load().unwrap().is_empty());
        assert!(dir.path().join("storage.lock").exists());
    }

    #[test]
    fn clear_on_empty_is_ok() {
        let (storage, _dir) = open_in_tempdir();
        storage.clear().unwrap();
    }

    #[test]
    fn new_creates_sentinel() {
        let (_storage, dir) = open_in_tempdir();
        assert!(dir.path().join("storage.lock").exists());
    }

    #[test]
    fn default_dir_returns_path() {
        let dir = FileStorage::default_dir().unwrap();
        assert!(dir.ends_with("fintrack-rs"));
    }

    #[test]
    fn concurrent_saves_are_safe() {
        let (storage, _dir) = open_in_tempdir();
        let storage = std::sync::Arc::new(storage);
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let storage = std::sync::Arc::clone(&storage);
                std::thread::spawn(move || {
                    let key = format!("k-{i}");
                    storage
                        .save(&[test_transaction(&key, "entry", f64::from(i))])
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(storage.load().unwrap().len(), 1);
    }
}
