//! Filesystem storage for the file-backed post service.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use blogdash_core::Result;
use blogdash_core::error::{Error, InvalidInputError, ProtocolError};
use blogdash_core::{Post, PostId};

/// File name used when the store root is a directory.
pub const DB_FILE_NAME: &str = "db.json";

fn payload_error(message: impl Into<String>) -> Error {
    Error::InvalidInput(InvalidInputError::Payload {
        message: message.into(),
    })
}

/// The parsed database file.
///
/// json-server keeps every collection under its own key in one object;
/// a file holding a bare array is treated as the collection itself.
enum Database {
    Keyed(Map<String, Value>),
    Bare(Vec<Value>),
}

/// A json-server style database file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    collection: String,
}

impl FileStore {
    /// Open a store at `root`.
    ///
    /// A path ending in `.json` is the database file itself; anything else
    /// is a directory holding [`DB_FILE_NAME`].
    pub fn new(root: impl AsRef<Path>, collection: impl Into<String>) -> Self {
        let root = root.as_ref();
        let path = if root.extension().is_some_and(|ext| ext == "json") {
            root.to_path_buf()
        } else {
            root.join(DB_FILE_NAME)
        };

        Self {
            path,
            collection: collection.into(),
        }
    }

    /// Get the database file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the collection key.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("json.lock")
    }

    fn read_database(&self) -> Result<Option<Database>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let value: Value = serde_json::from_str(&content)
            .map_err(|e| payload_error(format!("{}: {}", self.path.display(), e)))?;

        match value {
            Value::Object(map) => Ok(Some(Database::Keyed(map))),
            Value::Array(items) => Ok(Some(Database::Bare(items))),
            _ => Err(payload_error(format!(
                "{}: expected a JSON object or array",
                self.path.display()
            ))),
        }
    }

    fn collection_items(&self, db: &Database) -> Result<Vec<Value>> {
        match db {
            Database::Bare(items) => Ok(items.clone()),
            Database::Keyed(map) => match map.get(&self.collection) {
                None | Some(Value::Null) => Ok(Vec::new()),
                Some(Value::Array(items)) => Ok(items.clone()),
                Some(_) => Err(payload_error(format!(
                    "'{}' is not an array",
                    self.collection
                ))),
            },
        }
    }

    fn write_database(&self, db: &Database) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let value = match db {
            Database::Keyed(map) => Value::Object(map.clone()),
            Database::Bare(items) => Value::Array(items.clone()),
        };
        let content =
            serde_json::to_string_pretty(&value).map_err(|e| payload_error(e.to_string()))?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, &self.path)?;

        Ok(())
    }

    /// Run `f` while holding the exclusive write lock.
    fn with_write_lock<T>(&self, f: impl FnOnce() -> Result<T>) -> Result<T> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())?;

        lock_file.lock_exclusive()?;
        let result = f();
        lock_file.unlock()?;

        result
    }

    // ========================================================================
    // Post Operations
    // ========================================================================

    /// Read every post in file order.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn list_posts(&self) -> Result<Vec<Post>> {
        let Some(db) = self.read_database()? else {
            debug!("Database file missing, collection is empty");
            return Ok(Vec::new());
        };

        self.collection_items(&db)?
            .into_iter()
            .map(|item| {
                serde_json::from_value(item).map_err(|e| payload_error(format!("bad post: {}", e)))
            })
            .collect()
    }

    /// Remove one post, keeping the raw JSON of every other record intact.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn delete_post(&self, id: &PostId) -> Result<()> {
        self.with_write_lock(|| {
            let not_found = || {
                Error::Protocol(ProtocolError::not_found(
                    "PostNotFound",
                    format!("Post {} not found", id),
                ))
            };

            let mut db = self.read_database()?.ok_or_else(not_found)?;
            let mut items = self.collection_items(&db)?;

            let index = items
                .iter()
                .position(|item| {
                    item.get("id")
                        .and_then(PostId::from_json)
                        .is_some_and(|item_id| &item_id == id)
                })
                .ok_or_else(not_found)?;
            items.remove(index);

            match &mut db {
                Database::Bare(bare) => *bare = items,
                Database::Keyed(map) => {
                    map.insert(self.collection.clone(), Value::Array(items));
                }
            }

            self.write_database(&db)?;
            debug!(%id, "Deleted post");
            Ok(())
        })
    }
}
