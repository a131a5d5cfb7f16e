use std::fs;
use std::io::{ErrorKind, Write};

use inbox_types::Message;
use tempfile::NamedTempFile;
use tracing::{debug, error, info};

use crate::{MessageStore, Result, StoreError};

impl MessageStore {
    /// Full collection in storage (append) order.
    ///
    /// A missing document is initialised to `[]` and reported as empty.
    pub fn load(&self) -> Result<Vec<Message>> {
        self.with_lock(|| self.read_all())
    }

    /// Replace the whole document with `items`.
    pub fn save(&self, items: &[Message]) -> Result<()> {
        self.with_lock(|| self.write_all(items))
    }

    pub fn append(&self, item: Message) -> Result<Message> {
        self.append_with(|_| item)
    }

    /// Read-modify-write under the store lock: `build` sees the current
    /// collection and returns the entry to append. Existing entries are
    /// written back unchanged.
    pub fn append_with<F>(&self, build: F) -> Result<Message>
    where
        F: FnOnce(&[Message]) -> Message,
    {
        self.with_lock(|| {
            let mut items = self.read_all()?;
            let mut item = build(&items);
            item.normalize();
            items.push(item.clone());
            self.write_all(&items)?;
            Ok(item)
        })
    }

    fn read_all(&self) -> Result<Vec<Message>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No message file at {}, starting empty", self.path.display());
                self.write_all(&[])?;
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let items: Vec<Message> = serde_json::from_str(&raw).map_err(|source| {
            error!("Message file {} is corrupt: {}", self.path.display(), source);
            StoreError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;

        debug!("Loaded {} messages from {}", items.len(), self.path.display());
        Ok(items)
    }

    /// Write to a sibling temp file, fsync, then rename over the target so a
    /// crash mid-write leaves the previous document intact.
    fn write_all(&self, items: &[Message]) -> Result<()> {
        let json = serde_json::to_string_pretty(items)?;
        let io_err = |source: std::io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        let mut tmp = NamedTempFile::new_in(self.dir()).map_err(io_err)?;
        tmp.write_all(json.as_bytes()).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(&self.path).map_err(|e| io_err(e.error))?;

        debug!("Saved {} messages to {}", items.len(), self.path.display());
        Ok(())
    }
}
