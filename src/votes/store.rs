//! SQLite-backed vote store.
//!
//! A single connection behind a `Mutex` serializes every write, and each
//! operation runs in an immediate transaction, so two votes for the same URL
//! can never lose an update or create duplicate rows.

use super::schema::{apply_schema, MAX_URL_LEN};
use super::types::{VoteKind, VoteRecord};
use crate::error::{Error, Result};
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, info};

/// Persistent URL → vote tally store
pub struct VoteStore {
    conn: Mutex<Connection>,
}

impl VoteStore {
    /// Open (or create) the vote database at `path`
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        apply_schema(&conn)?;
        info!("Opened vote store at {}", path.display());

        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Open a store that lives only as long as this handle
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        apply_schema(&conn)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Return the record for `url`, creating a zeroed one if absent
    pub fn get_or_create(&self, url: &str) -> Result<VoteRecord> {
        validate_url(url)?;
        let mut conn = self.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        insert_if_absent(&tx, url)?;
        let record = select(&tx, url)?.unwrap_or_else(|| VoteRecord::empty(url));

        tx.commit()?;
        Ok(record)
    }

    /// Add one vote of `kind` to `url` and return the updated tallies.
    ///
    /// The write is committed before this returns.
    pub fn increment(&self, url: &str, kind: VoteKind) -> Result<VoteRecord> {
        validate_url(url)?;
        let mut conn = self.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        insert_if_absent(&tx, url)?;
        let column = kind.column();
        tx.execute(
            &format!("UPDATE votes SET {column} = {column} + 1 WHERE url = ?1"),
            params![url],
        )?;
        let record = select(&tx, url)?.unwrap_or_else(|| VoteRecord::empty(url));

        tx.commit()?;
        debug!(
            "Recorded {} vote for {} ({}/{})",
            kind, url, record.upvotes, record.downvotes
        );
        Ok(record)
    }

    /// Look up the record for `url` without creating one
    pub fn get(&self, url: &str) -> Result<Option<VoteRecord>> {
        let conn = self.lock()?;
        select(&conn, url)
    }

    /// Look up several URLs at once, returning zeroed tallies for unknown ones
    pub fn tallies<'a, I>(&self, urls: I) -> Result<Vec<VoteRecord>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let conn = self.lock()?;
        urls.into_iter()
            .map(|url| Ok(select(&conn, url)?.unwrap_or_else(|| VoteRecord::empty(url))))
            .collect()
    }

    /// Close the underlying connection, flushing any pending state
    pub fn close(self) -> Result<()> {
        let conn = self
            .conn
            .into_inner()
            .map_err(|e| Error::StorageLock(e.to_string()))?;
        conn.close().map_err(|(_, e)| Error::Storage(e))?;
        info!("Vote store closed");
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn row_count(&self) -> i64 {
        let conn = self.lock().unwrap();
        conn.query_row("SELECT COUNT(*) FROM votes", [], |row| row.get(0))
            .unwrap()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| Error::StorageLock(e.to_string()))
    }
}

fn validate_url(url: &str) -> Result<()> {
    if url.trim().is_empty() {
        return Err(Error::invalid_input("url must not be empty"));
    }
    if url.chars().count() > MAX_URL_LEN {
        return Err(Error::invalid_input(format!(
            "url must be at most {} characters",
            MAX_URL_LEN
        )));
    }
    Ok(())
}

fn insert_if_absent(conn: &Connection, url: &str) -> Result<()> {
    conn.execute("INSERT OR IGNORE INTO votes (url) VALUES (?1)", params![url])?;
    Ok(())
}

fn select(conn: &Connection, url: &str) -> Result<Option<VoteRecord>> {
    let record = conn
        .query_row(
            "SELECT url, upvotes, downvotes FROM votes WHERE url = ?1",
            params![url],
            |row| {
                Ok(VoteRecord {
                    url: row.get(0)?,
                    upvotes: row.get(1)?,
                    downvotes: row.get(2)?,
                })
            },
        )
        .optional()?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn test_store() -> (tempfile::TempDir, VoteStore) {
        let dir = tempfile::TempDir::new().expect("create temp dir");
        let store = VoteStore::open(&dir.path().join("votes.db")).expect("open store");
        (dir, store)
    }

    #[test]
    fn test_get_or_create_new_url() {
        let store = VoteStore::open_in_memory().unwrap();
        let record = store.get_or_create("https://example.com/a").unwrap();

        assert_eq!(record, VoteRecord::empty("https://example.com/a"));
        assert_eq!(store.row_count(), 1);

        store.get_or_create("https://example.com/a").unwrap();
        assert_eq!(store.row_count(), 1);
    }

    #[test]
    fn test_increment_counts() {
        let store = VoteStore::open_in_memory().unwrap();
        let url = "https://example.com/paper";

        let kinds = [
            VoteKind::Up,
            VoteKind::Down,
            VoteKind::Up,
            VoteKind::Up,
            VoteKind::Down,
        ];
        let mut last = None;
        for kind in kinds {
            last = Some(store.increment(url, kind).unwrap());
        }

        let record = last.unwrap();
        assert_eq!(record.upvotes, 3);
        assert_eq!(record.downvotes, 2);
        assert_eq!(store.get(url).unwrap(), Some(record));
    }

    #[test]
    fn test_concurrent_increments() {
        let (_dir, store) = test_store();
        let store = Arc::new(store);
        let url = "https://www.youtube.com/watch?v=abc";

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    let kind = if i % 2 == 0 { VoteKind::Up } else { VoteKind::Down };
                    for _ in 0..25 {
                        store.increment(url, kind).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let record = store.get(url).unwrap().unwrap();
        assert_eq!(record.upvotes, 100);
        assert_eq!(record.downvotes, 100);
        assert_eq!(store.row_count(), 1);
    }

    #[test]
    fn test_invalid_kind_leaves_store_untouched() {
        let store = VoteStore::open_in_memory().unwrap();
        store.increment("https://a.example", VoteKind::Up).unwrap();

        let result = "sideways"
            .parse::<VoteKind>()
            .and_then(|kind| store.increment("https://a.example", kind));
        assert!(matches!(result, Err(Error::InvalidInput(_))));

        let record = store.get("https://a.example").unwrap().unwrap();
        assert_eq!((record.upvotes, record.downvotes), (1, 0));
    }

    #[test]
    fn test_invalid_urls() {
        let store = VoteStore::open_in_memory().unwrap();

        assert!(matches!(
            store.increment("", VoteKind::Up),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            store.get_or_create("   "),
            Err(Error::InvalidInput(_))
        ));
        let long = format!("https://example.com/{}", "a".repeat(MAX_URL_LEN));
        assert!(matches!(
            store.increment(&long, VoteKind::Down),
            Err(Error::InvalidInput(_))
        ));
        assert_eq!(store.row_count(), 0);
    }

    #[test]
    fn test_get_does_not_create() {
        let store = VoteStore::open_in_memory().unwrap();
        assert_eq!(store.get("https://nobody.example").unwrap(), None);
        assert_eq!(store.row_count(), 0);

        let tallies = store
            .tallies(["https://nobody.example", "https://other.example"])
            .unwrap();
        assert_eq!(tallies.len(), 2);
        assert!(tallies.iter().all(|t| t.upvotes == 0 && t.downvotes == 0));
        assert_eq!(store.row_count(), 0);
    }

    #[test]
    fn test_votes_survive_reopen() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("votes.db");

        let store = VoteStore::open(&path).unwrap();
        store.increment("https://a.example", VoteKind::Up).unwrap();
        store.increment("https://a.example", VoteKind::Down).unwrap();
        store.close().unwrap();

        let reopened = VoteStore::open(&path).unwrap();
        let record = reopened.get("https://a.example").unwrap().unwrap();
        assert_eq!((record.upvotes, record.downvotes), (1, 1));
    }
}
