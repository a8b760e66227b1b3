use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::error::{JournalError, JournalResult};
use crate::event::JournalEvent;

/// Flush/sync strategy for the journal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SyncMode {
    /// `fsync` after every append (safest, highest latency).
    EveryWrite,
    /// Rely on OS page-cache buffering (fastest, least durable).
    #[default]
    OsDefault,
}

/// Configuration for the journal.
#[derive(Clone, Copy, Debug, Default)]
pub struct JournalConfig {
    /// Sync/flush strategy.
    pub sync_mode: SyncMode,
}

/// Header size: 4 bytes length + 4 bytes CRC.
const HEADER_SIZE: usize = 8;

/// Internal mutable state for the journal writer.
struct JournalWriter {
    writer: BufWriter<File>,
    /// Current write offset in the journal file.
    offset: u64,
}

/// Crash-recoverable append-only event log.
///
/// Events are serialized with bincode, framed with a length prefix and a
/// CRC32 checksum, and appended to a single file:
///
/// ```text
/// [4 bytes: entry length (little-endian u32)]
/// [4 bytes: CRC32 of payload (little-endian u32)]
/// [N bytes: payload (bincode-serialized JournalEvent)]
/// ```
///
/// On recovery the file is read front-to-back; entries that fail the CRC
/// check or run past the end of the file are incomplete/torn writes from a
/// crash and are skipped.
pub struct Journal {
    /// Path to the journal file.
    path: PathBuf,
    /// Writer state behind a mutex for thread safety.
    writer: Mutex<JournalWriter>,
    /// Configuration.
    config: JournalConfig,
}

impl Journal {
    /// Open (or create) a journal file at the given path.
    pub fn open(path: &Path, config: JournalConfig) -> JournalResult<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(path)?;

        let offset = file.metadata()?.len();
        let writer = BufWriter::new(file);

        Ok(Self {
            path: path.to_path_buf(),
            writer: Mutex::new(JournalWriter { writer, offset }),
            config,
        })
    }

    /// Append a single event. Returns the byte offset of the entry.
    pub fn append(&self, event: &JournalEvent) -> JournalResult<u64> {
        let payload =
            bincode::serialize(event).map_err(|e| JournalError::Serialization(e.to_string()))?;

        let length = payload.len() as u32;
        let crc = crc32fast::hash(&payload);

        let mut w = self.writer.lock().expect("journal mutex poisoned");
        let entry_offset = w.offset;

        // Write header: [length: u32 LE] [crc: u32 LE]
        w.writer.write_all(&length.to_le_bytes())?;
        w.writer.write_all(&crc.to_le_bytes())?;
        w.writer.write_all(&payload)?;

        w.writer.flush()?;
        if self.config.sync_mode == SyncMode::EveryWrite {
            w.writer.get_ref().sync_all()?;
        }

        w.offset += HEADER_SIZE as u64 + payload.len() as u64;

        debug!(offset = entry_offset, len = payload.len(), "journal append");
        Ok(entry_offset)
    }

    /// Recover all valid events from the journal, front to back.
    ///
    /// Entries that fail CRC validation or are truncated are logged and
    /// skipped (they represent torn writes from a crash).
    pub fn recover(&self) -> JournalResult<Vec<JournalEvent>> {
        let mut file = BufReader::new(File::open(&self.path)?);
        let file_len = file.get_ref().metadata()?.len();
        let mut events = Vec::new();
        let mut offset: u64 = 0;

        while offset + HEADER_SIZE as u64 <= file_len {
            file.seek(SeekFrom::Start(offset))?;

            let mut header_buf = [0u8; HEADER_SIZE];
            match file.read_exact(&mut header_buf) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e.into()),
            }

            let length =
                u32::from_le_bytes([header_buf[0], header_buf[1], header_buf[2], header_buf[3]]);
            let expected_crc =
                u32::from_le_bytes([header_buf[4], header_buf[5], header_buf[6], header_buf[7]]);

            if length == 0 || (offset + HEADER_SIZE as u64 + length as u64) > file_len {
                warn!(
                    offset,
                    length, file_len, "invalid journal entry length; stopping recovery"
                );
                break;
            }

            let mut payload = vec![0u8; length as usize];
            match file.read_exact(&mut payload) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    warn!(offset, "truncated journal entry; stopping recovery");
                    break;
                }
                Err(e) => return Err(e.into()),
            }

            let actual_crc = crc32fast::hash(&payload);
            if actual_crc != expected_crc {
                warn!(
                    offset,
                    expected = expected_crc,
                    actual = actual_crc,
                    "CRC mismatch; skipping entry"
                );
                offset += HEADER_SIZE as u64 + length as u64;
                continue;
            }

            match bincode::deserialize::<JournalEvent>(&payload) {
                Ok(event) => events.push(event),
                Err(e) => {
                    warn!(offset, error = %e, "failed to deserialize journal entry; skipping");
                }
            }

            offset += HEADER_SIZE as u64 + length as u64;
        }

        debug!(recovered = events.len(), "journal recovery complete");
        Ok(events)
    }

    /// Current write offset.
    pub fn offset(&self) -> u64 {
        self.writer.lock().expect("journal mutex poisoned").offset
    }

    /// Path to the journal file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cask_links::LinkRecord;
    use cask_store::ContentRecord;
    use cask_types::{Category, ContentDigest, ShortId, Timestamp};

    /// Deterministic event fixture: fixed timestamps so the same seq always
    /// compares equal across reconstructions.
    fn content_event(seq: u32) -> JournalEvent {
        let id = ShortId::from_u128(seq as u128 + 1);
        let payload = format!("payload-{seq}").into_bytes();
        let digest = ContentDigest::of(Category::Metadata, &payload);
        JournalEvent::ContentInserted {
            category: Category::Metadata,
            record: ContentRecord {
                id,
                digest,
                payload,
                created_at: Timestamp::from_millis(1000 + seq as u64),
            },
        }
    }

    fn link_event() -> JournalEvent {
        JournalEvent::LinkInserted {
            record: LinkRecord {
                metadata_id: ShortId::new("g").unwrap(),
                roles_id: ShortId::new("4").unwrap(),
                created_at: Timestamp::from_millis(2000),
            },
        }
    }

    #[test]
    fn append_and_recover_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let journal = Journal::open(&dir.path().join("test.journal"), JournalConfig::default())
            .unwrap();

        let e1 = content_event(1);
        let e2 = link_event();
        let e3 = JournalEvent::LengthGrown {
            category: Category::Roles,
        };

        journal.append(&e1).unwrap();
        journal.append(&e2).unwrap();
        journal.append(&e3).unwrap();

        let recovered = journal.recover().unwrap();
        assert_eq!(recovered, vec![e1, e2, e3]);
    }

    #[test]
    fn recover_empty_journal() {
        let dir = tempfile::tempdir().unwrap();
        let journal =
            Journal::open(&dir.path().join("empty.journal"), JournalConfig::default()).unwrap();
        assert!(journal.recover().unwrap().is_empty());
    }

    #[test]
    fn crc_detects_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.journal");
        let journal = Journal::open(&path, JournalConfig::default()).unwrap();

        journal.append(&content_event(1)).unwrap();
        journal.append(&content_event(2)).unwrap();
        drop(journal);

        // Flip a byte in the first entry's payload.
        {
            let mut file = OpenOptions::new().write(true).read(true).open(&path).unwrap();
            file.seek(SeekFrom::Start(HEADER_SIZE as u64)).unwrap();
            let mut buf = [0u8; 1];
            file.read_exact(&mut buf).unwrap();
            buf[0] ^= 0xFF;
            file.seek(SeekFrom::Start(HEADER_SIZE as u64)).unwrap();
            file.write_all(&buf).unwrap();
            file.sync_all().unwrap();
        }

        let journal = Journal::open(&path, JournalConfig::default()).unwrap();
        let recovered = journal.recover().unwrap();

        // First entry skipped on CRC failure; second survives.
        assert_eq!(recovered, vec![content_event(2)]);
    }

    #[test]
    fn recovery_survives_truncated_tail() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tail.journal");
        let journal = Journal::open(&path, JournalConfig::default()).unwrap();

        journal.append(&content_event(1)).unwrap();
        journal.append(&content_event(2)).unwrap();
        let total_len = journal.offset();
        drop(journal);

        // Chop the file mid-entry.
        {
            let file = OpenOptions::new().write(true).open(&path).unwrap();
            file.set_len(total_len - 4).unwrap();
        }

        let journal = Journal::open(&path, JournalConfig::default()).unwrap();
        let recovered = journal.recover().unwrap();
        assert_eq!(recovered, vec![content_event(1)]);
    }

    #[test]
    fn append_returns_increasing_offsets() {
        let dir = tempfile::tempdir().unwrap();
        let journal =
            Journal::open(&dir.path().join("offsets.journal"), JournalConfig::default()).unwrap();

        let off1 = journal.append(&content_event(1)).unwrap();
        let off2 = journal.append(&content_event(2)).unwrap();
        let off3 = journal.append(&link_event()).unwrap();

        assert_eq!(off1, 0);
        assert!(off2 > off1);
        assert!(off3 > off2);
    }

    #[test]
    fn reopen_appends_after_existing_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reopen.journal");

        let journal = Journal::open(&path, JournalConfig::default()).unwrap();
        journal.append(&content_event(1)).unwrap();
        drop(journal);

        let journal = Journal::open(&path, JournalConfig::default()).unwrap();
        journal.append(&content_event(2)).unwrap();

        let recovered = journal.recover().unwrap();
        assert_eq!(recovered, vec![content_event(1), content_event(2)]);
    }

    #[test]
    fn sync_every_write_mode() {
        let dir = tempfile::tempdir().unwrap();
        let config = JournalConfig {
            sync_mode: SyncMode::EveryWrite,
        };
        let journal = Journal::open(&dir.path().join("sync.journal"), config).unwrap();

        journal.append(&content_event(1)).unwrap();
        assert_eq!(journal.recover().unwrap().len(), 1);
    }
}
