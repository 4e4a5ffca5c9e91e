//! File-based ledger store for persistent storage.

use crate::error::{LedgerError, LedgerResult};
use crate::record::{CreateRecord, OwnerKey, Record, RecordHandle, RecordId, TypeDescriptor};
use crate::store::LedgerStore;
use parking_lot::Mutex;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Magic bytes identifying a splice record file.
const MAGIC: &[u8; 4] = b"SPLR";
/// Current record file format version.
const FORMAT_VERSION: u16 = 1;
/// File extension for record files.
const RECORD_EXT: &str = "splr";

/// Fixed part of a record file: magic (4) + version (2) + owner key (32) +
/// descriptor flag (1) + data length (4).
const HEADER_SIZE: usize = 43;
/// CRC size.
const CRC_SIZE: usize = 4;
/// Serialized type descriptor size.
const DESCRIPTOR_SIZE: usize = 64;

/// A file-based ledger store.
///
/// Persists one immutable file per record under a directory. Writes go
/// through a temporary file and an atomic rename, so a crash mid-write
/// never leaves a half-visible record. Lookups by id and owner key scan
/// the directory; every file is CRC-checked on read.
///
/// Records are immutable once written (append-only ledger model), so the
/// directory needs no exclusive lock: concurrent readers and writers only
/// ever observe complete files.
///
/// # Example
///
/// ```no_run
/// use splice_ledger::{CreateRecord, FileLedger, LedgerStore, OwnerKey};
///
/// let ledger = FileLedger::open("/tmp/splice-ledger").unwrap();
/// let owner = OwnerKey::from_bytes([1u8; 32]);
/// ledger
///     .create_record(CreateRecord::owned(owner, vec![1, 2, 3]))
///     .unwrap();
/// ```
#[derive(Debug)]
pub struct FileLedger {
    dir: PathBuf,
    next_seq: Mutex<u64>,
}

impl FileLedger {
    /// Opens or creates a file ledger at the given directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or scanned.
    pub fn open(dir: impl AsRef<Path>) -> LedgerResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;

        // Resume the sequence counter after the highest existing file.
        let mut max_seq = 0u64;
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if let Some(seq) = parse_record_seq(&path) {
                max_seq = max_seq.max(seq + 1);
            }
        }

        Ok(Self {
            dir,
            next_seq: Mutex::new(max_seq),
        })
    }

    /// Returns the ledger directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the number of record files in the ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be scanned.
    pub fn record_count(&self) -> LedgerResult<usize> {
        Ok(self.record_paths()?.len())
    }

    fn record_paths(&self) -> LedgerResult<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if parse_record_seq(&path).is_some() {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    fn read_record(path: &Path) -> LedgerResult<Record> {
        let data = fs::read(path)?;
        decode_record(&data)
            .map_err(|message| LedgerError::corrupt_record(format!("{}: {message}", path.display())))
    }
}

impl LedgerStore for FileLedger {
    fn create_record(&self, request: CreateRecord) -> LedgerResult<RecordHandle> {
        let id = request.type_descriptor.as_ref().map(|d| d.record_id());
        if let Some(id) = id {
            if self.record_by_id(&id)?.is_some() {
                return Err(LedgerError::rejected(format!(
                    "record id already exists: {id}"
                )));
            }
        }

        let record = Record {
            owner_key: request.owner_key,
            type_descriptor: request.type_descriptor,
            data: request.data,
        };
        let encoded = encode_record(&record);

        let seq = {
            let mut next = self.next_seq.lock();
            let seq = *next;
            *next += 1;
            seq
        };
        let final_path = self.dir.join(format!("{seq:016x}.{RECORD_EXT}"));
        let tmp_path = self.dir.join(format!("{seq:016x}.tmp"));

        // Write to a temp file, then rename into place.
        {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(&encoded)?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &final_path)?;

        Ok(RecordHandle {
            id,
            owner_key: record.owner_key,
        })
    }

    fn record_by_id(&self, id: &RecordId) -> LedgerResult<Option<Record>> {
        for path in self.record_paths()? {
            let record = Self::read_record(&path)?;
            if record.id() == Some(*id) {
                return Ok(Some(record));
            }
        }
        Ok(None)
    }

    fn records_by_owner(&self, key: &OwnerKey) -> LedgerResult<Vec<Record>> {
        let mut records = Vec::new();
        for path in self.record_paths()? {
            let record = Self::read_record(&path)?;
            if record.owner_key == *key {
                records.push(record);
            }
        }
        Ok(records)
    }
}

fn parse_record_seq(path: &Path) -> Option<u64> {
    if path.extension()?.to_str()? != RECORD_EXT {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    u64::from_str_radix(stem, 16).ok()
}

fn encode_record(record: &Record) -> Vec<u8> {
    let descriptor_len = if record.type_descriptor.is_some() {
        DESCRIPTOR_SIZE
    } else {
        0
    };
    let mut buf = Vec::with_capacity(HEADER_SIZE + descriptor_len + record.data.len() + CRC_SIZE);

    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    buf.extend_from_slice(record.owner_key.as_bytes());
    buf.push(u8::from(record.type_descriptor.is_some()));
    buf.extend_from_slice(&(record.data.len() as u32).to_le_bytes());
    if let Some(descriptor) = &record.type_descriptor {
        buf.extend_from_slice(&descriptor.canonical_bytes());
    }
    buf.extend_from_slice(&record.data);

    // CRC32 (over everything before it)
    let crc = compute_crc32(&buf);
    buf.extend_from_slice(&crc.to_le_bytes());

    buf
}

fn decode_record(data: &[u8]) -> Result<Record, String> {
    if data.len() < HEADER_SIZE + CRC_SIZE {
        return Err("file too short".to_string());
    }
    if &data[0..4] != MAGIC {
        return Err("bad magic".to_string());
    }
    let version = u16::from_le_bytes([data[4], data[5]]);
    if version != FORMAT_VERSION {
        return Err(format!("unsupported format version {version}"));
    }

    let stored_crc = u32::from_le_bytes([
        data[data.len() - 4],
        data[data.len() - 3],
        data[data.len() - 2],
        data[data.len() - 1],
    ]);
    let computed_crc = compute_crc32(&data[..data.len() - CRC_SIZE]);
    if stored_crc != computed_crc {
        return Err(format!(
            "checksum mismatch: stored {stored_crc:08x}, computed {computed_crc:08x}"
        ));
    }

    let mut owner_key = [0u8; 32];
    owner_key.copy_from_slice(&data[6..38]);
    let has_descriptor = match data[38] {
        0 => false,
        1 => true,
        flag => return Err(format!("invalid descriptor flag {flag}")),
    };
    let data_len = u32::from_le_bytes([data[39], data[40], data[41], data[42]]) as usize;

    let descriptor_len = if has_descriptor { DESCRIPTOR_SIZE } else { 0 };
    let expected_len = HEADER_SIZE + descriptor_len + data_len + CRC_SIZE;
    if data.len() != expected_len {
        return Err(format!(
            "length mismatch: expected {expected_len}, actual {}",
            data.len()
        ));
    }

    let type_descriptor = if has_descriptor {
        let mut code_hash = [0u8; 32];
        let mut args = [0u8; 32];
        code_hash.copy_from_slice(&data[HEADER_SIZE..HEADER_SIZE + 32]);
        args.copy_from_slice(&data[HEADER_SIZE + 32..HEADER_SIZE + 64]);
        Some(TypeDescriptor::new(code_hash, args))
    } else {
        None
    };

    let payload_start = HEADER_SIZE + descriptor_len;
    Ok(Record {
        owner_key: OwnerKey::from_bytes(owner_key),
        type_descriptor,
        data: data[payload_start..payload_start + data_len].to_vec(),
    })
}

/// CRC32 (IEEE) over the given bytes.
fn compute_crc32(data: &[u8]) -> u32 {
    const CRC32_TABLE: [u32; 256] = {
        let mut table = [0u32; 256];
        let mut i = 0;
        while i < 256 {
            let mut crc = i as u32;
            let mut j = 0;
            while j < 8 {
                if crc & 1 != 0 {
                    crc = (crc >> 1) ^ 0xEDB8_8320;
                } else {
                    crc >>= 1;
                }
                j += 1;
            }
            table[i] = crc;
            i += 1;
        }
        table
    };

    let mut crc = 0xFFFF_FFFFu32;
    for &byte in data {
        let index = ((crc ^ u32::from(byte)) & 0xFF) as usize;
        crc = (crc >> 8) ^ CRC32_TABLE[index];
    }
    !crc
}
