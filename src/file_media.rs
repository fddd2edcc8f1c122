//! Archive file access: one bounded read, at most one in-place write.
//!
//! The file length never changes. The write covers only the checksum field
//! through the flag byte, at their original offsets. There is no journal or
//! temp-file rename; if the process dies mid-write the header may be left
//! half updated.

use std::fs::OpenOptions;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::buffer::{ArchiveBuffer, ByteSpan};
use crate::error::{RarError, Result};
use crate::lock::{toggle_lock, LockState, ToggleOutcome};

/// Options for a lock run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockOptions {
    /// How many bytes to read from the start of the archive.
    pub read_len: usize,
}

impl Default for LockOptions {
    fn default() -> Self {
        Self {
            read_len: ArchiveBuffer::DEFAULT_PREFIX_LEN,
        }
    }
}

fn prefix_buffer(bytes: Vec<u8>) -> Result<ArchiveBuffer> {
    if bytes.is_empty() {
        return Err(RarError::FileRead(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "archive is empty",
        )));
    }
    debug!(read = bytes.len(), "read archive prefix");
    Ok(ArchiveBuffer::new(bytes))
}

/// Read up to `len` bytes from the current position of `reader`.
fn read_prefix<R: Read>(reader: R, len: usize) -> Result<ArchiveBuffer> {
    let mut bytes = Vec::with_capacity(len);
    reader
        .take(len as u64)
        .read_to_end(&mut bytes)
        .map_err(RarError::FileRead)?;
    prefix_buffer(bytes)
}

fn write_failed(span: ByteSpan, err: io::Error) -> RarError {
    warn!(
        offset = span.start,
        len = span.len,
        "write failed, header bytes may be partially updated"
    );
    RarError::FileWrite(err)
}

/// Write `span` of `buffer` back to the same offset of `writer`.
fn write_span<W: Write + Seek>(writer: &mut W, buffer: &ArchiveBuffer, span: ByteSpan) -> Result<()> {
    let bytes = buffer.span_bytes(span)?;
    writer
        .seek(SeekFrom::Start(span.start as u64))
        .map_err(|e| write_failed(span, e))?;
    writer.write_all(bytes).map_err(|e| write_failed(span, e))?;
    writer.flush().map_err(|e| write_failed(span, e))?;
    Ok(())
}

/// Run a lock or unlock on any seekable byte stream positioned at the
/// start of an archive.
pub fn lock_stream<F: Read + Write + Seek>(
    stream: &mut F,
    target: LockState,
    opts: &LockOptions,
) -> Result<ToggleOutcome> {
    let mut buffer = read_prefix(&mut *stream, opts.read_len)?;
    let outcome = toggle_lock(&mut buffer, target)?;
    if let Some(span) = outcome.write_span() {
        write_span(stream, &buffer, span)?;
    }
    Ok(outcome)
}

/// An archive on the local filesystem.
///
/// Holds only the path; every lock run opens the file read/write, reads the
/// header prefix, writes back at most one span and closes it again.
#[derive(Debug, Clone)]
pub struct LocalArchive {
    path: PathBuf,
    name: String,
}

impl LocalArchive {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without directories, empty for paths like `/` or `..`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lock or unlock the archive in place.
    pub fn lock(&self, target: LockState, opts: &LockOptions) -> Result<ToggleOutcome> {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&self.path)
            .map_err(RarError::FileOpen)?;
        debug!(name = %self.name, %target, "opened archive");
        lock_stream(&mut file, target, opts)
    }

    /// Async variant of [`LocalArchive::lock`] on top of `tokio::fs`.
    #[cfg(feature = "async")]
    #[cfg_attr(docsrs, doc(cfg(feature = "async")))]
    pub async fn lock_async(&self, target: LockState, opts: &LockOptions) -> Result<ToggleOutcome> {
        use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};

        let mut file = tokio::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .open(&self.path)
            .await
            .map_err(RarError::FileOpen)?;
        debug!(name = %self.name, %target, "opened archive");

        let mut bytes = Vec::with_capacity(opts.read_len);
        (&mut file)
            .take(opts.read_len as u64)
            .read_to_end(&mut bytes)
            .await
            .map_err(RarError::FileRead)?;
        let mut buffer = prefix_buffer(bytes)?;

        let outcome = toggle_lock(&mut buffer, target)?;
        if let Some(span) = outcome.write_span() {
            let bytes = buffer.span_bytes(span)?;
            file.seek(SeekFrom::Start(span.start as u64))
                .await
                .map_err(|e| write_failed(span, e))?;
            file.write_all(bytes)
                .await
                .map_err(|e| write_failed(span, e))?;
            file.flush().await.map_err(|e| write_failed(span, e))?;
        }
        Ok(outcome)
    }
}

/// Lock or unlock the archive at `path` with default options.
pub fn lock_file<P: AsRef<Path>>(path: P, target: LockState) -> Result<ToggleOutcome> {
    lock_file_with(path, target, &LockOptions::default())
}

pub fn lock_file_with<P: AsRef<Path>>(
    path: P,
    target: LockState,
    opts: &LockOptions,
) -> Result<ToggleOutcome> {
    LocalArchive::new(path).lock(target, opts)
}

/// Async variant of [`lock_file_with`].
#[cfg(feature = "async")]
#[cfg_attr(docsrs, doc(cfg(feature = "async")))]
pub async fn lock_file_async<P: AsRef<Path>>(
    path: P,
    target: LockState,
    opts: &LockOptions,
) -> Result<ToggleOutcome> {
    LocalArchive::new(path).lock_async(target, opts).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use tempfile::NamedTempFile;

    const RAR4_UNLOCKED: [u8; 20] = [
        0x52, 0x61, 0x72, 0x21, 0x1A, 0x07, 0x00, 0xCF, 0x90, 0x73, 0x00, 0x00, 0x0D, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00,
    ];

    /// RAR4 archive with file data after the main header.
    fn rar4_archive() -> Vec<u8> {
        let mut bytes = RAR4_UNLOCKED.to_vec();
        bytes.extend((0..600u32).map(|i| (i % 251) as u8));
        bytes
    }

    /// Archive file removed when the handle drops.
    fn temp_archive(bytes: &[u8]) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .prefix("rar-lock-")
            .suffix(".rar")
            .tempfile()
            .unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    /// Stream that records every write.
    struct Recorder {
        inner: Cursor<Vec<u8>>,
        writes: Vec<(u64, usize)>,
    }

    impl Read for Recorder {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.inner.read(buf)
        }
    }

    impl Write for Recorder {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.writes.push((self.inner.position(), buf.len()));
            self.inner.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Seek for Recorder {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.inner.seek(pos)
        }
    }

    #[test]
    fn test_lock_stream_writes_minimal_span() {
        let original = rar4_archive();
        let mut stream = Recorder {
            inner: Cursor::new(original.clone()),
            writes: Vec::new(),
        };

        let outcome = lock_stream(&mut stream, LockState::Locked, &LockOptions::default()).unwrap();
        assert!(outcome.is_changed());
        assert_eq!(stream.writes, vec![(7, 4)]);

        let written = stream.inner.into_inner();
        assert_eq!(written.len(), original.len());
        assert_eq!(&written[7..11], &[0xB5, 0x30, 0x73, 0x04]);
        assert_eq!(&written[11..], &original[11..]);
    }

    #[test]
    fn test_lock_stream_noop_does_not_write() {
        let mut stream = Recorder {
            inner: Cursor::new(rar4_archive()),
            writes: Vec::new(),
        };
        let outcome = lock_stream(&mut stream, LockState::Unlocked, &LockOptions::default()).unwrap();
        assert!(!outcome.is_changed());
        assert!(stream.writes.is_empty());
    }

    #[test]
    fn test_lock_stream_empty() {
        let mut stream = Cursor::new(Vec::new());
        assert!(matches!(
            lock_stream(&mut stream, LockState::Locked, &LockOptions::default()),
            Err(RarError::FileRead(_))
        ));
    }

    #[test]
    fn test_short_read_len() {
        let mut stream = Cursor::new(rar4_archive());
        let opts = LockOptions { read_len: 16 };
        assert!(matches!(
            lock_stream(&mut stream, LockState::Locked, &opts),
            Err(RarError::BufferOverrun { needed: 20, have: 16 })
        ));
    }

    #[test]
    fn test_lock_file_round_trip() {
        let original = rar4_archive();
        let archive = temp_archive(&original);
        let path = archive.path();

        let locked = lock_file(path, LockState::Locked).unwrap();
        assert_eq!(locked.state(), LockState::Locked);
        let on_disk = std::fs::read(path).unwrap();
        assert_eq!(on_disk.len(), original.len());
        assert_eq!(on_disk[10], 0x04);

        let again = lock_file(path, LockState::Locked).unwrap();
        assert!(!again.is_changed());

        lock_file(path, LockState::Unlocked).unwrap();
        assert_eq!(std::fs::read(path).unwrap(), original);
    }

    #[test]
    fn test_local_archive_lock() {
        let original = rar4_archive();
        let archive = temp_archive(&original);
        let local = LocalArchive::new(archive.path());

        assert_eq!(local.path(), archive.path());
        assert!(local.name().starts_with("rar-lock-"));
        assert!(local.name().ends_with(".rar"));

        let outcome = local.lock(LockState::Locked, &LockOptions::default()).unwrap();
        assert_eq!(outcome.write_span(), Some(ByteSpan::new(7, 4)));
        let on_disk = std::fs::read(archive.path()).unwrap();
        assert_eq!(&on_disk[7..11], &[0xB5, 0x30, 0x73, 0x04]);
        assert_eq!(&on_disk[11..], &original[11..]);

        // Options are honoured per call
        let short = LockOptions { read_len: 16 };
        assert!(matches!(
            local.lock(LockState::Unlocked, &short),
            Err(RarError::BufferOverrun { needed: 20, have: 16 })
        ));
        assert_eq!(std::fs::read(archive.path()).unwrap(), on_disk);
    }

    #[test]
    fn test_local_archive_name() {
        assert_eq!(LocalArchive::new("/tmp/backup.rar").name(), "backup.rar");
        assert_eq!(LocalArchive::new("/").name(), "");
    }

    #[test]
    fn test_lock_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.rar");
        assert!(matches!(
            lock_file(&path, LockState::Locked),
            Err(RarError::FileOpen(_))
        ));
    }

    #[test]
    fn test_lock_file_not_rar() {
        let archive = temp_archive(b"just some text, not an archive");
        assert!(matches!(
            lock_file(archive.path(), LockState::Locked),
            Err(RarError::NotARarFile)
        ));
        assert_eq!(
            std::fs::read(archive.path()).unwrap(),
            b"just some text, not an archive"
        );
    }

    #[test]
    fn test_lock_file_empty() {
        let archive = temp_archive(&[]);
        assert!(matches!(
            lock_file(archive.path(), LockState::Locked),
            Err(RarError::FileRead(_))
        ));
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn test_lock_file_async() {
        let original = rar4_archive();
        let archive = temp_archive(&original);

        let outcome = lock_file_async(archive.path(), LockState::Locked, &LockOptions::default())
            .await
            .unwrap();
        assert_eq!(outcome.write_span(), Some(ByteSpan::new(7, 4)));
        let on_disk = tokio::fs::read(archive.path()).await.unwrap();
        assert_eq!(on_disk.len(), original.len());
        assert_eq!(&on_disk[7..11], &[0xB5, 0x30, 0x73, 0x04]);

        let again = LocalArchive::new(archive.path())
            .lock_async(LockState::Locked, &LockOptions::default())
            .await
            .unwrap();
        assert!(!again.is_changed());
    }
}
