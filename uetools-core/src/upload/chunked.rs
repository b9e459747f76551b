// ============================================================================
// uetools-core/src/upload/chunked.rs
// ============================================================================
//
// CHUNKED FILE: Bounded-Memory Streaming of a Local File
//
// A `ChunkedFile` captures the file size once at open and then yields the
// file as fixed-size chunks, reporting the cumulative byte count to a
// progress sink after each one. It never reads past the captured size, so
// the bytes produced always match the declared content length.
//
// KEY COMPONENTS:
// - Chunk: One segment of the file plus the cumulative count after it
// - ChunkedFile: Iterator over chunks that owns the file handle
// - ChunkReader: `std::io::Read` adapter holding at most one chunk
//
// The file handle is dropped as soon as the last chunk has been produced
// or a read fails.
//
// AI-ASSISTANT-INFO: Chunked file iterator feeding the upload transport

use super::progress::{NullProgress, ProgressSink};
use crate::error::{CoreError, CoreResult};

use log::debug;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Default chunk size in bytes.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// A segment of the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub data: Vec<u8>,
    /// Bytes produced so far, this chunk included.
    pub sent: u64,
}

/// A local file exposed as a finite, ordered sequence of chunks.
pub struct ChunkedFile {
    path: PathBuf,
    file: Option<File>,
    total: u64,
    sent: u64,
    chunk_size: usize,
    progress: Box<dyn ProgressSink + Send>,
}

impl ChunkedFile {
    /// Opens `path` and records its current size as the total length.
    pub fn open(path: impl AsRef<Path>, chunk_size: usize) -> CoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        if chunk_size == 0 {
            return Err(CoreError::InvalidChunkSize);
        }
        let source_error = |source| CoreError::SourceFile {
            path: path.clone(),
            source,
        };
        let file = File::open(&path).map_err(source_error)?;
        let metadata = file.metadata().map_err(source_error)?;
        if metadata.is_dir() {
            return Err(source_error(io::Error::new(
                io::ErrorKind::InvalidInput,
                "is a directory",
            )));
        }
        let total = metadata.len();
        debug!(
            "Opened {} ({} bytes, {} byte chunks)",
            path.display(),
            total,
            chunk_size
        );

        Ok(Self {
            path,
            file: Some(file),
            total,
            sent: 0,
            chunk_size,
            progress: Box::new(NullProgress),
        })
    }

    pub fn with_progress(mut self, progress: Box<dyn ProgressSink + Send>) -> Self {
        self.progress = progress;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size captured at open; the declared length of the stream.
    pub fn total_size(&self) -> u64 {
        self.total
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn sent(&self) -> u64 {
        self.sent
    }

    /// True once the file handle has been closed.
    pub fn is_released(&self) -> bool {
        self.file.is_none()
    }

    pub fn into_reader(self) -> ChunkReader {
        ChunkReader::new(self)
    }

    fn release(&mut self) {
        if self.file.take().is_some() {
            self.progress.finish();
        }
    }

    fn fail(&mut self, source: io::Error) -> CoreError {
        self.release();
        CoreError::SourceFile {
            path: self.path.clone(),
            source,
        }
    }
}

impl Iterator for ChunkedFile {
    type Item = CoreResult<Chunk>;

    fn next(&mut self) -> Option<Self::Item> {
        let file = self.file.as_mut()?;

        let remaining = self.total - self.sent;
        if remaining == 0 {
            // Only reachable for an empty file; otherwise the handle is
            // released together with the final chunk.
            self.progress.update(0);
            self.release();
            return None;
        }

        let want = remaining.min(self.chunk_size as u64) as usize;
        let mut data = vec![0u8; want];
        let mut filled = 0;
        while filled < want {
            match file.read(&mut data[filled..]) {
                Ok(0) => {
                    return Some(Err(self.fail(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        format!(
                            "file shrank during upload ({} of {} bytes read)",
                            self.sent + filled as u64,
                            self.total
                        ),
                    ))));
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Some(Err(self.fail(e))),
            }
        }

        self.sent += want as u64;
        self.progress.update(self.sent);
        if self.sent == self.total {
            self.release();
        }
        Some(Ok(Chunk {
            data,
            sent: self.sent,
        }))
    }
}

impl std::fmt::Debug for ChunkedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkedFile")
            .field("path", &self.path)
            .field("total", &self.total)
            .field("sent", &self.sent)
            .field("chunk_size", &self.chunk_size)
            .field("released", &self.is_released())
            .finish()
    }
}

/// Adapts a [`ChunkedFile`] to [`Read`], pulling a chunk only when the
/// previous one has been consumed.
#[derive(Debug)]
pub struct ChunkReader {
    chunks: ChunkedFile,
    current: Vec<u8>,
    position: usize,
}

impl ChunkReader {
    pub fn new(chunks: ChunkedFile) -> Self {
        Self {
            chunks,
            current: Vec::new(),
            position: 0,
        }
    }

    pub fn content_length(&self) -> u64 {
        self.chunks.total_size()
    }

    pub fn is_released(&self) -> bool {
        self.chunks.is_released()
    }
}

impl Read for ChunkReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if self.position >= self.current.len() {
            match self.chunks.next() {
                None => return Ok(0),
                Some(Err(e)) => return Err(io::Error::other(e)),
                Some(Ok(chunk)) => {
                    self.current = chunk.data;
                    self.position = 0;
                }
            }
        }
        let available = &self.current[self.position..];
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.position += n;
        Ok(n)
    }
}
