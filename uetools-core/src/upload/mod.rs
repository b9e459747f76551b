//! Chunked, progress-tracked upload of build artifacts to a generic
//! package registry.

mod chunked;
mod progress;
mod registry;
mod transport;

#[cfg(any(test, feature = "test-mocks"))]
pub mod mocks;

pub use chunked::{Chunk, ChunkReader, ChunkedFile, DEFAULT_CHUNK_SIZE};
pub use progress::{NullProgress, ProgressSink, RecordingProgress};
pub use registry::{Credential, RegistryTarget};
pub use transport::{
    HttpTransport, RegistryResponse, ReqwestTransport, UploadRequest, upload_package,
};
