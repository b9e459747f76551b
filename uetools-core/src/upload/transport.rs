// ============================================================================
// uetools-core/src/upload/transport.rs
// ============================================================================
//
// UPLOAD TRANSPORT: Single Streamed PUT Against the Package Registry
//
// KEY COMPONENTS:
// - UploadRequest: URL, authentication header and a sized streaming body
// - HttpTransport: The HTTP capability consumed by the uploader
// - ReqwestTransport: Blocking reqwest implementation
// - upload_package: Builds the request, sends it, interprets the status
//
// Only HTTP 200 counts as success. Any other status becomes
// `CoreError::TransferFailed` carrying the response body.
//
// AI-ASSISTANT-INFO: HTTP transport and upload driver

use super::chunked::{ChunkReader, ChunkedFile};
use super::registry::RegistryTarget;
use crate::error::{CoreError, CoreResult};

use log::{debug, info, warn};
use std::time::Duration;

/// One PUT request with a body of known length.
#[derive(Debug)]
pub struct UploadRequest {
    pub url: String,
    pub header: (&'static str, String),
    pub body: ChunkReader,
    pub content_length: u64,
}

/// Status and body text of the registry's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryResponse {
    pub status: u16,
    pub body: String,
}

/// HTTP capability: a single PUT with a streamed body.
pub trait HttpTransport {
    /// Sends the request, consuming the body as the connection accepts it.
    ///
    /// A registry that rejects the request before reading the whole body
    /// may close the connection mid-transfer. The status and body of that
    /// early answer are then lost and the call fails with
    /// [`CoreError::UploadInterrupted`].
    fn put(&self, request: UploadRequest) -> CoreResult<RegistryResponse>;
}

/// Transport backed by a blocking reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new() -> CoreResult<Self> {
        // Large artifacts take as long as they take.
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<Duration>)
            .user_agent(concat!("uetools/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// Uses a preconfigured client, e.g. one with custom proxy settings.
    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    fn put(&self, request: UploadRequest) -> CoreResult<RegistryResponse> {
        let (name, value) = request.header;
        let body = reqwest::blocking::Body::sized(request.body, request.content_length);
        let response = self
            .client
            .put(&request.url)
            .header(name, value)
            .body(body)
            .send()
            .map_err(|e| send_error(&request.url, e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .unwrap_or_else(|_| String::from("<failed to decode response body>"));
        Ok(RegistryResponse { status, body })
    }
}

fn send_error(url: &str, error: reqwest::Error) -> CoreError {
    if (error.is_body() || error.is_request()) && !error.is_connect() && !error.is_timeout() {
        CoreError::UploadInterrupted {
            url: url.to_string(),
            source: error,
        }
    } else {
        CoreError::Http(error)
    }
}

/// Streams `source` to `target` in one PUT.
pub fn upload_package<T>(transport: &T, source: ChunkedFile, target: &RegistryTarget) -> CoreResult<()>
where
    T: HttpTransport + ?Sized,
{
    let url = target.url();
    let content_length = source.total_size();
    info!(
        "Uploading {} ({} bytes) to {}",
        source.path().display(),
        content_length,
        url
    );
    debug!("Authenticating with {:?}", target.credential);

    let request = UploadRequest {
        url,
        header: target.credential.header(),
        body: source.into_reader(),
        content_length,
    };
    let response = transport.put(request)?;

    if response.status == 200 {
        info!("Registry accepted the upload");
        return Ok(());
    }
    warn!("Registry answered HTTP {}", response.status);
    Err(CoreError::TransferFailed {
        status: response.status,
        body: response.body,
    })
}
