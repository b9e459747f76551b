// uetools-core/src/upload/mocks.rs

// --- Mocking Infrastructure (for testing) ---

use super::transport::{HttpTransport, RegistryResponse, UploadRequest};
use crate::error::CoreResult;
use std::cell::RefCell;
use std::io::Read;
use std::rc::Rc;

/// What a [`RecordingTransport`] saw of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url: String,
    pub header: (&'static str, String),
    pub content_length: u64,
    pub body: Vec<u8>,
}

/// Transport double that drains the body and answers with a fixed response.
#[derive(Debug, Clone)]
pub struct RecordingTransport {
    response: RegistryResponse,
    requests: Rc<RefCell<Vec<RecordedRequest>>>,
}

impl RecordingTransport {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            response: RegistryResponse {
                status,
                body: body.into(),
            },
            requests: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }
}

impl HttpTransport for RecordingTransport {
    fn put(&self, mut request: UploadRequest) -> CoreResult<RegistryResponse> {
        let mut body = Vec::new();
        request.body.read_to_end(&mut body)?;
        self.requests.borrow_mut().push(RecordedRequest {
            url: request.url,
            header: request.header,
            content_length: request.content_length,
            body,
        });
        Ok(self.response.clone())
    }
}
