//! Mock device link for testing

use super::DeviceLink;
use crate::error::Result;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Mock device link for unit testing
///
/// Responses are served from a scripted queue; once the queue is empty the
/// default response body is returned. Every requested path is recorded, and
/// `get_to_file` captures are recorded separately (no file is written).
#[derive(Clone)]
pub struct MockLink {
    inner: Arc<Mutex<MockLinkInner>>,
}

struct MockLinkInner {
    responses: VecDeque<Vec<u8>>,
    default_response: Vec<u8>,
    requests: Vec<String>,
    captures: Vec<(String, PathBuf)>,
}

impl MockLink {
    /// Create a new mock link whose default response is `b"ok"`
    pub fn new() -> Self {
        MockLink {
            inner: Arc::new(Mutex::new(MockLinkInner {
                responses: VecDeque::new(),
                default_response: b"ok".to_vec(),
                requests: Vec::new(),
                captures: Vec::new(),
            })),
        }
    }

    /// Queue a scripted response body for the next `get` call
    pub fn push_response(&self, body: &[u8]) {
        let mut inner = self.inner.lock().unwrap();
        inner.responses.push_back(body.to_vec());
    }

    /// Replace the body returned once the scripted queue is exhausted
    pub fn set_default_response(&self, body: &[u8]) {
        let mut inner = self.inner.lock().unwrap();
        inner.default_response = body.to_vec();
    }

    /// All paths requested so far, in order (both `get` and `get_to_file`)
    pub fn requests(&self) -> Vec<String> {
        let inner = self.inner.lock().unwrap();
        inner.requests.clone()
    }

    /// All `get_to_file` captures so far, in order
    pub fn captures(&self) -> Vec<(String, PathBuf)> {
        let inner = self.inner.lock().unwrap();
        inner.captures.clone()
    }

    /// Clear the request and capture logs
    pub fn clear_requests(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.requests.clear();
        inner.captures.clear();
    }
}

impl Default for MockLink {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceLink for MockLink {
    fn get(&mut self, path: &str) -> Result<Vec<u8>> {
        let mut inner = self.inner.lock().unwrap();
        inner.requests.push(path.to_string());
        let body = inner
            .responses
            .pop_front()
            .unwrap_or_else(|| inner.default_response.clone());
        Ok(body)
    }

    fn get_to_file(&mut self, path: &str, dst: &Path) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.requests.push(path.to_string());
        inner.captures.push((path.to_string(), dst.to_path_buf()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_then_default_responses() {
        let link = MockLink::new();
        link.push_response(b"first");
        link.set_default_response(b"fallback");

        let mut handle = link.clone();
        assert_eq!(handle.get("/a").unwrap(), b"first");
        assert_eq!(handle.get("/b").unwrap(), b"fallback");
        assert_eq!(link.requests(), vec!["/a".to_string(), "/b".to_string()]);
    }

    #[test]
    fn test_captures_recorded() {
        let link = MockLink::new();
        let mut handle = link.clone();
        handle
            .get_to_file("/snapshot/full.jpg", Path::new("out/pic_0.jpg"))
            .unwrap();

        let captures = link.captures();
        assert_eq!(captures.len(), 1);
        assert_eq!(captures[0].0, "/snapshot/full.jpg");
        assert_eq!(captures[0].1, PathBuf::from("out/pic_0.jpg"));
    }
}
