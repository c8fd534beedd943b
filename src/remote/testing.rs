//! In-memory [`RemoteSource`] used by unit tests.

use std::cell::RefCell;
use std::collections::BTreeMap;

use super::{RemoteSource, TransportError};

#[derive(Clone, Debug)]
enum Entry {
    File(Vec<u8>),
    Status(u16),
    Broken,
}

/// Fake remote keyed by full URL. Unknown URLs answer 404.
#[derive(Debug, Default)]
pub struct FakeRemote {
    entries: BTreeMap<String, Entry>,
    gets: RefCell<Vec<String>>,
    heads: RefCell<Vec<String>>,
}

impl FakeRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, url: &str, body: &[u8]) -> Self {
        self.entries.insert(url.to_string(), Entry::File(body.to_vec()));
        self
    }

    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.entries.insert(url.to_string(), Entry::Status(status));
        self
    }

    /// Requests to `url` fail without a response.
    pub fn with_broken(mut self, url: &str) -> Self {
        self.entries.insert(url.to_string(), Entry::Broken);
        self
    }

    pub fn get_urls(&self) -> Vec<String> {
        self.gets.borrow().clone()
    }

    pub fn get_count(&self) -> usize {
        self.gets.borrow().len()
    }

    pub fn head_count(&self) -> usize {
        self.heads.borrow().len()
    }
}

impl RemoteSource for FakeRemote {
    fn get_bytes(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        self.gets.borrow_mut().push(url.to_string());
        match self.entries.get(url) {
            Some(Entry::File(body)) => Ok(body.clone()),
            Some(Entry::Status(status)) if (200..300).contains(status) => Ok(Vec::new()),
            Some(Entry::Status(status)) => Err(TransportError::Status(*status)),
            Some(Entry::Broken) => Err(TransportError::Transport("connection reset".into())),
            None => Err(TransportError::Status(404)),
        }
    }

    fn head_status(&self, url: &str) -> Result<u16, TransportError> {
        self.heads.borrow_mut().push(url.to_string());
        match self.entries.get(url) {
            Some(Entry::File(_)) => Ok(200),
            Some(Entry::Status(status)) => Ok(*status),
            Some(Entry::Broken) => Err(TransportError::Transport("connection reset".into())),
            None => Ok(404),
        }
    }
}
