//! Byte transports for ontology documents
//!
//! - [`FileTransport`]: local filesystem
//! - [`HttpTransport`]: blocking HTTP(S) fetch
//! - [`DefaultTransport`]: dispatches on the locator kind
//! - [`MockTransport`]: in-memory documents for tests

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use termgraph_domain::{Locator, Transport, TransportError};
use tracing::debug;

/// Reads documents from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FileTransport;

impl Transport for FileTransport {
    fn fetch(&self, locator: &Locator) -> Result<Vec<u8>, TransportError> {
        let Locator::Path(path) = locator else {
            return Err(TransportError::Failure(format!(
                "{} is not a local path",
                locator
            )));
        };
        if !path.exists() {
            return Err(TransportError::NotFound(path.display().to_string()));
        }
        std::fs::read(path).map_err(|e| TransportError::Failure(e.to_string()))
    }
}

/// Fetches documents over HTTP(S) with a blocking client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    timeout: Duration,
}

impl HttpTransport {
    /// Create a transport whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn client(&self) -> Result<reqwest::blocking::Client, TransportError> {
        reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| TransportError::Failure(e.to_string()))
    }
}

impl Transport for HttpTransport {
    fn fetch(&self, locator: &Locator) -> Result<Vec<u8>, TransportError> {
        let Locator::Url(url) = locator else {
            return Err(TransportError::Failure(format!("{} is not a URL", locator)));
        };
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(TransportError::Failure(format!("unsupported scheme: {}", url)));
        }

        debug!(url = %url, "Fetching remote document");
        let response = self
            .client()?
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(describe)?;
        let bytes = response.bytes().map_err(describe)?;
        Ok(bytes.to_vec())
    }
}

fn describe(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Failure(format!("request timed out: {}", e))
    } else if let Some(status) = e.status() {
        TransportError::Failure(format!("HTTP {}", status))
    } else {
        TransportError::Failure(e.to_string())
    }
}

/// Local paths through [`FileTransport`], URLs through [`HttpTransport`]
#[derive(Debug, Clone)]
pub struct DefaultTransport {
    file: FileTransport,
    http: HttpTransport,
}

impl DefaultTransport {
    /// Create a dispatcher with the given remote fetch timeout
    pub fn new(fetch_timeout: Duration) -> Self {
        Self {
            file: FileTransport,
            http: HttpTransport::new(fetch_timeout),
        }
    }
}

impl Transport for DefaultTransport {
    fn fetch(&self, locator: &Locator) -> Result<Vec<u8>, TransportError> {
        if locator.is_remote() {
            self.http.fetch(locator)
        } else {
            self.file.fetch(locator)
        }
    }
}

/// In-memory transport for deterministic testing
///
/// Documents are keyed by the locator's display form. Unknown locators
/// report `NotFound`; locators marked failing report a transport failure.
///
/// # Examples
///
/// ```
/// use termgraph_domain::{Locator, Transport};
/// use termgraph_ontology::MockTransport;
///
/// let mut transport = MockTransport::new();
/// transport.add_document("mem/a.json", "{}");
/// transport.add_failure("http://down.example.org/b.json");
///
/// assert!(transport.fetch(&Locator::parse("mem/a.json").unwrap()).is_ok());
/// assert!(transport.fetch(&Locator::parse("http://down.example.org/b.json").unwrap()).is_err());
/// assert_eq!(transport.call_count(), 2);
/// ```
#[derive(Debug, Default)]
pub struct MockTransport {
    documents: HashMap<String, Vec<u8>>,
    failing: HashSet<String>,
    calls: AtomicUsize,
}

impl MockTransport {
    /// Create an empty mock
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `bytes` for `locator`
    pub fn add_document(&mut self, locator: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.documents.insert(locator.into(), bytes.into());
    }

    /// Make fetches of `locator` fail
    pub fn add_failure(&mut self, locator: impl Into<String>) {
        self.failing.insert(locator.into());
    }

    /// Number of fetches attempted
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Transport for MockTransport {
    fn fetch(&self, locator: &Locator) -> Result<Vec<u8>, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let key = locator.to_string();
        if self.failing.contains(&key) {
            return Err(TransportError::Failure(format!("mock failure for {}", key)));
        }
        self.documents
            .get(&key)
            .cloned()
            .ok_or(TransportError::NotFound(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_file_transport_missing_path() {
        let locator = Locator::parse("/definitely/not/here.json").unwrap();
        assert!(matches!(
            FileTransport.fetch(&locator),
            Err(TransportError::NotFound(_))
        ));
    }

    #[test]
    fn test_file_transport_reads_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"A\": {\"id\": \"A\"}}").unwrap();
        let locator = Locator::Path(file.path().to_path_buf());

        let bytes = FileTransport.fetch(&locator).unwrap();
        assert!(bytes.starts_with(b"{"));
    }

    #[test]
    fn test_ftp_is_unsupported() {
        let locator = Locator::parse("ftp://example.org/go.json").unwrap();
        let result = HttpTransport::new(Duration::from_secs(1)).fetch(&locator);
        assert!(matches!(result, Err(TransportError::Failure(m)) if m.contains("unsupported scheme")));
    }

    #[test]
    fn test_default_transport_dispatches_paths_to_files() {
        let transport = DefaultTransport::new(Duration::from_secs(1));
        let locator = Locator::parse("missing/dir/x.json").unwrap();
        assert!(matches!(
            transport.fetch(&locator),
            Err(TransportError::NotFound(_))
        ));
    }

    #[test]
    fn test_mock_transport() {
        let mut transport = MockTransport::new();
        transport.add_document("a.json", "{}");
        transport.add_failure("b.json");

        assert_eq!(transport.fetch(&Locator::parse("a.json").unwrap()).unwrap(), b"{}");
        assert!(matches!(
            transport.fetch(&Locator::parse("b.json").unwrap()),
            Err(TransportError::Failure(_))
        ));
        assert!(matches!(
            transport.fetch(&Locator::parse("c.json").unwrap()),
            Err(TransportError::NotFound(_))
        ));
        assert_eq!(transport.call_count(), 3);
    }
}
