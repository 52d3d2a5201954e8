use std::io::Write;
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FaceIdError;

/// Default consumer address for [`TcpSink`].
pub const DEFAULT_SINK_ADDR: &str = "127.0.0.1:5002";

/// What gets reported for each resolved face.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub identity: String,
    pub is_new: bool,
}

/// Delivers outcome records to an external consumer.
///
/// Delivery is best effort: callers log failures and move on, and nothing
/// about the identity store depends on a record arriving.
pub trait OutcomeSink: Send + Sync {
    fn send(&self, record: &OutcomeRecord) -> Result<(), FaceIdError>;
}

/// Sends each record as one JSON object over a fresh TCP connection.
pub struct TcpSink {
    addr: String,
    timeout: Duration,
}

impl TcpSink {
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            timeout: Duration::from_secs(2),
        }
    }

    /// Bounds both connecting and writing.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }
}

impl OutcomeSink for TcpSink {
    fn send(&self, record: &OutcomeRecord) -> Result<(), FaceIdError> {
        let payload =
            serde_json::to_vec(record).map_err(|e| FaceIdError::Transport(e.to_string()))?;

        let addr = self
            .addr
            .to_socket_addrs()
            .map_err(|e| FaceIdError::Transport(format!("resolve {}: {}", self.addr, e)))?
            .next()
            .ok_or_else(|| FaceIdError::Transport(format!("no address for {}", self.addr)))?;

        let mut stream = TcpStream::connect_timeout(&addr, self.timeout)
            .map_err(|e| FaceIdError::Transport(format!("connect {}: {}", addr, e)))?;
        stream
            .set_write_timeout(Some(self.timeout))
            .map_err(|e| FaceIdError::Transport(e.to_string()))?;
        stream
            .write_all(&payload)
            .map_err(|e| FaceIdError::Transport(format!("write {}: {}", addr, e)))?;
        let _ = stream.shutdown(Shutdown::Write);

        debug!("sent {} to {}", String::from_utf8_lossy(&payload), addr);
        Ok(())
    }
}

/// Discards every record.
pub struct NopSink;

impl OutcomeSink for NopSink {
    fn send(&self, _record: &OutcomeRecord) -> Result<(), FaceIdError> {
        Ok(())
    }
}

/// Keeps records in memory. Suitable for testing.
#[derive(Default)]
pub struct MemorySink {
    records: Mutex<Vec<OutcomeRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<OutcomeRecord> {
        self.records.lock().clone()
    }
}

impl OutcomeSink for MemorySink {
    fn send(&self, record: &OutcomeRecord) -> Result<(), FaceIdError> {
        self.records.lock().push(record.clone());
        Ok(())
    }
}
