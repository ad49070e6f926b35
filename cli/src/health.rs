//! Health check endpoint

use serde::Serialize;
use std::sync::OnceLock;
use std::time::Instant;

static START_TIME: OnceLock<Instant> = OnceLock::new();

pub fn init_start_time() {
    START_TIME.get_or_init(Instant::now);
}

pub fn uptime_seconds() -> u64 {
    START_TIME
        .get()
        .map_or(0, |start| start.elapsed().as_secs())
}

/// Health status response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    /// Size in bytes of the current document
    pub document_size: usize,
}

impl HealthStatus {
    pub fn new(document_size: usize) -> Self {
        Self {
            status: "healthy",
            version: env!("CARGO_PKG_VERSION"),
            uptime_seconds: uptime_seconds(),
            document_size,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
