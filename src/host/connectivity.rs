//! Online/offline tracking
//!
//! Desktops don't deliver browser-style online/offline events, so the Maps
//! screen polls a TCP reachability probe and applies every answer as it
//! arrives.

use std::time::Duration;
use tokio::net::TcpStream;

/// Whether the network is currently usable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityStatus {
    #[default]
    Online,
    Offline,
}

impl ConnectivityStatus {
    pub fn is_online(&self) -> bool {
        matches!(self, ConnectivityStatus::Online)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConnectivityStatus::Online => "Online",
            ConnectivityStatus::Offline => "Offline",
        }
    }
}

/// Try to open a TCP connection to `address` within `timeout`
pub async fn probe(address: String, timeout: Duration) -> ConnectivityStatus {
    match tokio::time::timeout(timeout, TcpStream::connect(address.as_str())).await {
        Ok(Ok(_stream)) => ConnectivityStatus::Online,
        Ok(Err(e)) => {
            tracing::debug!("Connectivity probe to {} failed: {}", address, e);
            ConnectivityStatus::Offline
        }
        Err(_) => {
            tracing::debug!("Connectivity probe to {} timed out", address);
            ConnectivityStatus::Offline
        }
    }
}
