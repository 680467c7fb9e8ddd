//! Audio-server collaborator contract
//!
//! Everything the engine needs from the server goes through the
//! [`GraphServer`] trait: port enumeration, per-port flags, live peers of
//! a destination port, connect/disconnect, and the two status-line
//! scalars. The JACK backend implements it in `jack_server`; tests drive
//! the engine with `fake_server`.

use std::error::Error;
use std::fmt;

use crate::graph::{PortCategory, PortDirection};

/// Category and direction flags for one named port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortInfo {
    pub category: PortCategory,
    pub direction: PortDirection,
}

/// Client view of the audio server's routing graph.
///
/// Implementations answer from the live server, so two calls may see
/// different graphs. The engine copes by capturing snapshots and carrying
/// names, not handles, across call boundaries.
pub trait GraphServer {
    /// Every port name the server currently knows, in server order.
    fn port_names(&self) -> Vec<String>;

    /// Flags for a named port, or `None` if it no longer exists or has a
    /// port type outside the two supported categories.
    fn port_info(&self, name: &str) -> Option<PortInfo>;

    /// Names of the source ports currently feeding a destination port,
    /// in server-reported order. Empty if the port is unknown.
    fn peers_of(&self, destination: &str) -> Vec<String>;

    fn connect(&self, source: &str, destination: &str) -> Result<(), ServerError>;

    fn disconnect(&self, source: &str, destination: &str) -> Result<(), ServerError>;

    /// Current DSP load estimate, in percent.
    fn cpu_load(&self) -> f32;

    /// Whether the server runs with realtime scheduling.
    fn is_realtime(&self) -> bool;
}

/// Failures reported by a [`GraphServer`] backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerError {
    /// The server is unreachable (refused the client, or went away).
    Unavailable(String),
    /// The server rejected a connect or disconnect request. Covers type
    /// mismatches, already-connected pairs, and names that went stale
    /// between snapshot and command.
    Rejected(String),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Unavailable(reason) => {
                write!(f, "audio server unavailable: {reason}")
            }
            ServerError::Rejected(reason) => write!(f, "request rejected: {reason}"),
        }
    }
}

impl Error for ServerError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_render_their_reason() {
        let err = ServerError::Unavailable("JACK server not running".into());
        assert_eq!(
            err.to_string(),
            "audio server unavailable: JACK server not running"
        );

        let err = ServerError::Rejected("already connected".into());
        assert_eq!(err.to_string(), "request rejected: already connected");
    }
}
