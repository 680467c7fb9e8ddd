//! In-memory graph server
//!
//! A scriptable [`GraphServer`] used by the test suite to play both the
//! server and the third-party-client role: tests keep a cloned handle to
//! the shared state and mutate the graph behind the app's back, raising
//! the change signal the way the real notification thread would.

use std::sync::{Arc, Mutex};

use crate::graph::{PortCategory, PortDirection};
use crate::server::{GraphServer, PortInfo, ServerError};
use crate::signal::ChangeSignal;

#[derive(Default)]
struct Inner {
    ports: Vec<FakePort>,
    links: Vec<(String, String)>,
    hidden: Vec<String>,
    fail_connects: bool,
    fail_disconnects: bool,
    cpu_load: f32,
    realtime: bool,
    signal: Option<ChangeSignal>,
}

struct FakePort {
    name: String,
    info: PortInfo,
}

/// Cloneable in-memory server; clones share one graph.
#[derive(Clone, Default)]
pub struct FakeServer {
    inner: Arc<Mutex<Inner>>,
}

impl FakeServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise this signal on every graph mutation, mimicking the server's
    /// asynchronous notification callback.
    pub fn notify(&self, signal: ChangeSignal) {
        self.inner.lock().unwrap().signal = Some(signal);
    }

    pub fn add_port(&self, name: &str, category: PortCategory, direction: PortDirection) {
        let mut inner = self.inner.lock().unwrap();
        inner.ports.push(FakePort {
            name: name.to_string(),
            info: PortInfo {
                category,
                direction,
            },
        });
        Self::raise(&inner);
    }

    pub fn remove_port(&self, name: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.ports.retain(|p| p.name != name);
        inner
            .links
            .retain(|(src, dst)| src != name && dst != name);
        Self::raise(&inner);
    }

    /// Make `port_info` answer `None` for a name that `port_names` still
    /// reports, as happens when a port disappears mid-enumeration.
    pub fn hide_port_info(&self, name: &str) {
        self.inner.lock().unwrap().hidden.push(name.to_string());
    }

    /// Wire two ports directly, bypassing validation, as another client
    /// would.
    pub fn link(&self, source: &str, destination: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner
            .links
            .push((source.to_string(), destination.to_string()));
        Self::raise(&inner);
    }

    pub fn unlink(&self, source: &str, destination: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner
            .links
            .retain(|(src, dst)| !(src == source && dst == destination));
        Self::raise(&inner);
    }

    pub fn link_count(&self) -> usize {
        self.inner.lock().unwrap().links.len()
    }

    pub fn fail_connects(&self, fail: bool) {
        self.inner.lock().unwrap().fail_connects = fail;
    }

    pub fn fail_disconnects(&self, fail: bool) {
        self.inner.lock().unwrap().fail_disconnects = fail;
    }

    pub fn set_cpu_load(&self, load: f32) {
        self.inner.lock().unwrap().cpu_load = load;
    }

    pub fn set_realtime(&self, realtime: bool) {
        self.inner.lock().unwrap().realtime = realtime;
    }

    fn raise(inner: &Inner) {
        if let Some(signal) = &inner.signal {
            signal.raise();
        }
    }
}

impl GraphServer for FakeServer {
    fn port_names(&self) -> Vec<String> {
        let inner = self.inner.lock().unwrap();
        inner.ports.iter().map(|p| p.name.clone()).collect()
    }

    fn port_info(&self, name: &str) -> Option<PortInfo> {
        let inner = self.inner.lock().unwrap();
        if inner.hidden.iter().any(|h| h == name) {
            return None;
        }
        inner
            .ports
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.info)
    }

    fn peers_of(&self, destination: &str) -> Vec<String> {
        let inner = self.inner.lock().unwrap();
        inner
            .links
            .iter()
            .filter(|(_, dst)| dst == destination)
            .map(|(src, _)| src.clone())
            .collect()
    }

    fn connect(&self, source: &str, destination: &str) -> Result<(), ServerError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_connects {
            return Err(ServerError::Rejected("connect refused".into()));
        }
        let find = |name: &str| inner.ports.iter().find(|p| p.name == name).map(|p| p.info);
        let src = find(source).ok_or_else(|| ServerError::Rejected(format!("no such port: {source}")))?;
        let dst = find(destination)
            .ok_or_else(|| ServerError::Rejected(format!("no such port: {destination}")))?;
        if src.direction != PortDirection::Source || dst.direction != PortDirection::Destination {
            return Err(ServerError::Rejected("direction mismatch".into()));
        }
        if src.category != dst.category {
            return Err(ServerError::Rejected("type mismatch".into()));
        }
        if inner
            .links
            .iter()
            .any(|(s, d)| s == source && d == destination)
        {
            return Err(ServerError::Rejected("already connected".into()));
        }
        inner
            .links
            .push((source.to_string(), destination.to_string()));
        Self::raise(&inner);
        Ok(())
    }

    fn disconnect(&self, source: &str, destination: &str) -> Result<(), ServerError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_disconnects {
            return Err(ServerError::Rejected("disconnect refused".into()));
        }
        let before = inner.links.len();
        inner
            .links
            .retain(|(s, d)| !(s == source && d == destination));
        if inner.links.len() == before {
            return Err(ServerError::Rejected("not connected".into()));
        }
        Self::raise(&inner);
        Ok(())
    }

    fn cpu_load(&self) -> f32 {
        self.inner.lock().unwrap().cpu_load
    }

    fn is_realtime(&self) -> bool {
        self.inner.lock().unwrap().realtime
    }
}
