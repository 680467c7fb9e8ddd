//! JACK backend for the graph server contract
//!
//! Wraps an activated async JACK client. The notification handler runs on
//! JACK's own thread; its only permitted action is raising the change
//! signal, so every real state transition stays on the UI thread.

use tracing::{debug, info};

use crate::graph::{PortCategory, PortDirection};
use crate::server::{GraphServer, PortInfo, ServerError};
use crate::signal::ChangeSignal;

/// Raises the change signal on every topology callback. Never touches
/// snapshot or view state.
struct Notifications {
    signal: ChangeSignal,
}

impl jack::NotificationHandler for Notifications {
    fn graph_reorder(&mut self, _: &jack::Client) -> jack::Control {
        self.signal.raise();
        jack::Control::Continue
    }

    fn port_registration(&mut self, _: &jack::Client, _port: jack::PortId, _registered: bool) {
        self.signal.raise();
    }

    fn ports_connected(
        &mut self,
        _: &jack::Client,
        _port_a: jack::PortId,
        _port_b: jack::PortId,
        _connected: bool,
    ) {
        self.signal.raise();
    }
}

/// Live JACK connection implementing [`GraphServer`].
pub struct JackServer {
    client: jack::AsyncClient<Notifications, ()>,
}

impl JackServer {
    /// Open a client against a running server and activate it with the
    /// change-notification handler. Never starts a server of its own.
    pub fn connect(name: &str, signal: ChangeSignal) -> Result<Self, ServerError> {
        let (client, status) = jack::Client::new(name, jack::ClientOptions::NO_START_SERVER)
            .map_err(|e| ServerError::Unavailable(e.to_string()))?;
        debug!("opened JACK client {name}, status {status:?}");

        let client = client
            .activate_async(Notifications { signal }, ())
            .map_err(|e| ServerError::Unavailable(e.to_string()))?;
        info!("JACK client {name} activated");

        Ok(Self { client })
    }

    fn client(&self) -> &jack::Client {
        self.client.as_client()
    }
}

impl GraphServer for JackServer {
    fn port_names(&self) -> Vec<String> {
        self.client().ports(None, None, jack::PortFlags::empty())
    }

    fn port_info(&self, name: &str) -> Option<PortInfo> {
        let port = self.client().port_by_name(name)?;
        let category = PortCategory::from_port_type(&port.port_type().ok()?)?;
        let flags = port.flags();
        let direction = if flags.contains(jack::PortFlags::IS_INPUT) {
            PortDirection::Destination
        } else if flags.contains(jack::PortFlags::IS_OUTPUT) {
            PortDirection::Source
        } else {
            return None;
        };
        Some(PortInfo {
            category,
            direction,
        })
    }

    fn peers_of(&self, destination: &str) -> Vec<String> {
        // The safe API has no get-all-connections call; asking the
        // destination port about each source port gives the same answer.
        let Some(port) = self.client().port_by_name(destination) else {
            return Vec::new();
        };
        self.client()
            .ports(None, None, jack::PortFlags::IS_OUTPUT)
            .into_iter()
            .filter(|source| port.is_connected_to(source).unwrap_or(false))
            .collect()
    }

    fn connect(&self, source: &str, destination: &str) -> Result<(), ServerError> {
        self.client()
            .connect_ports_by_name(source, destination)
            .map_err(|e| ServerError::Rejected(e.to_string()))
    }

    fn disconnect(&self, source: &str, destination: &str) -> Result<(), ServerError> {
        self.client()
            .disconnect_ports_by_name(source, destination)
            .map_err(|e| ServerError::Rejected(e.to_string()))
    }

    fn cpu_load(&self) -> f32 {
        self.client().cpu_load()
    }

    fn is_realtime(&self) -> bool {
        // The safe `jack` wrapper does not expose jack_is_realtime; call
        // the underlying C function through the raw client handle.
        unsafe { jack_sys::jack_is_realtime(self.client().raw()) != 0 }
    }
}
