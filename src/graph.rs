//! Port graph data model
//!
//! A [`Snapshot`] is an immutable point-in-time copy of every port the
//! server knows. The three panes never look at the server directly: they
//! hold indices into the current snapshot, so one rebuild gives every
//! view the same consistent graph even while the server moves on.

use tracing::debug;

use crate::server::GraphServer;

/// Port type filter. Exactly one category is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortCategory {
    Audio,
    Midi,
}

impl PortCategory {
    /// Map a JACK port type string onto a category, if it is one of the
    /// two supported ones.
    pub fn from_port_type(port_type: &str) -> Option<Self> {
        match port_type {
            "32 bit float mono audio" => Some(PortCategory::Audio),
            "8 bit raw midi" => Some(PortCategory::Midi),
            _ => None,
        }
    }
}

/// Which way data flows through a port. A port is never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDirection {
    /// The port emits data (a JACK output port).
    Source,
    /// The port consumes data (a JACK input port).
    Destination,
}

/// One port, frozen at snapshot time. Never mutated, only discarded and
/// rebuilt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
    pub name: String,
    pub category: PortCategory,
    pub direction: PortDirection,
}

/// A live link, as indices into the snapshot that resolved it.
///
/// Connections are derived facts: two rebuilds may produce equal but
/// distinct values, and a connection is only meaningful next to the
/// snapshot it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub source: usize,
    pub destination: usize,
    pub category: PortCategory,
}

/// Immutable point-in-time copy of the server's port list.
#[derive(Debug, Default)]
pub struct Snapshot {
    ports: Vec<Port>,
}

impl Snapshot {
    /// Build a snapshot from the live server.
    ///
    /// Ports that vanish between enumeration and flag lookup are simply
    /// absent from the result, as are ports of unsupported types and
    /// duplicate names. An unreachable server yields an empty snapshot.
    pub fn capture(server: &impl GraphServer) -> Self {
        let names = server.port_names();
        let mut ports: Vec<Port> = Vec::with_capacity(names.len());

        for name in names {
            if ports.iter().any(|p| p.name == name) {
                debug!("duplicate port name skipped: {name}");
                continue;
            }
            let Some(info) = server.port_info(&name) else {
                // Vanished mid-enumeration or unsupported type.
                debug!("port skipped during capture: {name}");
                continue;
            };
            ports.push(Port {
                name,
                category: info.category,
                direction: info.direction,
            });
        }

        Self { ports }
    }

    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    pub fn port(&self, index: usize) -> Option<&Port> {
        self.ports.get(index)
    }

    /// Index of a port by name, if it exists in this snapshot.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.ports.iter().position(|p| p.name == name)
    }

    /// Indices of every port matching a direction and category, in
    /// snapshot (server enumeration) order. Pure and idempotent.
    pub fn subset(&self, direction: PortDirection, category: PortCategory) -> Vec<usize> {
        self.ports
            .iter()
            .enumerate()
            .filter(|(_, p)| p.direction == direction && p.category == category)
            .map(|(i, _)| i)
            .collect()
    }

    /// Resolve the active connections for one category.
    ///
    /// Peer names come from the live server, but identities come from
    /// this snapshot: a peer name the snapshot does not know means the
    /// graph moved between the two queries and the entry is skipped.
    /// Order: destination ports in snapshot order, then peers in
    /// server-reported order.
    pub fn resolve_connections(
        &self,
        server: &impl GraphServer,
        category: PortCategory,
    ) -> Vec<Connection> {
        let mut connections = Vec::new();

        for destination in self.subset(PortDirection::Destination, category) {
            let dest_name = &self.ports[destination].name;
            for peer in server.peers_of(dest_name) {
                let Some(source) = self.index_of(&peer) else {
                    debug!("peer {peer} of {dest_name} not in snapshot, skipped");
                    continue;
                };
                connections.push(Connection {
                    source,
                    destination,
                    category,
                });
            }
        }

        connections
    }
}
