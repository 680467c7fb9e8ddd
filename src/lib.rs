//! # portwire - terminal patchbay for JACK
//!
//! portwire mirrors the port graph of a running JACK server into three
//! synchronized panes (output ports, input ports, active connections)
//! and lets you rewire it from the keyboard. The mirror is rebuilt, not
//! patched: every change - yours or another client's - discards the
//! current snapshot and rebuilds all three views from the live server,
//! with cursors clamped so the selection survives.
//!
//! The engine is generic over the [`server::GraphServer`] trait; the
//! binary drives it with the JACK backend, tests with the in-memory
//! fake.
//!
//! ```rust
//! use portwire::app::{App, Command};
//! use portwire::fake_server::FakeServer;
//! use portwire::graph::{PortCategory, PortDirection};
//! use portwire::panes::PaneId;
//! use portwire::signal::ChangeSignal;
//!
//! let server = FakeServer::new();
//! server.add_port("mic:out", PortCategory::Audio, PortDirection::Source);
//! server.add_port("daw:in", PortCategory::Audio, PortDirection::Destination);
//!
//! let mut app = App::new(server, ChangeSignal::new(), PortCategory::Audio);
//! app.apply(Command::Connect);
//! app.tick();
//! assert_eq!(app.pane_len(PaneId::Connections), 1);
//! ```

pub mod app;
pub mod fake_server;
pub mod graph;
pub mod jack_server;
pub mod panes;
pub mod server;
pub mod signal;
pub mod ui;
pub mod view;
