//! UI state and command executor
//!
//! One explicit state struct owns everything the render loop needs: the
//! current snapshot, the three pane views, the focused pane, the active
//! category and the status line. Commands mutate it synchronously on the
//! primary thread; the only asynchronous input is the change signal,
//! consumed once per loop iteration by [`App::tick`].

use tracing::{debug, info};

use crate::graph::{Connection, PortCategory, PortDirection, Snapshot};
use crate::panes::{resolve_focus, Motion, PaneId};
use crate::server::GraphServer;
use crate::signal::ChangeSignal;
use crate::view::NavigableList;

pub const DEFAULT_STATUS: &str = "->> Press SHIFT+H or ? for help <<-";
pub const ERR_CONNECT: &str = "Connection failed";
pub const ERR_DISCONNECT: &str = "Disconnection failed";
pub const GRAPH_CHANGED: &str = "Graph changed";

/// Severity tag for the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Status {
    pub level: StatusLevel,
    pub text: String,
}

impl Status {
    fn info(text: &str) -> Self {
        Self {
            level: StatusLevel::Info,
            text: text.to_string(),
        }
    }

    fn error(text: &str) -> Self {
        Self {
            level: StatusLevel::Error,
            text: text.to_string(),
        }
    }
}

/// A user intent, already decoded from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    NextItem,
    PreviousItem,
    FirstItem,
    LastItem,
    FocusNext,
    FocusPrevious,
    FocusOutputs,
    FocusInputs,
    FocusConnections,
    Connect,
    Disconnect,
    DisconnectAll,
    SelectCategory(PortCategory),
    Refresh,
    Help,
    Quit,
}

/// The whole patchbay state, generic over the server backend.
pub struct App<S: GraphServer> {
    server: S,
    signal: ChangeSignal,
    category: PortCategory,
    snapshot: Snapshot,
    outputs: NavigableList<usize>,
    inputs: NavigableList<usize>,
    connections: NavigableList<Connection>,
    focus: PaneId,
    status: Status,
    rebuild_pending: bool,
    show_help: bool,
    quit: bool,
}

impl<S: GraphServer> App<S> {
    pub fn new(server: S, signal: ChangeSignal, category: PortCategory) -> Self {
        let mut app = Self {
            server,
            signal,
            category,
            snapshot: Snapshot::default(),
            outputs: NavigableList::new(),
            inputs: NavigableList::new(),
            connections: NavigableList::new(),
            focus: PaneId::OutputPorts,
            status: Status::info(DEFAULT_STATUS),
            rebuild_pending: false,
            show_help: false,
            quit: false,
        };
        app.rebuild();
        app
    }

    /// Execute one user intent.
    ///
    /// Any pending transient message is replaced first, so errors stay on
    /// screen until the next keypress, like the 3-second status in the
    /// classic patchbays.
    pub fn apply(&mut self, command: Command) {
        self.status = Status::info(DEFAULT_STATUS);
        match command {
            Command::NextItem => match self.focus {
                PaneId::OutputPorts => self.outputs.next(),
                PaneId::InputPorts => self.inputs.next(),
                PaneId::Connections => self.connections.next(),
            },
            Command::PreviousItem => match self.focus {
                PaneId::OutputPorts => self.outputs.previous(),
                PaneId::InputPorts => self.inputs.previous(),
                PaneId::Connections => self.connections.previous(),
            },
            Command::FirstItem => match self.focus {
                PaneId::OutputPorts => self.outputs.first(),
                PaneId::InputPorts => self.inputs.first(),
                PaneId::Connections => self.connections.first(),
            },
            Command::LastItem => match self.focus {
                PaneId::OutputPorts => self.outputs.last(),
                PaneId::InputPorts => self.inputs.last(),
                PaneId::Connections => self.connections.last(),
            },
            Command::FocusNext => self.set_focus(self.focus.next(), Motion::Forward),
            Command::FocusPrevious => self.set_focus(self.focus.previous(), Motion::Backward),
            Command::FocusOutputs => self.set_focus(PaneId::OutputPorts, Motion::Direct),
            Command::FocusInputs => self.set_focus(PaneId::InputPorts, Motion::Direct),
            Command::FocusConnections => self.set_focus(PaneId::Connections, Motion::Direct),
            Command::Connect => self.connect_selected(),
            Command::Disconnect => self.disconnect_selected(),
            Command::DisconnectAll => self.disconnect_all(),
            Command::SelectCategory(category) => {
                self.category = category;
                self.rebuild_pending = true;
            }
            Command::Refresh => self.rebuild_pending = true,
            Command::Help => self.show_help = true,
            Command::Quit => self.quit = true,
        }
    }

    /// Per-iteration housekeeping for the render loop: consume the change
    /// signal exactly once, then run any rebuild that commands or the
    /// signal scheduled.
    pub fn tick(&mut self) {
        if self.signal.take() {
            self.status = Status::info(GRAPH_CHANGED);
            self.rebuild_pending = true;
        }
        if self.rebuild_pending {
            self.rebuild();
        }
    }

    /// Discard the snapshot and every view, and rebuild them from the
    /// live server. Cursors are clamped, never reset, and the focus is
    /// re-validated against the empty-connections skip rule.
    fn rebuild(&mut self) {
        self.rebuild_pending = false;
        self.snapshot = Snapshot::capture(&self.server);
        self.outputs
            .replace(self.snapshot.subset(PortDirection::Source, self.category));
        self.inputs
            .replace(self.snapshot.subset(PortDirection::Destination, self.category));
        self.connections
            .replace(self.snapshot.resolve_connections(&self.server, self.category));
        if self.focus == PaneId::Connections && self.connections.is_empty() {
            self.focus = PaneId::OutputPorts;
        }
        debug!(
            "rebuilt: {} ports, {} outputs, {} inputs, {} connections",
            self.snapshot.len(),
            self.outputs.len(),
            self.inputs.len(),
            self.connections.len()
        );
    }

    fn set_focus(&mut self, requested: PaneId, motion: Motion) {
        self.focus = resolve_focus(self.focus, requested, motion, self.connections.is_empty());
    }

    /// Connect the selected output port to the selected input port.
    ///
    /// The command carries names, not snapshot references: the server may
    /// have moved on since the snapshot, and a stale name is just a
    /// recoverable rejection.
    fn connect_selected(&mut self) {
        let source = self
            .outputs
            .selected()
            .and_then(|&i| self.snapshot.port(i))
            .map(|p| p.name.clone());
        let destination = self
            .inputs
            .selected()
            .and_then(|&i| self.snapshot.port(i))
            .map(|p| p.name.clone());
        let (Some(source), Some(destination)) = (source, destination) else {
            self.status = Status::error(ERR_CONNECT);
            return;
        };

        match self.server.connect(&source, &destination) {
            Ok(()) => {
                info!("connected {source} -> {destination}");
                // Sweep through parallel lists on repeated presses.
                self.outputs.next();
                self.inputs.next();
                self.rebuild_pending = true;
            }
            Err(e) => {
                debug!("connect {source} -> {destination} failed: {e}");
                self.status = Status::error(ERR_CONNECT);
            }
        }
    }

    /// Disconnect the selected connection.
    fn disconnect_selected(&mut self) {
        let Some(pair) = self.connection_names(self.connections.cursor()) else {
            self.status = Status::error(ERR_DISCONNECT);
            return;
        };

        // Step off the last entry first so the selection lands on a
        // still-valid neighbor once the entry goes away.
        if self.connections.cursor() > 0
            && self.connections.cursor() + 1 == self.connections.len()
        {
            self.connections.previous();
        }

        match self.server.disconnect(&pair.0, &pair.1) {
            Ok(()) => {
                info!("disconnected {} -> {}", pair.0, pair.1);
                self.rebuild_pending = true;
            }
            Err(e) => {
                debug!("disconnect {} -> {} failed: {e}", pair.0, pair.1);
                self.status = Status::error(ERR_DISCONNECT);
            }
        }
    }

    /// Disconnect every listed connection, stopping at the first failure.
    ///
    /// Successful removals are dropped from the local view right away so
    /// the loop never reprocesses an entry; the full rebuild afterwards
    /// reconciles with whatever the server actually did.
    fn disconnect_all(&mut self) {
        while let Some(pair) = self.connection_names(0) {
            match self.server.disconnect(&pair.0, &pair.1) {
                Ok(()) => {
                    self.connections.remove(0);
                }
                Err(e) => {
                    debug!("disconnect-all stopped at {} -> {}: {e}", pair.0, pair.1);
                    self.status = Status::error(ERR_DISCONNECT);
                    break;
                }
            }
        }
        self.rebuild_pending = true;
    }

    fn connection_names(&self, index: usize) -> Option<(String, String)> {
        let connection = self.connections.items().get(index)?;
        let source = self.snapshot.port(connection.source)?;
        let destination = self.snapshot.port(connection.destination)?;
        Some((source.name.clone(), destination.name.clone()))
    }

    // --- renderer-facing surface ---

    pub fn focus(&self) -> PaneId {
        self.focus
    }

    pub fn category(&self) -> PortCategory {
        self.category
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn help_visible(&self) -> bool {
        self.show_help
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
        // Redraw from fresh state once the overlay goes away.
        self.rebuild_pending = true;
    }

    pub fn dsp_load(&self) -> f32 {
        self.server.cpu_load()
    }

    pub fn is_realtime(&self) -> bool {
        self.server.is_realtime()
    }

    pub fn pane_title(&self, pane: PaneId) -> &'static str {
        match pane {
            PaneId::OutputPorts => "Output Ports",
            PaneId::InputPorts => "Input Ports",
            PaneId::Connections => match self.category {
                PortCategory::Audio => "Audio Connections",
                PortCategory::Midi => "MIDI Connections",
            },
        }
    }

    pub fn pane_len(&self, pane: PaneId) -> usize {
        match pane {
            PaneId::OutputPorts => self.outputs.len(),
            PaneId::InputPorts => self.inputs.len(),
            PaneId::Connections => self.connections.len(),
        }
    }

    /// Selected index for a pane, or `None` when it has nothing to
    /// select.
    pub fn pane_cursor(&self, pane: PaneId) -> Option<usize> {
        if self.pane_len(pane) == 0 {
            return None;
        }
        Some(match pane {
            PaneId::OutputPorts => self.outputs.cursor(),
            PaneId::InputPorts => self.inputs.cursor(),
            PaneId::Connections => self.connections.cursor(),
        })
    }

    /// Display strings for one pane, pre-truncated to `width` columns.
    ///
    /// Connections render as `source -> destination` with the source
    /// right-aligned, matching the classic patchbay layout.
    pub fn pane_lines(&self, pane: PaneId, width: usize) -> Vec<String> {
        match pane {
            PaneId::OutputPorts => self.port_lines(&self.outputs, width),
            PaneId::InputPorts => self.port_lines(&self.inputs, width),
            PaneId::Connections => {
                let half = width.saturating_sub(4) / 2;
                self.connections
                    .items()
                    .iter()
                    .map(|c| {
                        let source = self
                            .snapshot
                            .port(c.source)
                            .map(|p| p.name.as_str())
                            .unwrap_or_default();
                        let destination = self
                            .snapshot
                            .port(c.destination)
                            .map(|p| p.name.as_str())
                            .unwrap_or_default();
                        format!(
                            "{:>half$} -> {:<half$}",
                            clip(source, half),
                            clip(destination, half),
                        )
                    })
                    .collect()
            }
        }
    }

    fn port_lines(&self, list: &NavigableList<usize>, width: usize) -> Vec<String> {
        list.items()
            .iter()
            .filter_map(|&i| self.snapshot.port(i))
            .map(|p| clip(&p.name, width))
            .collect()
    }
}

fn clip(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}
