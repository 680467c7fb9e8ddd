//! End-to-end patchbay scenarios against the in-memory server
//!
//! The fake server plays both roles: the server answering the app's
//! queries, and the third-party client mutating the graph behind the
//! app's back while raising the change signal.

use portwire::app::{App, Command, StatusLevel, GRAPH_CHANGED};
use portwire::fake_server::FakeServer;
use portwire::graph::{PortCategory, PortDirection};
use portwire::panes::PaneId;
use portwire::signal::ChangeSignal;

fn studio() -> (FakeServer, ChangeSignal) {
    let server = FakeServer::new();
    let signal = ChangeSignal::new();
    server.notify(signal.clone());

    server.add_port("system:capture_1", PortCategory::Audio, PortDirection::Source);
    server.add_port("system:capture_2", PortCategory::Audio, PortDirection::Source);
    server.add_port("system:playback_1", PortCategory::Audio, PortDirection::Destination);
    server.add_port("system:playback_2", PortCategory::Audio, PortDirection::Destination);
    server.add_port("keys:midi_out", PortCategory::Midi, PortDirection::Source);
    server.add_port("synth:midi_in", PortCategory::Midi, PortDirection::Destination);

    signal.take(); // drop the setup noise
    (server, signal)
}

fn audio_app(server: &FakeServer, signal: &ChangeSignal) -> App<FakeServer> {
    App::new(server.clone(), signal.clone(), PortCategory::Audio)
}

#[test]
fn connect_creates_a_connection_and_sweeps_the_cursors() {
    let (server, signal) = studio();
    let mut app = audio_app(&server, &signal);

    app.apply(Command::Connect);
    app.tick();

    assert_eq!(server.link_count(), 1);
    assert_eq!(app.pane_len(PaneId::Connections), 1);
    let lines = app.pane_lines(PaneId::Connections, 60);
    assert!(lines[0].contains("system:capture_1 -> system:playback_1"));

    // Both cursors advanced so repeated presses sweep parallel lists.
    assert_eq!(app.pane_cursor(PaneId::OutputPorts), Some(1));
    assert_eq!(app.pane_cursor(PaneId::InputPorts), Some(1));
}

#[test]
fn connect_clamps_cursors_on_single_entry_lists() {
    let server = FakeServer::new();
    let signal = ChangeSignal::new();
    server.notify(signal.clone());
    server.add_port("a:out", PortCategory::Audio, PortDirection::Source);
    server.add_port("b:in", PortCategory::Audio, PortDirection::Destination);
    signal.take();

    let mut app = audio_app(&server, &signal);
    app.apply(Command::Connect);
    app.tick();

    assert_eq!(app.pane_len(PaneId::Connections), 1);
    assert_eq!(app.pane_cursor(PaneId::OutputPorts), Some(0));
    assert_eq!(app.pane_cursor(PaneId::InputPorts), Some(0));
}

#[test]
fn disconnect_at_the_last_position_lands_on_the_neighbor() {
    let (server, signal) = studio();
    server.link("system:capture_1", "system:playback_1");
    server.link("system:capture_2", "system:playback_1");
    server.link("system:capture_1", "system:playback_2");

    let mut app = audio_app(&server, &signal);
    app.apply(Command::FocusConnections);
    app.apply(Command::LastItem);
    assert_eq!(app.pane_cursor(PaneId::Connections), Some(2));

    app.apply(Command::Disconnect);
    app.tick();

    assert_eq!(app.pane_len(PaneId::Connections), 2);
    assert_eq!(app.pane_cursor(PaneId::Connections), Some(1));
    assert_eq!(server.link_count(), 2);
}

#[test]
fn disconnect_all_clears_the_pane() {
    let (server, signal) = studio();
    server.link("system:capture_1", "system:playback_1");
    server.link("system:capture_2", "system:playback_2");

    let mut app = audio_app(&server, &signal);
    app.apply(Command::DisconnectAll);
    app.tick();

    assert_eq!(server.link_count(), 0);
    assert_eq!(app.pane_len(PaneId::Connections), 0);
    assert_eq!(app.pane_cursor(PaneId::Connections), None);
}

#[test]
fn disconnect_all_stops_at_the_first_failure() {
    let (server, signal) = studio();
    server.link("system:capture_1", "system:playback_1");
    server.link("system:capture_2", "system:playback_2");

    let mut app = audio_app(&server, &signal);
    server.fail_disconnects(true);
    app.apply(Command::DisconnectAll);

    // Nothing removed at the server, error surfaced, no masking.
    assert_eq!(server.link_count(), 2);
    assert_eq!(app.status().level, StatusLevel::Error);

    app.tick();
    assert_eq!(app.pane_len(PaneId::Connections), 2);
}

#[test]
fn category_switch_to_empty_midi_redirects_focus() {
    let (server, signal) = studio();
    server.link("system:capture_1", "system:playback_1");

    let mut app = audio_app(&server, &signal);
    app.apply(Command::FocusConnections);
    assert_eq!(app.focus(), PaneId::Connections);
    assert_eq!(app.pane_title(PaneId::Connections), "Audio Connections");

    app.apply(Command::SelectCategory(PortCategory::Midi));
    app.tick();

    assert_eq!(app.pane_title(PaneId::Connections), "MIDI Connections");
    assert_eq!(app.pane_len(PaneId::Connections), 0);
    assert_eq!(app.pane_cursor(PaneId::Connections), None);
    assert_eq!(app.focus(), PaneId::OutputPorts);
}

#[test]
fn external_change_is_picked_up_on_the_next_tick() {
    let (server, signal) = studio();
    let mut app = audio_app(&server, &signal);
    assert_eq!(app.pane_len(PaneId::Connections), 0);

    // Another client rewires the graph while we sit in the input wait.
    server.link("system:capture_1", "system:playback_1");

    app.tick();

    assert_eq!(app.pane_len(PaneId::Connections), 1);
    assert_eq!(app.status().text, GRAPH_CHANGED);
}

#[test]
fn external_port_removal_clamps_the_selection() {
    let (server, signal) = studio();
    let mut app = audio_app(&server, &signal);
    app.apply(Command::LastItem);
    assert_eq!(app.pane_cursor(PaneId::OutputPorts), Some(1));

    server.remove_port("system:capture_2");
    app.tick();

    assert_eq!(app.pane_len(PaneId::OutputPorts), 1);
    assert_eq!(app.pane_cursor(PaneId::OutputPorts), Some(0));
}

#[test]
fn rebuild_is_idempotent_without_graph_changes() {
    let (server, signal) = studio();
    server.link("system:capture_1", "system:playback_1");
    server.link("system:capture_2", "system:playback_2");

    let mut app = audio_app(&server, &signal);
    let before: Vec<Vec<String>> = [PaneId::OutputPorts, PaneId::InputPorts, PaneId::Connections]
        .iter()
        .map(|&pane| app.pane_lines(pane, 80))
        .collect();

    app.apply(Command::Refresh);
    app.tick();
    app.apply(Command::Refresh);
    app.tick();

    let after: Vec<Vec<String>> = [PaneId::OutputPorts, PaneId::InputPorts, PaneId::Connections]
        .iter()
        .map(|&pane| app.pane_lines(pane, 80))
        .collect();
    assert_eq!(before, after);
}

#[test]
fn cyclic_focus_never_lands_on_empty_connections() {
    let (server, signal) = studio();
    let mut app = audio_app(&server, &signal);

    // Forward from InputPorts skips over the empty connections pane.
    app.apply(Command::FocusNext);
    assert_eq!(app.focus(), PaneId::InputPorts);
    app.apply(Command::FocusNext);
    assert_eq!(app.focus(), PaneId::OutputPorts);

    // Backward from OutputPorts skips it too.
    app.apply(Command::FocusPrevious);
    assert_eq!(app.focus(), PaneId::InputPorts);

    // Direct select may land on it, with nothing selected.
    app.apply(Command::FocusConnections);
    assert_eq!(app.focus(), PaneId::Connections);
    assert_eq!(app.pane_cursor(PaneId::Connections), None);
}

#[test]
fn every_view_entry_traces_back_to_the_snapshot() {
    let (server, signal) = studio();
    server.link("system:capture_1", "system:playback_1");
    server.link("keys:midi_out", "synth:midi_in");

    let mut app = audio_app(&server, &signal);
    for _ in 0..3 {
        server.add_port("late:out", PortCategory::Audio, PortDirection::Source);
        app.tick();
        server.remove_port("late:out");
        app.tick();

        let snapshot = app.snapshot();
        for pane in [PaneId::OutputPorts, PaneId::InputPorts] {
            for line in app.pane_lines(pane, 200) {
                assert!(snapshot.index_of(line.trim()).is_some());
            }
        }
    }
}
