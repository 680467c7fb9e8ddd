//! Pane identity and the focus state machine
//!
//! Three panes cycle OutputPorts -> InputPorts -> Connections and wrap
//! around. An empty connections pane is skipped by cyclic navigation but
//! stays reachable through the direct "select connections" key.

/// One of the three UI panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneId {
    OutputPorts,
    InputPorts,
    Connections,
}

impl PaneId {
    /// Successor in the focus cycle, wrapping after Connections.
    pub fn next(self) -> Self {
        match self {
            PaneId::OutputPorts => PaneId::InputPorts,
            PaneId::InputPorts => PaneId::Connections,
            PaneId::Connections => PaneId::OutputPorts,
        }
    }

    /// Predecessor in the focus cycle, wrapping before OutputPorts.
    pub fn previous(self) -> Self {
        match self {
            PaneId::OutputPorts => PaneId::Connections,
            PaneId::InputPorts => PaneId::OutputPorts,
            PaneId::Connections => PaneId::InputPorts,
        }
    }
}

/// How a focus request arrived. Decides where the empty-connections skip
/// rule redirects to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Cyclic forward movement (Tab).
    Forward,
    /// Cyclic backward movement (Shift-Tab).
    Backward,
    /// An explicit pane selection key (Space, Left, Right).
    Direct,
}

/// Resolve a focus request against the skip rule.
///
/// Cyclic movement never lands on an empty connections pane: arriving
/// forward redirects to OutputPorts, arriving backward to InputPorts.
/// Direct selection lands on it regardless, with no selection to show.
pub fn resolve_focus(
    current: PaneId,
    requested: PaneId,
    motion: Motion,
    connections_empty: bool,
) -> PaneId {
    if requested == current {
        return current;
    }
    if requested == PaneId::Connections && connections_empty {
        return match motion {
            Motion::Forward => PaneId::OutputPorts,
            Motion::Backward => PaneId::InputPorts,
            Motion::Direct => PaneId::Connections,
        };
    }
    requested
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_wraps_both_ways() {
        assert_eq!(PaneId::Connections.next(), PaneId::OutputPorts);
        assert_eq!(PaneId::OutputPorts.previous(), PaneId::Connections);
        assert_eq!(PaneId::OutputPorts.next(), PaneId::InputPorts);
        assert_eq!(PaneId::Connections.previous(), PaneId::InputPorts);
    }

    #[test]
    fn same_pane_request_is_a_no_op() {
        let focus = resolve_focus(
            PaneId::InputPorts,
            PaneId::InputPorts,
            Motion::Direct,
            true,
        );
        assert_eq!(focus, PaneId::InputPorts);
    }

    #[test]
    fn forward_skips_empty_connections_to_outputs() {
        let focus = resolve_focus(
            PaneId::InputPorts,
            PaneId::InputPorts.next(),
            Motion::Forward,
            true,
        );
        assert_eq!(focus, PaneId::OutputPorts);
    }

    #[test]
    fn backward_skips_empty_connections_to_inputs() {
        let focus = resolve_focus(
            PaneId::OutputPorts,
            PaneId::OutputPorts.previous(),
            Motion::Backward,
            true,
        );
        assert_eq!(focus, PaneId::InputPorts);
    }

    #[test]
    fn direct_select_lands_on_empty_connections() {
        let focus = resolve_focus(
            PaneId::OutputPorts,
            PaneId::Connections,
            Motion::Direct,
            true,
        );
        assert_eq!(focus, PaneId::Connections);
    }

    #[test]
    fn populated_connections_pane_is_a_normal_target() {
        let focus = resolve_focus(
            PaneId::InputPorts,
            PaneId::Connections,
            Motion::Forward,
            false,
        );
        assert_eq!(focus, PaneId::Connections);
    }
}
