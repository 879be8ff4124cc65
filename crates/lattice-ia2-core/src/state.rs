//! Node state flags reported by the provider.

/// The dynamic state of an accessible node.
///
/// Each flag is the node's own state; the bridge only translates these into
/// protocol state bits and never derives one flag from another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NodeState {
    /// The node is the active window or lives in it.
    pub active: bool,
    /// The backing element has been destroyed but the node is still reachable.
    pub invalid: bool,
    /// The content can be edited.
    pub editable: bool,
    /// Text content spans multiple lines.
    pub multi_line: bool,
    /// Text content can be selected.
    pub selectable_text: bool,
    /// The input offers completion suggestions.
    pub supports_autocompletion: bool,
    /// The node can hold a checked state.
    pub checkable: bool,
    /// A value is required before the form can be submitted.
    pub required: bool,
    /// The node blocks interaction with the rest of the application.
    pub modal: bool,
    /// The node has keyboard focus.
    pub focused: bool,
    /// The node is selected.
    pub selected: bool,
    /// The node is disabled.
    pub disabled: bool,
}

impl NodeState {
    /// State of an editable single- or multi-line text field.
    pub fn editable_text(multi_line: bool) -> Self {
        Self {
            editable: true,
            multi_line,
            selectable_text: true,
            ..Self::default()
        }
    }
}
