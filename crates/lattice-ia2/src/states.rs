//! IAccessible2 state bits.

use lattice_ia2_core::NodeState;

/// The object is the active window or frame.
pub const IA2_STATE_ACTIVE: u32 = 0x1;
/// The object no longer backs a live element.
pub const IA2_STATE_DEFUNCT: u32 = 0x4;
/// The object accepts text input.
pub const IA2_STATE_EDITABLE: u32 = 0x8;
/// The object blocks input to other windows.
pub const IA2_STATE_MODAL: u32 = 0x100;
/// The text spans more than one line.
pub const IA2_STATE_MULTI_LINE: u32 = 0x200;
/// A value must be entered.
pub const IA2_STATE_REQUIRED: u32 = 0x800;
/// Text can be selected.
pub const IA2_STATE_SELECTABLE_TEXT: u32 = 0x1000;
/// Input is completed from suggestions.
pub const IA2_STATE_SUPPORTS_AUTOCOMPLETION: u32 = 0x8000;
/// The object can be checked.
pub const IA2_STATE_CHECKABLE: u32 = 0x40000;

/// The IA2 state bit set for `state`.
pub fn ia2_states(state: &NodeState) -> u32 {
    [
        (state.active, IA2_STATE_ACTIVE),
        (state.invalid, IA2_STATE_DEFUNCT),
        (state.editable, IA2_STATE_EDITABLE),
        (state.modal, IA2_STATE_MODAL),
        (state.multi_line, IA2_STATE_MULTI_LINE),
        (state.required, IA2_STATE_REQUIRED),
        (state.selectable_text, IA2_STATE_SELECTABLE_TEXT),
        (state.supports_autocompletion, IA2_STATE_SUPPORTS_AUTOCOMPLETION),
        (state.checkable, IA2_STATE_CHECKABLE),
    ]
    .into_iter()
    .filter(|&(set, _)| set)
    .fold(0, |bits, (_, bit)| bits | bit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_field_states() {
        let bits = ia2_states(&NodeState::editable_text(true));
        assert_eq!(bits, IA2_STATE_EDITABLE | IA2_STATE_MULTI_LINE | IA2_STATE_SELECTABLE_TEXT);
        assert_eq!(ia2_states(&NodeState::default()), 0);
    }

    #[test]
    fn test_focus_and_selection_are_not_ia2_states() {
        let state = NodeState {
            focused: true,
            selected: true,
            invalid: true,
            ..NodeState::default()
        };
        assert_eq!(ia2_states(&state), IA2_STATE_DEFUNCT);
    }
}
