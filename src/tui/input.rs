use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Represents the result of handling a key event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Quit the application
    Quit,
    /// Keep the current photo (Left arrow or k)
    Keep,
    /// Delete the current photo (Right arrow or d)
    Delete,
    /// Confirm delete action
    ConfirmDelete,
    /// Cancel delete action
    CancelDelete,
    /// Revert the accounting of the last delete
    Undo,
    /// Open the current photo in the system viewer
    Open,
    /// Fresh batch from the summary or error screen
    Restart,
    /// Toggle help overlay
    Help,
    /// No action
    None,
}

/// Maps keyboard events to actions
pub fn handle_key_event(key: KeyEvent) -> KeyAction {
    match (key.code, key.modifiers) {
        // Quit: q, Esc or Ctrl+C
        (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::Quit,
        (KeyCode::Esc, KeyModifiers::NONE) => KeyAction::Quit,

        // Keep: Left arrow or k
        (KeyCode::Left, KeyModifiers::NONE) => KeyAction::Keep,
        (KeyCode::Char('k'), KeyModifiers::NONE) => KeyAction::Keep,

        // Delete: Right arrow or d
        (KeyCode::Right, KeyModifiers::NONE) => KeyAction::Delete,
        (KeyCode::Char('d'), KeyModifiers::NONE) => KeyAction::Delete,

        // Undo: u or Ctrl+Z
        (KeyCode::Char('u'), KeyModifiers::NONE) => KeyAction::Undo,
        (KeyCode::Char('z'), KeyModifiers::CONTROL) => KeyAction::Undo,

        (KeyCode::Char('o'), KeyModifiers::NONE) => KeyAction::Open,
        (KeyCode::Char('r'), KeyModifiers::NONE) => KeyAction::Restart,

        // Help: ? (some terminals report the shift)
        (KeyCode::Char('?'), KeyModifiers::NONE) => KeyAction::Help,
        (KeyCode::Char('?'), KeyModifiers::SHIFT) => KeyAction::Help,

        _ => KeyAction::None,
    }
}

/// Maps keyboard events to confirmation actions
/// Used when ViewState is ConfirmDelete
pub fn handle_confirm_input(key: KeyEvent) -> KeyAction {
    match (key.code, key.modifiers) {
        // Confirm: y or Enter
        (KeyCode::Char('y'), _) => KeyAction::ConfirmDelete,
        (KeyCode::Char('Y'), _) => KeyAction::ConfirmDelete,
        (KeyCode::Enter, KeyModifiers::NONE) => KeyAction::ConfirmDelete,

        // Cancel: n or Esc
        (KeyCode::Char('n'), _) => KeyAction::CancelDelete,
        (KeyCode::Char('N'), _) => KeyAction::CancelDelete,
        (KeyCode::Esc, KeyModifiers::NONE) => KeyAction::CancelDelete,

        _ => KeyAction::None,
    }
}
