use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Columns moved per wheel notch
pub const WHEEL_STEP: f64 = 4.0;

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    /// Jump to a zero-based page
    GoTo(usize),
    ToggleScrollEnabled,
    /// Mouse pressed at a column
    PressAt(u16),
    /// Mouse dragged to a column
    DragTo(u16),
    /// Mouse released
    Release,
    /// Wheel scrolled horizontally by a column delta
    Wheel(f64),
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Esc, _) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        // Page navigation
        (KeyCode::Char('l'), KeyModifiers::NONE) => Action::NextPage,
        (KeyCode::Right, _) => Action::NextPage,
        (KeyCode::Char(' '), KeyModifiers::NONE) => Action::NextPage,
        (KeyCode::Char('h'), KeyModifiers::NONE) => Action::PrevPage,
        (KeyCode::Left, _) => Action::PrevPage,
        (KeyCode::Home, _) => Action::FirstPage,
        (KeyCode::Char('g'), KeyModifiers::NONE) => Action::FirstPage,
        (KeyCode::End, _) => Action::LastPage,
        (KeyCode::Char('G'), _) => Action::LastPage,

        // 1-9 jump straight to a page
        (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => {
            Action::GoTo(c as usize - '1' as usize)
        }

        (KeyCode::Char('s'), KeyModifiers::NONE) => Action::ToggleScrollEnabled,

        _ => Action::None,
    }
}

/// Handle a mouse event and return the corresponding action
pub fn handle_mouse_event(mouse: MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Action::PressAt(mouse.column),
        MouseEventKind::Drag(MouseButton::Left) => Action::DragTo(mouse.column),
        MouseEventKind::Up(MouseButton::Left) => Action::Release,
        MouseEventKind::ScrollRight => Action::Wheel(WHEEL_STEP),
        MouseEventKind::ScrollLeft => Action::Wheel(-WHEEL_STEP),
        // Shift+wheel scrolls sideways in most terminals
        MouseEventKind::ScrollDown if mouse.modifiers.contains(KeyModifiers::SHIFT) => {
            Action::Wheel(WHEEL_STEP)
        }
        MouseEventKind::ScrollUp if mouse.modifiers.contains(KeyModifiers::SHIFT) => {
            Action::Wheel(-WHEEL_STEP)
        }
        _ => Action::None,
    }
}
