use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Playback speed selected from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speed {
    Slow,
    Normal,
    Fast,
    VeryFast,
}

impl Speed {
    /// Milliseconds between environment steps
    pub fn tick_ms(&self) -> u64 {
        match self {
            Speed::Slow => 500,
            Speed::Normal => 125,
            Speed::Fast => 50,
            Speed::VeryFast => 16,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    TogglePause,
    SetSpeed(Speed),
    Restart,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Raw mode swallows SIGINT, so Ctrl+C arrives as a key
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => KeyAction::TogglePause,

            KeyCode::Char('1') => KeyAction::SetSpeed(Speed::Slow),
            KeyCode::Char('2') => KeyAction::SetSpeed(Speed::Normal),
            KeyCode::Char('3') => KeyAction::SetSpeed(Speed::Fast),
            KeyCode::Char('4') => KeyAction::SetSpeed(Speed::VeryFast),

            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
