//! Key mapping for terminal play.
//!
//! Left/right/up map to piece commands; holding down boosts the gravity
//! rate until release. Many terminals never emit key-release events, so
//! [`KeyState`] auto-releases the soft drop after a timeout, the same
//! technique as a held-key watchdog: every repeat press refreshes the
//! timer, and silence past the timeout counts as a release.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use blockfall_types::GameCommand;

// Auto-release delay for terminals without key-release events. Repeat
// events arrive well inside this window while a key is truly held.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Whether this key ends the program.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Tracks the held soft-drop key across press/release/timeout.
#[derive(Debug, Clone)]
pub struct KeyState {
    down_held: bool,
    last_down_press: Instant,
    release_timeout_ms: u32,
}

impl KeyState {
    pub fn new() -> Self {
        Self {
            down_held: false,
            last_down_press: Instant::now(),
            release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.release_timeout_ms = timeout_ms;
        self
    }

    pub fn down_held(&self) -> bool {
        self.down_held
    }

    /// Map a key press (or terminal auto-repeat) to a command.
    ///
    /// The first down press emits `SoftDropPressed`; repeats only refresh
    /// the hold timer.
    pub fn on_key_press(&mut self, code: KeyCode) -> Option<GameCommand> {
        match code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                Some(GameCommand::MoveLeft)
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                Some(GameCommand::MoveRight)
            }
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(GameCommand::Rotate),
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
                self.last_down_press = Instant::now();
                if self.down_held {
                    None
                } else {
                    self.down_held = true;
                    Some(GameCommand::SoftDropPressed)
                }
            }
            KeyCode::Char('p') | KeyCode::Char('P') => Some(GameCommand::Pause),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(GameCommand::Restart),
            _ => None,
        }
    }

    /// Map an explicit key release to a command, where the terminal
    /// delivers them.
    pub fn on_key_release(&mut self, code: KeyCode) -> Option<GameCommand> {
        match code {
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
                if self.down_held {
                    self.down_held = false;
                    Some(GameCommand::SoftDropReleased)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Synthesize the release when no press has refreshed the hold within
    /// the timeout. Call once per runner loop iteration.
    pub fn poll_auto_release(&mut self) -> Option<GameCommand> {
        if !self.down_held {
            return None;
        }
        let held_for = self.last_down_press.elapsed().as_millis() as u32;
        if held_for > self.release_timeout_ms {
            self.down_held = false;
            Some(GameCommand::SoftDropReleased)
        } else {
            None
        }
    }
}

impl Default for KeyState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;
    use std::time::Duration;

    #[test]
    fn test_directional_key_mapping() {
        let mut keys = KeyState::new();
        assert_eq!(keys.on_key_press(KeyCode::Left), Some(GameCommand::MoveLeft));
        assert_eq!(keys.on_key_press(KeyCode::Right), Some(GameCommand::MoveRight));
        assert_eq!(keys.on_key_press(KeyCode::Up), Some(GameCommand::Rotate));
        assert_eq!(keys.on_key_press(KeyCode::Char('a')), Some(GameCommand::MoveLeft));
        assert_eq!(keys.on_key_press(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_down_press_emits_once_until_released() {
        let mut keys = KeyState::new();
        assert_eq!(
            keys.on_key_press(KeyCode::Down),
            Some(GameCommand::SoftDropPressed)
        );
        // Terminal auto-repeat of the held key.
        assert_eq!(keys.on_key_press(KeyCode::Down), None);
        assert!(keys.down_held());

        assert_eq!(
            keys.on_key_release(KeyCode::Down),
            Some(GameCommand::SoftDropReleased)
        );
        assert!(!keys.down_held());
        assert_eq!(keys.on_key_release(KeyCode::Down), None);
    }

    #[test]
    fn test_auto_release_after_timeout() {
        let mut keys = KeyState::new().with_release_timeout_ms(50);
        keys.on_key_press(KeyCode::Down);

        // Simulate silence by moving the last press into the past.
        keys.last_down_press = Instant::now() - Duration::from_millis(51);
        assert_eq!(
            keys.poll_auto_release(),
            Some(GameCommand::SoftDropReleased)
        );
        assert!(!keys.down_held());
        assert_eq!(keys.poll_auto_release(), None);
    }

    #[test]
    fn test_repeat_press_refreshes_the_hold() {
        let mut keys = KeyState::new().with_release_timeout_ms(50);
        keys.on_key_press(KeyCode::Down);
        keys.last_down_press = Instant::now() - Duration::from_millis(40);

        // A repeat arrives before the timeout; the hold survives.
        assert_eq!(keys.on_key_press(KeyCode::Down), None);
        assert_eq!(keys.poll_auto_release(), None);
        assert!(keys.down_held());
    }

    #[test]
    fn test_should_quit_keys() {
        assert!(should_quit(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(should_quit(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::NONE
        )));
        assert!(!should_quit(KeyEvent::new(KeyCode::Left, KeyModifiers::NONE)));
    }
}
