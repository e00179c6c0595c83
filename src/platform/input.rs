//! Keyboard state
//!
//! Arrow keys are sampled as held state; every other binding fires once per
//! physical press.

use std::collections::HashSet;

use crate::sim::TickInput;

/// Discrete key bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// P: toggle pause
    Pause,
    /// Escape: twice within a second quits
    Escape,
    /// Enter: start from the menu
    Start,
    /// R: restart after a game over
    Restart,
    /// D: open the debug menu
    Debug,
    /// +/-: debug level adjust
    LevelUp,
    LevelDown,
}

impl KeyCommand {
    /// Map a `KeyboardEvent.key` value to a binding
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "p" | "P" => Some(KeyCommand::Pause),
            "Escape" => Some(KeyCommand::Escape),
            "Enter" => Some(KeyCommand::Start),
            "r" | "R" => Some(KeyCommand::Restart),
            "d" | "D" => Some(KeyCommand::Debug),
            "+" | "=" => Some(KeyCommand::LevelUp),
            "-" | "_" => Some(KeyCommand::LevelDown),
            _ => None,
        }
    }
}

/// Held keys plus commands pressed since the last frame
#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    held: HashSet<String>,
    pressed: Vec<KeyCommand>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a keydown and return the binding it triggers. Auto-repeat
    /// does not re-trigger. Pause and Escape are also queued for the next
    /// simulation tick.
    pub fn key_down(&mut self, key: &str) -> Option<KeyCommand> {
        if !self.held.insert(key.to_string()) {
            return None;
        }
        let cmd = KeyCommand::from_key(key)?;
        if matches!(cmd, KeyCommand::Pause | KeyCommand::Escape) {
            self.pressed.push(cmd);
        }
        Some(cmd)
    }

    pub fn key_up(&mut self, key: &str) {
        self.held.remove(key);
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.held.contains(key)
    }

    /// Drop held keys, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Forget queued presses (a new game starts clean)
    pub fn clear_presses(&mut self) {
        self.pressed.clear();
    }

    /// Build this frame's simulation input, consuming queued presses
    pub fn take_input(&mut self) -> TickInput {
        let mut input = TickInput {
            left: self.is_held("ArrowLeft"),
            right: self.is_held("ArrowRight"),
            ..Default::default()
        };
        for cmd in self.pressed.drain(..) {
            match cmd {
                KeyCommand::Pause => input.pause = true,
                KeyCommand::Escape => input.escape = true,
                _ => {}
            }
        }
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_arrows_and_edges() {
        let mut kb = Keyboard::new();
        assert_eq!(kb.key_down("ArrowLeft"), None);
        assert_eq!(kb.key_down("p"), Some(KeyCommand::Pause));
        assert_eq!(kb.key_down("+"), Some(KeyCommand::LevelUp));

        let input = kb.take_input();
        assert!(input.left);
        assert!(!input.right);
        assert!(input.pause);

        // Presses are consumed, held state persists
        let input = kb.take_input();
        assert!(input.left);
        assert!(!input.pause);

        kb.key_up("ArrowLeft");
        assert!(!kb.take_input().left);
    }

    #[test]
    fn test_auto_repeat_ignored() {
        let mut kb = Keyboard::new();
        assert_eq!(kb.key_down("Escape"), Some(KeyCommand::Escape));
        assert_eq!(kb.key_down("Escape"), None);
        assert!(kb.take_input().escape);
        assert!(!kb.take_input().escape);
        kb.key_up("Escape");
        kb.key_down("Escape");
        kb.clear_presses();
        assert!(!kb.take_input().escape);
    }
}
