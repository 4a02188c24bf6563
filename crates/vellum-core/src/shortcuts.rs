//! Keyboard shortcut registry.

use crate::align::Nudge;
use crate::command::Command;

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub command: Command,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        command: Command,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            command,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+D").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    fn matches(&self, key: &str, ctrl: bool, shift: bool) -> bool {
        self.key.eq_ignore_ascii_case(key) && self.ctrl == ctrl && self.shift == shift
    }
}

const fn nudge(direction: Nudge, large: bool) -> Command {
    Command::Nudge { direction, large }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("Delete", false, false, Command::DeleteSelected, "Delete selected element"),
            Shortcut::new("D", true, false, Command::DuplicateSelected, "Duplicate selected element"),
            Shortcut::new("Z", true, false, Command::Undo, "Undo"),
            Shortcut::new("Z", true, true, Command::Redo, "Redo"),
            Shortcut::new("Y", true, false, Command::Redo, "Redo"),
            Shortcut::new("]", true, false, Command::BringForward, "Bring forward"),
            Shortcut::new("[", true, false, Command::SendBackward, "Send backward"),
            Shortcut::new("]", true, true, Command::BringToFront, "Bring to front"),
            Shortcut::new("[", true, true, Command::SendToBack, "Send to back"),
            Shortcut::new("ArrowUp", false, false, nudge(Nudge::Up, false), "Move up 1px"),
            Shortcut::new("ArrowDown", false, false, nudge(Nudge::Down, false), "Move down 1px"),
            Shortcut::new("ArrowLeft", false, false, nudge(Nudge::Left, false), "Move left 1px"),
            Shortcut::new("ArrowRight", false, false, nudge(Nudge::Right, false), "Move right 1px"),
            Shortcut::new("ArrowUp", false, true, nudge(Nudge::Up, true), "Move up 10px"),
            Shortcut::new("ArrowDown", false, true, nudge(Nudge::Down, true), "Move down 10px"),
            Shortcut::new("ArrowLeft", false, true, nudge(Nudge::Left, true), "Move left 10px"),
            Shortcut::new("ArrowRight", false, true, nudge(Nudge::Right, true), "Move right 10px"),
            Shortcut::new("Escape", false, false, Command::Deselect, "Deselect"),
        ]
    }

    /// Map a key press to its command.
    ///
    /// `key` is the key name as reported by the browser (`"z"`, `"]"`,
    /// `"ArrowUp"`); letters match case-insensitively. `ctrl` covers both
    /// Ctrl and Cmd.
    pub fn resolve(key: &str, ctrl: bool, shift: bool) -> Option<Command> {
        Self::all()
            .into_iter()
            .find(|shortcut| shortcut.matches(key, ctrl, shift))
            .map(|shortcut| shortcut.command)
    }

    /// Render the shortcut list, one per line.
    pub fn help_text() -> String {
        Self::all()
            .iter()
            .map(|shortcut| format!("  {:20} {}", shortcut.format(), shortcut.description))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
