//! User-level commands dispatched onto the store.
//!
//! Commands act on the current selection, which is how toolbar buttons and
//! keyboard shortcuts address elements.

use crate::align::{Alignment, Nudge};
use crate::element::ElementPatch;
use crate::store::DocumentStore;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    DeleteSelected,
    DuplicateSelected,
    Undo,
    Redo,
    /// Move the selection; `large` uses the large step.
    Nudge { direction: Nudge, large: bool },
    BringForward,
    SendBackward,
    BringToFront,
    SendToBack,
    Align(Alignment),
    /// Flip a text element between normal and bold.
    ToggleBold,
    /// Flip a text element between normal and italic.
    ToggleItalic,
    Deselect,
}

impl Command {
    /// Check if the command needs a selection to do anything.
    pub fn needs_selection(&self) -> bool {
        !matches!(self, Command::Undo | Command::Redo | Command::Deselect)
    }
}

impl DocumentStore {
    /// Run a command. Returns false if it had nothing to act on.
    ///
    /// Selection-based commands with no selection do nothing and record no
    /// history entry.
    pub fn execute(&mut self, command: Command) -> bool {
        log::debug!("execute {:?}", command);

        let selected = self.selected_id().map(str::to_string);
        if command.needs_selection() && selected.is_none() {
            return false;
        }
        let id = selected.as_deref().unwrap_or_default();

        match command {
            Command::Undo => self.undo(),
            Command::Redo => self.redo(),
            Command::Deselect => {
                self.select(None);
                true
            }
            Command::DeleteSelected => {
                self.delete_element(id);
                true
            }
            Command::DuplicateSelected => self.duplicate_element(id).is_some(),
            Command::Nudge { direction, large } => self.nudge_selected_by_step(direction, large),
            Command::BringForward => {
                self.bring_forward(id);
                true
            }
            Command::SendBackward => {
                self.send_backward(id);
                true
            }
            Command::BringToFront => {
                self.bring_to_front(id);
                true
            }
            Command::SendToBack => {
                self.send_to_back(id);
                true
            }
            Command::Align(alignment) => self.align_selected(alignment),
            Command::ToggleBold => self.toggle_text_style(id, true),
            Command::ToggleItalic => self.toggle_text_style(id, false),
        }
    }

    /// Only text elements carry weight and style; anything else is a no-op.
    fn toggle_text_style(&mut self, id: &str, bold: bool) -> bool {
        let Some(element) = self.get(id).filter(|el| el.is_text()) else {
            return false;
        };
        let patch = if bold {
            ElementPatch {
                font_weight: Some(element.font_weight.unwrap_or_default().toggled()),
                ..ElementPatch::new()
            }
        } else {
            ElementPatch {
                font_style: Some(element.font_style.unwrap_or_default().toggled()),
                ..ElementPatch::new()
            }
        };
        self.update_element(id, patch);
        true
    }
}
