//! Alignment against the artboard and keyboard nudging of the selection.

use crate::element::{Element, ElementPatch};
use crate::store::DocumentStore;
use kurbo::{Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Where to align the selected element within the artboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Top,
    Middle,
    Bottom,
}

impl Alignment {
    /// The position patch that aligns `element` within `artboard`.
    pub fn patch_for(self, element: &Element, artboard: Rect) -> ElementPatch {
        let x = match self {
            Alignment::Left => Some(artboard.x0),
            Alignment::Center => Some(artboard.center().x - element.width / 2.0),
            Alignment::Right => Some(artboard.x1 - element.width),
            _ => None,
        };
        let y = match self {
            Alignment::Top => Some(artboard.y0),
            Alignment::Middle => Some(artboard.center().y - element.height / 2.0),
            Alignment::Bottom => Some(artboard.y1 - element.height),
            _ => None,
        };
        ElementPatch {
            x,
            y,
            ..ElementPatch::default()
        }
    }
}

/// Arrow-key direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Nudge {
    Up,
    Down,
    Left,
    Right,
}

impl Nudge {
    /// Unit direction in canvas coordinates (y grows downward).
    pub fn direction(self) -> Vec2 {
        match self {
            Nudge::Up => Vec2::new(0.0, -1.0),
            Nudge::Down => Vec2::new(0.0, 1.0),
            Nudge::Left => Vec2::new(-1.0, 0.0),
            Nudge::Right => Vec2::new(1.0, 0.0),
        }
    }
}

impl DocumentStore {
    /// Align the selected element against the configured artboard.
    ///
    /// Returns false, without touching history, when nothing live is
    /// selected.
    pub fn align_selected(&mut self, alignment: Alignment) -> bool {
        let Some(element) = self.selected_element() else {
            return false;
        };
        let id = element.id().to_string();
        let patch = alignment.patch_for(element, self.config().artboard);
        self.update_element(&id, patch);
        true
    }

    /// Move the selected element by `offset`.
    ///
    /// Returns false, without touching history, when nothing live is
    /// selected.
    pub fn nudge_selected(&mut self, offset: Vec2) -> bool {
        let Some(element) = self.selected_element() else {
            return false;
        };
        let id = element.id().to_string();
        let patch = ElementPatch::position(element.x + offset.x, element.y + offset.y);
        self.update_element(&id, patch);
        true
    }

    /// Nudge by the configured step, or the large step when `large` is set.
    pub fn nudge_selected_by_step(&mut self, nudge: Nudge, large: bool) -> bool {
        let step = if large {
            self.config().nudge_step_large
        } else {
            self.config().nudge_step
        };
        self.nudge_selected(nudge.direction() * step)
    }
}
