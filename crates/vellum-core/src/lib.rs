//! Vellum Core Library
//!
//! Platform-agnostic document model for the Vellum design canvas: elements,
//! layer ordering, undo/redo history, project files and the saved-project slot.

pub mod align;
pub mod color;
pub mod command;
pub mod config;
pub mod element;
pub mod history;
pub mod project;
pub mod shortcuts;
pub mod storage;
pub mod store;

pub use align::{Alignment, Nudge};
pub use color::FillColor;
pub use command::Command;
pub use config::{ConfigError, StoreConfig};
pub use element::{
    Element, ElementId, ElementKind, ElementPatch, FontStyle, FontWeight, NewElement, TextAlign,
    TextDecoration,
};
pub use history::{History, DEFAULT_HISTORY_LIMIT};
pub use project::{ProjectError, ProjectFile};
pub use shortcuts::{Shortcut, ShortcutRegistry};
pub use storage::{MemorySlot, ProjectSlot, StorageError, StorageResult, PROJECT_SLOT_KEY};
pub use store::{Change, DocumentSnapshot, DocumentStore, DocumentView, Operation, SubscriptionId};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileSlot;
