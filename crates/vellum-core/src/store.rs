//! Document store: the single owner of design state and its history.
//!
//! Every mutating operation goes through `with_checkpoint`,
//! which records the pre-mutation state, applies the change and notifies
//! subscribers. Operations that reference a missing id still record a history
//! entry and return normally.

use crate::config::StoreConfig;
use crate::element::{new_element_id, Element, ElementId, ElementPatch, NewElement};
use crate::history::History;
use kurbo::Point;
use std::collections::HashSet;
use std::fmt;

/// A deep copy of the document and its selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentSnapshot {
    pub elements: Vec<Element>,
    pub selected: Option<ElementId>,
}

/// A history-recording operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Update,
    Delete,
    Duplicate,
    BringForward,
    SendBackward,
    BringToFront,
    SendToBack,
    LoadProject,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Duplicate => "duplicate",
            Operation::BringForward => "bring forward",
            Operation::SendBackward => "send backward",
            Operation::BringToFront => "bring to front",
            Operation::SendToBack => "send to back",
            Operation::LoadProject => "load project",
        }
    }
}

/// What changed, passed to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Selection,
    Mutation(Operation),
    Undo,
    Redo,
}

/// Read-only view of the store handed to subscribers.
#[derive(Debug, Clone, Copy)]
pub struct DocumentView<'a> {
    pub elements: &'a [Element],
    pub selected: Option<&'a str>,
    pub can_undo: bool,
    pub can_redo: bool,
}

/// Handle returned by [`DocumentStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&Change, &DocumentView<'_>)>;

/// Layer direction for single-step reordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Forward,
    Backward,
}

/// The design document, its selection and its undo history.
pub struct DocumentStore {
    elements: Vec<Element>,
    selected: Option<ElementId>,
    history: History<DocumentSnapshot>,
    config: StoreConfig,
    subscribers: Vec<(SubscriptionId, Callback)>,
    next_subscription: u64,
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentStore")
            .field("elements", &self.elements)
            .field("selected", &self.selected)
            .field("history", &self.history.len())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl DocumentStore {
    /// Create an empty store with the default configuration.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            elements: Vec::new(),
            selected: None,
            history: History::new(config.history_limit),
            config,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Create a store holding `elements` with an empty history.
    pub fn with_elements(elements: Vec<Element>) -> Self {
        Self {
            elements,
            ..Self::new()
        }
    }

    /// A fresh canvas: a white card (`rect1`) with a grey band (`rect2`)
    /// stacked on top of it.
    pub fn starter() -> Self {
        let card = NewElement::rectangle(400.0, 180.0)
            .with_size(300.0, 180.0)
            .into_element("rect1".to_string(), 1);
        let band = NewElement::rectangle(400.0, 360.0)
            .with_size(300.0, 160.0)
            .with_fill("#BABABA")
            .into_element("rect2".to_string(), 2);
        Self::with_elements(vec![card, band])
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // --- Reads ---

    /// Elements in insertion order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Elements in paint order (ascending z-index, insertion order on ties).
    pub fn elements_by_z(&self) -> Vec<&Element> {
        let mut ordered: Vec<&Element> = self.elements.iter().collect();
        ordered.sort_by_key(|el| el.z_index);
        ordered
    }

    /// Elements topmost first, as a layers list shows them.
    pub fn layers(&self) -> Vec<&Element> {
        let mut ordered = self.elements_by_z();
        ordered.reverse();
        ordered
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|el| el.id == id)
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// The selected element, if the selection names a live element.
    pub fn selected_element(&self) -> Option<&Element> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }

    /// Topmost element under a canvas point.
    pub fn element_at(&self, point: Point) -> Option<&Element> {
        self.layers().into_iter().find(|el| el.hit_test(point))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Number of stored history entries.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Deep copy of the current document and selection.
    pub fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            elements: self.elements.clone(),
            selected: self.selected.clone(),
        }
    }

    // --- Selection ---

    /// Set the selection. Not recorded in history.
    pub fn select(&mut self, id: Option<&str>) {
        self.selected = id.map(str::to_string);
        log::trace!("select {:?}", self.selected);
        self.notify(Change::Selection);
    }

    // --- Mutations ---

    /// Add an element on top of all others and select it.
    pub fn add_element(&mut self, new_element: NewElement) -> ElementId {
        let id = new_element_id();
        self.with_checkpoint(Operation::Add, |elements, selected| {
            let z_index = above_all(elements);
            elements.push(new_element.into_element(id.clone(), z_index));
            *selected = Some(id.clone());
        });
        id
    }

    /// Merge `patch` into the element with `id`.
    pub fn update_element(&mut self, id: &str, patch: ElementPatch) {
        self.with_checkpoint(Operation::Update, |elements, _| {
            if let Some(element) = elements.iter_mut().find(|el| el.id == id) {
                patch.apply(element);
            }
        });
    }

    /// Remove the element with `id`, clearing the selection if it pointed there.
    pub fn delete_element(&mut self, id: &str) {
        self.with_checkpoint(Operation::Delete, |elements, selected| {
            elements.retain(|el| el.id != id);
            if selected.as_deref() == Some(id) {
                *selected = None;
            }
        });
    }

    /// Copy an element under a fresh id, offset and on top, and select the
    /// copy. Returns the new id, or `None` if `id` was not found.
    pub fn duplicate_element(&mut self, id: &str) -> Option<ElementId> {
        let offset = self.config.duplicate_offset;
        self.with_checkpoint(Operation::Duplicate, |elements, selected| {
            let mut copy = elements.iter().find(|el| el.id == id)?.clone();
            copy.id = new_element_id();
            copy.translate(offset);
            copy.z_index = above_all(elements);
            let new_id = copy.id.clone();
            elements.push(copy);
            *selected = Some(new_id.clone());
            Some(new_id)
        })
    }

    /// Swap z-index with the nearest element above.
    pub fn bring_forward(&mut self, id: &str) {
        self.with_checkpoint(Operation::BringForward, |elements, _| {
            swap_with_neighbor(elements, id, Step::Forward);
        });
    }

    /// Swap z-index with the nearest element below.
    pub fn send_backward(&mut self, id: &str) {
        self.with_checkpoint(Operation::SendBackward, |elements, _| {
            swap_with_neighbor(elements, id, Step::Backward);
        });
    }

    /// Move above every element. Other elements keep their z-index.
    pub fn bring_to_front(&mut self, id: &str) {
        self.with_checkpoint(Operation::BringToFront, |elements, _| {
            let z_index = above_all(elements);
            if let Some(element) = elements.iter_mut().find(|el| el.id == id) {
                element.z_index = z_index;
            }
        });
    }

    /// Move below every element. Other elements keep their z-index.
    pub fn send_to_back(&mut self, id: &str) {
        self.with_checkpoint(Operation::SendToBack, |elements, _| {
            let z_index = below_all(elements);
            if let Some(element) = elements.iter_mut().find(|el| el.id == id) {
                element.z_index = z_index;
            }
        });
    }

    /// Replace the whole document and clear the selection.
    ///
    /// The elements are taken as-is; well-formedness is the caller's concern.
    pub fn load_project(&mut self, new_elements: Vec<Element>) {
        let mut seen = HashSet::new();
        if let Some(dup) = new_elements.iter().find(|el| !seen.insert(el.id.as_str())) {
            log::warn!("loaded document contains duplicate element id {}", dup.id);
        }

        self.with_checkpoint(Operation::LoadProject, |elements, selected| {
            *elements = new_elements;
            *selected = None;
        });
    }

    // --- History ---

    /// Restore the state before the most recent mutation.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        if !self.history.can_undo() {
            return false;
        }
        let current = self.snapshot();
        match self.history.undo(current) {
            Some(previous) => {
                self.restore(previous);
                log::trace!("undo, {} more available", self.history.undo_depth());
                self.notify(Change::Undo);
                true
            }
            None => false,
        }
    }

    /// Re-apply the most recently undone mutation.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        if !self.history.can_redo() {
            return false;
        }
        let current = self.snapshot();
        match self.history.redo(current) {
            Some(next) => {
                self.restore(next);
                log::trace!("redo, {} more available", self.history.redo_depth());
                self.notify(Change::Redo);
                true
            }
            None => false,
        }
    }

    /// Forget all undo and redo entries.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    // --- Subscriptions ---

    /// Register a callback run after every completed operation.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&Change, &DocumentView<'_>) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    // --- Internals ---

    /// Record the current state, apply `mutate`, then notify subscribers.
    fn with_checkpoint<R>(
        &mut self,
        operation: Operation,
        mutate: impl FnOnce(&mut Vec<Element>, &mut Option<ElementId>) -> R,
    ) -> R {
        self.history.checkpoint(self.snapshot());
        let result = mutate(&mut self.elements, &mut self.selected);
        log::debug!(
            "{}: {} elements, {} history entries",
            operation.name(),
            self.elements.len(),
            self.history.len()
        );
        self.notify(Change::Mutation(operation));
        result
    }

    fn restore(&mut self, snapshot: DocumentSnapshot) {
        self.elements = snapshot.elements;
        self.selected = snapshot.selected;
    }

    fn notify(&mut self, change: Change) {
        if self.subscribers.is_empty() {
            return;
        }
        let view = DocumentView {
            elements: &self.elements,
            selected: self.selected.as_deref(),
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        };
        for (_, callback) in self.subscribers.iter_mut() {
            callback(&change, &view);
        }
    }
}

/// `max(z-indices, 0) + 1`.
fn above_all(elements: &[Element]) -> i64 {
    let max = elements.iter().map(|el| el.z_index).max().unwrap_or(0);
    max.max(0).saturating_add(1)
}

/// `min(z-indices, 0) - 1`.
fn below_all(elements: &[Element]) -> i64 {
    let min = elements.iter().map(|el| el.z_index).min().unwrap_or(0);
    min.min(0).saturating_sub(1)
}

/// Exchange z-index with the closest element above (or below). The first such
/// element in insertion order wins ties. No-op at the top (or bottom).
fn swap_with_neighbor(elements: &mut [Element], id: &str, step: Step) {
    let Some(target) = elements.iter().position(|el| el.id == id) else {
        return;
    };
    let z = elements[target].z_index;

    let candidates = elements.iter().map(|el| el.z_index);
    let neighbor_z = match step {
        Step::Forward => candidates.filter(|&other| other > z).min(),
        Step::Backward => candidates.filter(|&other| other < z).max(),
    };
    let Some(neighbor_z) = neighbor_z else {
        return;
    };
    let Some(neighbor) = elements.iter().position(|el| el.z_index == neighbor_z) else {
        return;
    };

    elements[target].z_index = neighbor_z;
    elements[neighbor].z_index = z;
}
