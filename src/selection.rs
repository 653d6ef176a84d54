//! Suggestion dropdown state machine.
//!
//! Owns the current suggestion list and which row is highlighted. Every input
//! binding funnels into [`SelectionController::dispatch`].

use crate::suggest::Suggestion;

#[derive(Clone, Debug)]
pub enum SelectionEvent {
    /// The query changed and the engine produced a fresh list.
    QueryChanged(Vec<Suggestion>),
    MoveNext,
    MovePrev,
    Commit,
    Dismiss,
}

/// What Enter means right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnterIntent {
    Commit,
    SubmitRaw,
}

#[derive(Clone, Debug, Default)]
pub struct SelectionController {
    suggestions: Vec<Suggestion>,
    highlighted: Option<usize>,
    visible: bool,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event. Returns the accepted suggestion on a successful commit.
    pub fn dispatch(&mut self, event: SelectionEvent) -> Option<Suggestion> {
        match event {
            SelectionEvent::QueryChanged(list) => {
                self.highlighted = if list.is_empty() { None } else { Some(0) };
                self.visible = !list.is_empty();
                self.suggestions = list;
                None
            }
            SelectionEvent::MoveNext => {
                if let Some(len) = self.navigable_len() {
                    self.highlighted = Some(self.highlighted.map_or(0, |i| (i + 1) % len));
                }
                None
            }
            SelectionEvent::MovePrev => {
                if let Some(len) = self.navigable_len() {
                    self.highlighted =
                        Some(self.highlighted.map_or(len - 1, |i| (i + len - 1) % len));
                }
                None
            }
            SelectionEvent::Commit => {
                if !self.visible {
                    return None;
                }
                let picked = self.highlighted.and_then(|i| self.suggestions.get(i).cloned())?;
                self.reset();
                Some(picked)
            }
            SelectionEvent::Dismiss => {
                self.reset();
                None
            }
        }
    }

    pub fn enter_intent(&self) -> EnterIntent {
        if self.visible && self.highlighted.is_some() {
            EnterIntent::Commit
        } else {
            EnterIntent::SubmitRaw
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    fn navigable_len(&self) -> Option<usize> {
        (self.visible && !self.suggestions.is_empty()).then_some(self.suggestions.len())
    }

    fn reset(&mut self) {
        self.suggestions.clear();
        self.highlighted = None;
        self.visible = false;
    }
}
