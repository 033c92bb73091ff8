//! Bounded, insertion-ordered set of selected country codes.

use shared::domain::CountryCode;

pub const SELECTION_CAPACITY: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// The code was not selected and the set is already full.
    Refused,
}

/// At most [`SELECTION_CAPACITY`] codes; `members()[0]` is the first one added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSet {
    members: Vec<CountryCode>,
}

impl Default for SelectionSet {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionSet {
    pub fn new() -> Self {
        Self {
            members: Vec::with_capacity(SELECTION_CAPACITY),
        }
    }

    pub fn contains(&self, code: &CountryCode) -> bool {
        self.members.contains(code)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= SELECTION_CAPACITY
    }

    pub fn members(&self) -> &[CountryCode] {
        &self.members
    }

    /// Returns `false` when the code is already present or the set is full.
    pub fn add(&mut self, code: CountryCode) -> bool {
        if self.contains(&code) || self.is_full() {
            return false;
        }
        self.members.push(code);
        true
    }

    pub fn remove(&mut self, code: &CountryCode) -> bool {
        let before = self.members.len();
        self.members.retain(|member| member != code);
        self.members.len() != before
    }

    pub fn toggle(&mut self, code: &CountryCode) -> ToggleOutcome {
        if self.remove(code) {
            ToggleOutcome::Removed
        } else if self.add(code.clone()) {
            ToggleOutcome::Added
        } else {
            ToggleOutcome::Refused
        }
    }

    /// Whether a checkbox for `code` should be interactive.
    pub fn can_toggle(&self, code: &CountryCode) -> bool {
        self.contains(code) || !self.is_full()
    }
}
