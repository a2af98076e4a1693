//! Position within the filtered record set.
//!
//! [`NavigationState`] holds only an offset and the size of the collection it
//! points into, never the records themselves. Every operation clamps, so the
//! index is always valid: `index < total` when `total > 0`, and `index == 0`
//! when the collection is empty.
//!
//! Mutating operations return whether the index changed, for redraw tracking.

/// Current offset into the filtered set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigationState {
    index: usize,
    total: usize,
}

impl NavigationState {
    pub fn new(total: usize) -> Self {
        Self { index: 0, total }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Current position, or None when there is nothing to show
    pub fn current(&self) -> Option<usize> {
        (self.total > 0).then_some(self.index)
    }

    pub fn step_back(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            return true;
        }
        false
    }

    pub fn step_forward(&mut self) -> bool {
        if self.total > 0 && self.index < self.total - 1 {
            self.index += 1;
            return true;
        }
        false
    }

    /// Move directly to `target`, clamped to the last valid position
    pub fn jump_to(&mut self, target: usize) -> bool {
        let old_index = self.index;
        self.index = if self.total == 0 { 0 } else { target.min(self.total - 1) };
        old_index != self.index
    }

    /// Move by a signed amount, clamped at both ends
    pub fn step_by(&mut self, delta: isize) -> bool {
        let target = self.index.saturating_add_signed(delta);
        self.jump_to(target)
    }

    pub fn first(&mut self) -> bool {
        self.jump_to(0)
    }

    pub fn last(&mut self) -> bool {
        self.jump_to(self.total.saturating_sub(1))
    }

    /// Adopt a new collection size; an index past the end resets to the start
    pub fn reconcile(&mut self, new_total: usize) {
        self.total = new_total;
        if self.index >= new_total {
            self.index = 0;
        }
    }

    /// "Entry 3 / 10" (1-based), or "Entry 0 / 0" when empty
    pub fn position_label(&self) -> String {
        match self.current() {
            Some(index) => format!("Entry {} / {}", index + 1, self.total),
            None => "Entry 0 / 0".to_string(),
        }
    }
}
