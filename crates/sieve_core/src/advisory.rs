/// The advisory only appears once more than this many items are done.
pub const ADVISORY_MIN_DONE: usize = 20;

/// Presentation tally over every finished item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    pub done: usize,
    pub shown: usize,
}

impl Tally {
    pub fn hidden(&self) -> usize {
        self.done.saturating_sub(self.shown)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    Show,
    Hide,
}

/// Suggests relaxing the filter when a sizeable feed has nothing left visible.
pub fn advise(tally: Tally) -> Advisory {
    if tally.done > ADVISORY_MIN_DONE && tally.shown == 0 {
        Advisory::Show
    } else {
        Advisory::Hide
    }
}
