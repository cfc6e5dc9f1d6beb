//! Completion tally of a list snapshot.

use serde::Serialize;

use super::todo::TodoItem;

/// Finished vs. unfinished counts of a list snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TodoSummary {
    pub finished: usize,
    pub unfinished: usize,
}

impl TodoSummary {
    /// Tallies the given items.
    #[must_use]
    pub fn tally<'a>(items: impl IntoIterator<Item = &'a TodoItem>) -> Self {
        items
            .into_iter()
            .fold(Self::default(), |summary, item| {
                if item.finished {
                    Self {
                        finished: summary.finished + 1,
                        ..summary
                    }
                } else {
                    Self {
                        unfinished: summary.unfinished + 1,
                        ..summary
                    }
                }
            })
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.finished + self.unfinished
    }

    /// Finished share in whole percent, rounded down; `0` for an empty list.
    #[must_use]
    pub const fn completion_percent(&self) -> usize {
        match self.total() {
            0 => 0,
            total => self.finished * 100 / total,
        }
    }
}
