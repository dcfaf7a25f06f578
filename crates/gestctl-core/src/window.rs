//! Bounded FIFO of accepted gesture labels.

use std::collections::VecDeque;

use crate::types::GestureLabel;

/// The last `capacity` accepted labels, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GestureWindow {
    labels: VecDeque<GestureLabel>,
    capacity: usize,
}

impl GestureWindow {
    /// Creates an empty window. A capacity of zero is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            labels: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends `label`, returning the evicted oldest label if the window was
    /// already full.
    pub fn push(&mut self, label: GestureLabel) -> Option<GestureLabel> {
        let evicted = if self.is_full() {
            self.labels.pop_front()
        } else {
            None
        };
        self.labels.push_back(label);
        evicted
    }

    /// Maximum number of labels held.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of labels held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if no labels are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns true if the window holds `capacity` labels.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.labels.len() >= self.capacity
    }

    /// Drops every label.
    pub fn clear(&mut self) {
        self.labels.clear();
    }

    /// Iterates over the labels, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = GestureLabel> + '_ {
        self.labels.iter().copied()
    }

    /// Counts occurrences of `label`.
    #[must_use]
    pub fn count(&self, label: GestureLabel) -> usize {
        self.labels.iter().filter(|&&l| l == label).count()
    }

    /// The most frequent label.
    ///
    /// Ties go to the label whose first occurrence is oldest. Returns `None`
    /// for an empty window.
    #[must_use]
    pub fn majority(&self) -> Option<GestureLabel> {
        // Tallies in first-occurrence order.
        let mut tallies: Vec<(GestureLabel, usize)> = Vec::with_capacity(GestureLabel::ALL.len());
        for &label in &self.labels {
            match tallies.iter_mut().find(|(seen, _)| *seen == label) {
                Some((_, count)) => *count += 1,
                None => tallies.push((label, 1)),
            }
        }

        tallies
            .into_iter()
            .fold(None, |best: Option<(GestureLabel, usize)>, (label, count)| {
                match best {
                    Some((_, best_count)) if best_count >= count => best,
                    _ => Some((label, count)),
                }
            })
            .map(|(label, _)| label)
    }
}
