use std::collections::BTreeSet;

use rand::seq::index;

use crate::error::ValidationError;

/// Number of tracks picked by [`TrackSelection::select_random`].
pub const RANDOM_PICK: usize = 3;

/// Set of selected positions into a loaded track list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackSelection {
    available: usize,
    selected: BTreeSet<usize>,
}

impl TrackSelection {
    pub fn new(available: usize) -> Self {
        Self {
            available,
            selected: BTreeSet::new(),
        }
    }

    pub fn available(&self) -> usize {
        self.available
    }

    pub fn indices(&self) -> Vec<usize> {
        self.selected.iter().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// Replaces the selection. Nothing changes if any index is out of range.
    pub fn select(&mut self, indices: &[usize]) -> Result<(), ValidationError> {
        self.check_all(indices)?;
        self.selected = indices.iter().copied().collect();
        Ok(())
    }

    pub fn toggle(&mut self, index: usize) -> Result<(), ValidationError> {
        self.check(index)?;
        if !self.selected.remove(&index) {
            self.selected.insert(index);
        }
        Ok(())
    }

    pub fn select_all(&mut self) {
        self.selected = (0..self.available).collect();
    }

    pub fn select_none(&mut self) {
        self.selected.clear();
    }

    /// Clears the selection, then picks `min(3, available)` distinct tracks
    /// uniformly at random.
    pub fn select_random(&mut self) {
        let amount = RANDOM_PICK.min(self.available);
        self.selected = index::sample(&mut rand::rng(), self.available, amount)
            .into_iter()
            .collect();
    }

    fn check(&self, index: usize) -> Result<(), ValidationError> {
        if index < self.available {
            Ok(())
        } else {
            Err(ValidationError::TrackOutOfRange {
                index,
                available: self.available,
            })
        }
    }

    fn check_all(&self, indices: &[usize]) -> Result<(), ValidationError> {
        indices.iter().try_for_each(|i| self.check(*i))
    }
}
