//! StressTrack - Box selection, filling and healing

use crate::error::CombatError;
use serde::{Deserialize, Serialize};

/// A single stress box
///
/// Boxes are identified by position, so two boxes sharing a capacity stay distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StressBox {
    /// Largest hit this box can soak on its own
    pub capacity: i32,
    /// Whether the box is checked off
    #[serde(default)]
    pub filled: bool,
    /// Temporary boxes are dropped at the end of a scene
    #[serde(default)]
    pub temporary: bool,
}

impl StressBox {
    fn new(capacity: i32, temporary: bool) -> Result<Self, CombatError> {
        if capacity <= 0 {
            return Err(CombatError::InvalidCapacity(capacity));
        }
        Ok(StressBox {
            capacity,
            filled: false,
            temporary,
        })
    }
}

/// Box chosen to absorb a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedBox {
    pub index: usize,
    pub capacity: i32,
}

/// An ordered list of stress boxes
///
/// Restoring a snapshot goes through the same capacity check as [`StressTrack::new`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TrackRecord")]
pub struct StressTrack {
    boxes: Vec<StressBox>,
}

/// Serialized form of a track before validation
#[derive(Deserialize)]
struct TrackRecord {
    #[serde(default)]
    boxes: Vec<StressBox>,
}

impl TryFrom<TrackRecord> for StressTrack {
    type Error = CombatError;

    fn try_from(record: TrackRecord) -> Result<Self, Self::Error> {
        if let Some(bad) = record.boxes.iter().find(|b| b.capacity <= 0) {
            return Err(CombatError::InvalidCapacity(bad.capacity));
        }
        Ok(StressTrack {
            boxes: record.boxes,
        })
    }
}

impl StressTrack {
    /// Create a track with the given box capacities, all unfilled
    pub fn new(capacities: impl IntoIterator<Item = i32>) -> Result<Self, CombatError> {
        let boxes = capacities
            .into_iter()
            .map(|capacity| StressBox::new(capacity, false))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(StressTrack { boxes })
    }

    /// All boxes in track order
    pub fn boxes(&self) -> &[StressBox] {
        &self.boxes
    }

    /// Capacities of every box in track order
    pub fn capacities(&self) -> Vec<i32> {
        self.boxes.iter().map(|b| b.capacity).collect()
    }

    /// Capacities of the filled boxes in track order
    pub fn filled_capacities(&self) -> Vec<i32> {
        self.boxes
            .iter()
            .filter(|b| b.filled)
            .map(|b| b.capacity)
            .collect()
    }

    /// Capacities of the temporary boxes in track order
    pub fn temporary_capacities(&self) -> Vec<i32> {
        self.boxes
            .iter()
            .filter(|b| b.temporary)
            .map(|b| b.capacity)
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.boxes.iter().all(|b| b.filled)
    }

    pub fn has_filled(&self) -> bool {
        self.boxes.iter().any(|b| b.filled)
    }

    /// Find the smallest unfilled box able to take a hit of `amount` by itself
    ///
    /// Ties on capacity resolve to the earliest box. Only one box ever
    /// absorbs a hit; boxes are not combined.
    pub fn find_best_box(&self, amount: i32) -> Option<SelectedBox> {
        self.boxes
            .iter()
            .enumerate()
            .filter(|(_, b)| !b.filled && b.capacity >= amount)
            .min_by_key(|(index, b)| (b.capacity, *index))
            .map(|(index, b)| SelectedBox {
                index,
                capacity: b.capacity,
            })
    }

    /// Check off the box at `index`; filling an already filled box is a no-op
    ///
    /// Returns false if the index is out of range.
    pub fn fill_box(&mut self, index: usize) -> bool {
        match self.boxes.get_mut(index) {
            Some(b) => {
                b.filled = true;
                true
            }
            None => false,
        }
    }

    /// Check off the first unfilled box with exactly this capacity
    ///
    /// Used to restore a snapshot recorded as a list of filled values.
    pub fn mark_filled(&mut self, capacity: i32) -> bool {
        match self
            .boxes
            .iter_mut()
            .find(|b| !b.filled && b.capacity == capacity)
        {
            Some(b) => {
                b.filled = true;
                true
            }
            None => false,
        }
    }

    /// Clear filled boxes smallest first while the budget covers them
    ///
    /// Stops at the first filled box the budget cannot pay for, even if a
    /// later box would fit. Returns the unspent budget.
    pub fn heal_smallest(&mut self, budget: i32) -> i32 {
        self.heal_smallest_each(budget, |_| {})
    }

    /// Same as [`StressTrack::heal_smallest`], calling `on_heal` with each cleared capacity
    pub fn heal_smallest_each(&mut self, budget: i32, mut on_heal: impl FnMut(i32)) -> i32 {
        let mut remaining = budget;

        while let Some(index) = self.smallest_filled() {
            let capacity = self.boxes[index].capacity;
            if remaining < capacity {
                break;
            }
            self.boxes[index].filled = false;
            remaining -= capacity;
            on_heal(capacity);
        }

        remaining
    }

    /// Append a temporary box
    pub fn add_temporary(&mut self, capacity: i32) -> Result<(), CombatError> {
        self.boxes.push(StressBox::new(capacity, true)?);
        Ok(())
    }

    /// Drop every temporary box, filled or not
    ///
    /// Returns how many boxes were removed.
    pub fn clear_temporary(&mut self) -> usize {
        let before = self.boxes.len();
        self.boxes.retain(|b| !b.temporary);
        before - self.boxes.len()
    }

    fn smallest_filled(&self) -> Option<usize> {
        self.boxes
            .iter()
            .enumerate()
            .filter(|(_, b)| b.filled)
            .min_by_key(|(index, b)| (b.capacity, *index))
            .map(|(index, _)| index)
    }
}
