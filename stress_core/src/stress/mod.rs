//! Stress tracks - Numbered boxes that soak up a hit

mod track;

pub use track::{SelectedBox, StressBox, StressTrack};
