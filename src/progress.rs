//! Progress Calculation
//!
//! Completion percentages derived from the current tree. Never stored on
//! the entities, so they cannot go stale after an edit.

use crate::models::{Inspection, Section};
use crate::tree::{items_in, Container};

/// Checked and total item counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    pub checked: usize,
    pub total: usize,
}

impl Tally {
    /// Rounded percentage; 0 when there is nothing to check
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.checked as f64 / self.total as f64) * 100.0).round() as u8
    }
}

/// Tally a container and all of its descendant subsections
pub fn tally(container: &dyn Container) -> Tally {
    let items = items_in(container);
    Tally {
        checked: items.iter().filter(|i| i.checked).count(),
        total: items.len(),
    }
}

/// Section completion, 0–100
pub fn progress(section: &Section) -> u8 {
    tally(section).percent()
}

/// Completion of any section or subsection, 0–100
pub fn container_progress(container: &dyn Container) -> u8 {
    tally(container).percent()
}

/// Completion across every section of the inspection, 0–100
pub fn inspection_progress(inspection: &Inspection) -> u8 {
    let total = inspection
        .sections
        .iter()
        .map(|s| tally(s))
        .fold(Tally::default(), |acc, t| Tally {
            checked: acc.checked + t.checked,
            total: acc.total + t.total,
        });
    total.percent()
}
