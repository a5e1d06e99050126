//! Registry of observation dates offered by the date picker.
//!
//! The index is fetched once per session and never refreshed; the registry
//! only tracks which date is highlighted.

use foundation::ObservationDate;
use serde::Serialize;

/// Available observation dates in server order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DateIndex {
    dates: Vec<ObservationDate>,
}

impl DateIndex {
    pub fn new(dates: Vec<ObservationDate>) -> Self {
        Self { dates }
    }

    pub fn dates(&self) -> &[ObservationDate] {
        &self.dates
    }

    pub fn contains(&self, date: &ObservationDate) -> bool {
        self.dates.iter().any(|d| d == date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// One row of the date picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateEntry {
    pub date: String,
    /// `YYYY/MM/DD` form shown to the user.
    pub label: String,
    pub active: bool,
}

/// Date picker state: a populate-once index plus the highlighted date.
///
/// Highlighting is a single slot, so at most one entry is ever active.
#[derive(Debug, Default, Clone)]
pub struct DateRegistry {
    index: Option<DateIndex>,
    active: Option<ObservationDate>,
}

impl DateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_populated(&self) -> bool {
        self.index.is_some()
    }

    /// Installs the fetched dates.
    ///
    /// Only the first call has an effect; later calls leave the index as it
    /// is and return `false`.
    pub fn populate(&mut self, dates: Vec<ObservationDate>) -> bool {
        if self.index.is_some() {
            return false;
        }
        self.index = Some(DateIndex::new(dates));
        true
    }

    pub fn index(&self) -> Option<&DateIndex> {
        self.index.as_ref()
    }

    pub fn dates(&self) -> &[ObservationDate] {
        self.index.as_ref().map(DateIndex::dates).unwrap_or(&[])
    }

    /// Moves the highlight to `date`, replacing any previous highlight.
    ///
    /// The date is remembered even when it is not (yet) in the index; such a
    /// date highlights no entry. Returns whether an entry is now highlighted.
    pub fn mark_active(&mut self, date: ObservationDate) -> bool {
        let present = self.index.as_ref().is_some_and(|ix| ix.contains(&date));
        self.active = Some(date);
        present
    }

    pub fn active(&self) -> Option<&ObservationDate> {
        self.active.as_ref()
    }

    pub fn entries(&self) -> Vec<DateEntry> {
        self.dates()
            .iter()
            .map(|d| DateEntry {
                date: d.as_str().to_string(),
                label: d.display(),
                active: self.active.as_ref() == Some(d),
            })
            .collect()
    }
}
