use std::fmt;

/// An observation date in `YYYYMMDD` form.
///
/// The value is carried as received; no calendar validation is performed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ObservationDate(String);

impl ObservationDate {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `YYYYMMDD` -> `YYYY/MM/DD`.
    pub fn display(&self) -> String {
        format_for_display(&self.0)
    }
}

impl fmt::Display for ObservationDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObservationDate {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ObservationDate {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// Splits a `YYYYMMDD` string into `YYYY/MM/DD`.
///
/// Slices by character position only. Short or malformed input produces
/// correspondingly short or malformed output (`"2024"` -> `"2024//"`).
pub fn format_for_display(raw: &str) -> String {
    let year: String = raw.chars().take(4).collect();
    let month: String = raw.chars().skip(4).take(2).collect();
    let day: String = raw.chars().skip(6).take(2).collect();
    format!("{year}/{month}/{day}")
}

#[cfg(test)]
mod tests {
    use super::{ObservationDate, format_for_display};

    #[test]
    fn formats_compact_date() {
        assert_eq!(format_for_display("20240315"), "2024/03/15");
        assert_eq!(ObservationDate::from("20231201").display(), "2023/12/01");
    }

    #[test]
    fn malformed_input_passes_through() {
        assert_eq!(format_for_display("2024"), "2024//");
        assert_eq!(format_for_display(""), "//");
        assert_eq!(format_for_display("2024-03-15"), "2024/-0/3-");
        // Trailing characters beyond the day are dropped.
        assert_eq!(format_for_display("2024031599"), "2024/03/15");
    }

    #[test]
    fn orders_lexicographically() {
        let a = ObservationDate::from("20240101");
        let b = ObservationDate::from("20240201");
        assert!(a < b);
    }
}
