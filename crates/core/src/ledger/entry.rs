//! Journal entry numbering.
//!
//! Entry numbers have the shape `<prefix>-<year>-<sequence>`, e.g. `JE-2025-00001`.
//! The sequence is scoped to a tenant and a year prefix. Numbers must be unique
//! and increasing within that scope; gaps are acceptable.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Recoverable problem found while deriving the next sequence value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequenceWarning {
    /// No existing number in the scope has a parsable sequence suffix.
    Malformed {
        /// The offending entry number.
        entry_number: String,
    },
}

impl fmt::Display for SequenceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { entry_number } => {
                write!(f, "unparsable entry number sequence: {entry_number}")
            }
        }
    }
}

/// The next sequence value, possibly with a warning about the state it was derived from.
///
/// A warning never aborts posting; callers decide whether to log and continue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceAllocation {
    /// Sequence value to use.
    pub value: u64,
    /// Set when the value is a fallback.
    pub warning: Option<SequenceWarning>,
}

impl SequenceAllocation {
    /// An allocation derived from well-formed state.
    #[must_use]
    pub const fn clean(value: u64) -> Self {
        Self {
            value,
            warning: None,
        }
    }
}

/// Formatting rules for entry numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryNumberFormat {
    /// Leading tag, `JE` by default.
    pub prefix: String,
    /// Zero-padded width of the sequence part.
    pub width: usize,
}

impl Default for EntryNumberFormat {
    fn default() -> Self {
        Self {
            prefix: "JE".to_string(),
            width: 5,
        }
    }
}

impl EntryNumberFormat {
    /// Creates a format with the given prefix and sequence width.
    #[must_use]
    pub fn new(prefix: impl Into<String>, width: usize) -> Self {
        Self {
            prefix: prefix.into(),
            width,
        }
    }

    /// The sequence scope for a year, e.g. `JE-2025`.
    #[must_use]
    pub fn year_prefix(&self, year: i32) -> String {
        format!("{}-{year}", self.prefix)
    }

    /// Formats a full entry number.
    #[must_use]
    pub fn format(&self, year: i32, sequence: u64) -> String {
        format!(
            "{}-{sequence:0width$}",
            self.year_prefix(year),
            width = self.width
        )
    }

    /// Extracts the trailing sequence value of an entry number.
    ///
    /// # Errors
    ///
    /// Returns `SequenceWarning::Malformed` if the suffix after the last `-`
    /// is missing or not a number.
    pub fn parse_sequence(&self, entry_number: &str) -> Result<u64, SequenceWarning> {
        sequence_suffix(entry_number).ok_or_else(|| SequenceWarning::Malformed {
            entry_number: entry_number.to_string(),
        })
    }

    /// Derives the next sequence value from the latest existing number in a scope.
    ///
    /// No existing number yields 1. An unparsable number also yields 1, tagged
    /// with a warning.
    #[must_use]
    pub fn next_after(&self, latest: Option<&str>) -> SequenceAllocation {
        self.next_after_highest(latest)
    }

    /// Derives the next sequence value from every existing number in a scope.
    ///
    /// Sequences compare numerically and unparsable numbers are skipped. Only
    /// when numbers exist and none of them parse does the value fall back to 1,
    /// tagged with a warning naming the first offender.
    #[must_use]
    pub fn next_after_highest<'a>(
        &self,
        numbers: impl IntoIterator<Item = &'a str>,
    ) -> SequenceAllocation {
        let mut highest: Option<u64> = None;
        let mut malformed = None;
        for number in numbers {
            match self.parse_sequence(number) {
                Ok(value) => highest = highest.max(Some(value)),
                Err(warning) => {
                    malformed.get_or_insert(warning);
                }
            }
        }

        match (highest, malformed) {
            (Some(value), _) => SequenceAllocation::clean(value.saturating_add(1)),
            (None, Some(warning)) => SequenceAllocation {
                value: 1,
                warning: Some(warning),
            },
            (None, None) => SequenceAllocation::clean(1),
        }
    }
}

/// Numeric suffix after the last `-` of an entry number.
pub(crate) fn sequence_suffix(entry_number: &str) -> Option<u64> {
    entry_number
        .rsplit_once('-')
        .and_then(|(_, suffix)| suffix.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_format_pads_sequence() {
        let format = EntryNumberFormat::default();
        assert_eq!(format.format(2025, 1), "JE-2025-00001");
        assert_eq!(format.format(2025, 123), "JE-2025-00123");
        assert_eq!(format.year_prefix(2025), "JE-2025");
    }

    #[test]
    fn test_format_grows_past_width() {
        let format = EntryNumberFormat::new("JE", 2);
        assert_eq!(format.format(2025, 100), "JE-2025-100");
    }

    #[rstest]
    #[case("JE-2025-00001", 1)]
    #[case("JE-2025-00042", 42)]
    #[case("JE-2025-123456", 123_456)]
    fn test_parse_sequence(#[case] number: &str, #[case] expected: u64) {
        let format = EntryNumberFormat::default();
        assert_eq!(format.parse_sequence(number).unwrap(), expected);
    }

    #[rstest]
    #[case("JE-2025-ABCDE")]
    #[case("JE2025")]
    #[case("JE-2025-")]
    fn test_parse_sequence_malformed(#[case] number: &str) {
        let format = EntryNumberFormat::default();
        assert_eq!(
            format.parse_sequence(number),
            Err(SequenceWarning::Malformed {
                entry_number: number.to_string()
            })
        );
    }

    #[test]
    fn test_next_after() {
        let format = EntryNumberFormat::default();
        assert_eq!(format.next_after(None), SequenceAllocation::clean(1));
        assert_eq!(
            format.next_after(Some("JE-2025-00009")),
            SequenceAllocation::clean(10)
        );

        let fallback = format.next_after(Some("JE-2025-XYZ"));
        assert_eq!(fallback.value, 1);
        assert!(matches!(
            fallback.warning,
            Some(SequenceWarning::Malformed { ref entry_number }) if entry_number == "JE-2025-XYZ"
        ));
    }

    #[test]
    fn test_next_after_highest_compares_numerically() {
        let format = EntryNumberFormat::default();
        let numbers = ["JE-2025-99999", "JE-2025-100000", "JE-2025-00041"];
        assert_eq!(
            format.next_after_highest(numbers),
            SequenceAllocation::clean(100_001)
        );
    }

    #[test]
    fn test_next_after_highest_skips_malformed() {
        let format = EntryNumberFormat::default();
        assert_eq!(
            format.next_after_highest(["JE-2025-ABCDE", "JE-2025-00041"]),
            SequenceAllocation::clean(42)
        );

        let fallback = format.next_after_highest(["JE-2025-ABCDE", "JE-2025-"]);
        assert_eq!(fallback.value, 1);
        assert_eq!(
            fallback.warning,
            Some(SequenceWarning::Malformed {
                entry_number: "JE-2025-ABCDE".to_string()
            })
        );
        assert_eq!(format.next_after_highest(std::iter::empty()), SequenceAllocation::clean(1));
    }
}
