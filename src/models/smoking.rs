//! Ordered smoking history categories

use std::fmt;

use crate::error::{Error, Result};

/// Smoking history, ordered from never smoked to current smoker
///
/// The ordinal code of a category is its position in [`SmokingStatus::ORDERED`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SmokingStatus {
    Never,
    PastMoreThan10Years,
    Past5To10Years,
    PastLessThan5Years,
    Current,
}

impl SmokingStatus {
    /// All categories in encoding order
    pub const ORDERED: [Self; 5] = [
        Self::Never,
        Self::PastMoreThan10Years,
        Self::Past5To10Years,
        Self::PastLessThan5Years,
        Self::Current,
    ];

    /// The label used in the demographics table
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Never => "never",
            Self::PastMoreThan10Years => "past_more_than_10_years",
            Self::Past5To10Years => "past_5_to_10_years",
            Self::PastLessThan5Years => "past_less_than_5_years",
            Self::Current => "current",
        }
    }

    /// Ordinal code (0 = never ... 4 = current)
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Look up a category by its exact label
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ORDERED.into_iter().find(|status| status.label() == label)
    }

    /// Encode a label, failing on anything outside the vocabulary
    pub fn encode(label: &str, patient_id: &str) -> Result<Self> {
        Self::from_label(label).ok_or_else(|| Error::Encoding {
            value: label.to_string(),
            patient_id: patient_id.to_string(),
        })
    }
}

impl fmt::Display for SmokingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
