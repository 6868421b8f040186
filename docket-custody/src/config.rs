//! Custody configuration.

use serde::{Deserialize, Serialize};

/// Bounds applied to submission and transition input before any state
/// is touched.
///
/// Lengths are counted in characters, not bytes, so multi-byte titles
/// are not penalized.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CustodyConfig {
    /// Longest accepted document title.
    pub max_title_chars: usize,

    /// Longest accepted department name.
    pub max_department_chars: usize,

    /// Longest accepted document description.
    pub max_description_chars: usize,

    /// Longest accepted reviewer remarks.
    pub max_remarks_chars: usize,
}

impl Default for CustodyConfig {
    fn default() -> Self {
        Self {
            max_title_chars: 200,
            max_department_chars: 120,
            max_description_chars: 4_000,
            max_remarks_chars: 2_000,
        }
    }
}

impl CustodyConfig {
    /// Creates a config with bounds small enough to trip in tests.
    #[cfg(test)]
    pub fn test() -> Self {
        Self {
            max_title_chars: 16,
            max_department_chars: 8,
            max_description_chars: 32,
            max_remarks_chars: 16,
        }
    }
}
