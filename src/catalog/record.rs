//! Course record definitions
//!
//! A course is identified by its five-digit code; the title is whatever the
//! search page showed the first time the code was seen.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of digits in a course code
pub const CODE_LENGTH: usize = 5;

/// One course as harvested from the search pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Five-digit course code
    pub code: String,

    /// Human-readable course title
    pub title: String,
}

impl CourseRecord {
    /// Builds a record, rejecting malformed codes and blank titles
    ///
    /// The title is trimmed. Returns `None` if the code is not exactly five
    /// ASCII digits or the trimmed title is empty.
    pub fn new(code: impl Into<String>, title: impl AsRef<str>) -> Option<Self> {
        let code = code.into();
        let title = title.as_ref().trim();

        if !is_course_code(&code) || title.is_empty() {
            return None;
        }

        Some(Self {
            code,
            title: title.to_string(),
        })
    }
}

impl fmt::Display for CourseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.title)
    }
}

/// Returns true if `s` is exactly five ASCII digits
pub fn is_course_code(s: &str) -> bool {
    s.len() == CODE_LENGTH && s.bytes().all(|b| b.is_ascii_digit())
}
