// src/cv/models.rs
use serde::{Deserialize, Serialize};

use crate::utils::error::AnalysisError;

/// One CV text dump as loaded from disk. Owned by the caller, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDocument {
    pub file_name: String,
    pub text: String,
}

impl RawDocument {
    pub fn new(file_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            text: text.into(),
        }
    }
}

/// Inclusive publication-year window. Constructing one is the only validation
/// step of an analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearWindow {
    start: i32,
    end: i32,
}

impl YearWindow {
    pub fn new(start: i32, end: i32) -> Result<Self, AnalysisError> {
        if start > end {
            return Err(AnalysisError::InvalidYearRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }

    pub fn contains(&self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_rejects_inverted_range() {
        let err = YearWindow::new(2023, 2020).unwrap_err();
        assert_eq!(err, AnalysisError::InvalidYearRange { start: 2023, end: 2020 });
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let window = YearWindow::new(2020, 2022).unwrap();
        assert!(window.contains(2020));
        assert!(window.contains(2022));
        assert!(!window.contains(2019));
        assert!(!window.contains(2023));

        let single = YearWindow::new(2021, 2021).unwrap();
        assert!(single.contains(2021), "A one-year window should hold its year");
    }
}
