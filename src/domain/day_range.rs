use std::fmt;

use crate::error::{Error, Result};

const DEFAULT_DAYS_MIN: i64 = 28;
const DEFAULT_DAYS_MAX: i64 = 38;
const MAX_SPAN: i64 = 10;

/// The trip-length window (in days) a monitor is interested in
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct DayRange {
    min: i64,
    max: i64,
}

impl DayRange {
    /// Build a range, filling in defaults for missing bounds.
    ///
    /// A range wider than ten days is rejected, as is one whose width does
    /// not fit an `i64`. A maximum below the minimum is accepted.
    pub fn new(min: Option<i64>, max: Option<i64>) -> Result<Self> {
        let min = min.unwrap_or(DEFAULT_DAYS_MIN);
        let max = max.unwrap_or(DEFAULT_DAYS_MAX);

        let too_wide = max.checked_sub(min).map_or(true, |span| span > MAX_SPAN);
        if too_wide {
            return Err(Error::ParsingError(format!(
                "Day range cannot exceed {} days",
                MAX_SPAN
            )));
        }

        Ok(Self { min, max })
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }
}

impl Default for DayRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_DAYS_MIN,
            max: DEFAULT_DAYS_MAX,
        }
    }
}

impl fmt::Display for DayRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}
