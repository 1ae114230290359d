use std::fmt::Display;
use std::fmt::Formatter;

/// Window the top items are computed over
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeRange {
    /// Roughly the last four weeks
    Short,
    /// Roughly the last year
    Long,
}

impl Display for TimeRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeRange::Short => write!(f, "short_term"),
            TimeRange::Long => write!(f, "long_term"),
        }
    }
}

/// Item type of `/me/top/{type}`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TopItemType {
    Artists,
    Tracks,
}

impl Display for TopItemType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TopItemType::Artists => write!(f, "artists"),
            TopItemType::Tracks => write!(f, "tracks"),
        }
    }
}
