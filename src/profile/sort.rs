//! Profile report ordering.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Column a profile report is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Own time, descending.
    #[default]
    Time,
    /// Cumulative time, descending.
    Cumulative,
    /// Call count, descending.
    Calls,
    /// Frame label, ascending.
    Name,
    /// Source location, ascending.
    File,
}

impl SortKey {
    /// Every key, for help text.
    pub const ALL: [SortKey; 5] = [
        SortKey::Time,
        SortKey::Cumulative,
        SortKey::Calls,
        SortKey::Name,
        SortKey::File,
    ];

    /// Canonical name accepted on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Time => "time",
            SortKey::Cumulative => "cumulative",
            SortKey::Calls => "calls",
            SortKey::Name => "name",
            SortKey::File => "file",
        }
    }

    /// Phrase used in the report header.
    pub fn description(&self) -> &'static str {
        match self {
            SortKey::Time => "internal time",
            SortKey::Cumulative => "cumulative time",
            SortKey::Calls => "call count",
            SortKey::Name => "function name",
            SortKey::File => "file name",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "time" | "tottime" => Ok(SortKey::Time),
            "cumulative" | "cumtime" => Ok(SortKey::Cumulative),
            "calls" | "ncalls" => Ok(SortKey::Calls),
            "name" => Ok(SortKey::Name),
            "file" | "filename" | "module" => Ok(SortKey::File),
            other => Err(Error::Config(format!(
                "unknown profile sort key '{other}' (expected one of: {})",
                SortKey::ALL.map(|k| k.as_str()).join(", ")
            ))),
        }
    }
}
