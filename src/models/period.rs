use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two daily shifts partitioning the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "Manhã")]
    Morning,
    #[serde(rename = "Tarde")]
    Afternoon,
}

impl Period {
    pub const ALL: [Period; 2] = [Period::Morning, Period::Afternoon];

    /// Label shown to operators and stored in the `period` columns.
    pub fn label(&self) -> &'static str {
        match self {
            Period::Morning => "Manhã",
            Period::Afternoon => "Tarde",
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        self.label()
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Manhã" => Some(Period::Morning),
            "Tarde" => Some(Period::Afternoon),
            _ => None,
        }
    }

    /// Helper: convert input code from CLI (portuguese or english, any case)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "m" | "manha" | "manhã" | "morning" => Some(Period::Morning),
            "t" | "a" | "tarde" | "afternoon" => Some(Period::Afternoon),
            _ => None,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
