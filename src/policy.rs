use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Whether an instant equal to a shift's end minute still counts as covered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Endpoints {
    /// `[start, end]`: the end minute is covered.
    #[default]
    Closed,
    /// `[start, end)`: the end minute belongs to the next watch.
    HalfOpen,
}

/// How a shift whose start equals its end is read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ZeroLength {
    /// Overnight rule: runs from `start` today to `start` tomorrow.
    #[default]
    FullDay,
    /// Treated as empty; never covers anything.
    Empty,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoveragePolicy {
    pub endpoints: Endpoints,
    pub zero_length: ZeroLength,
    /// Count the tail of yesterday's overnight shift in today's hour slots.
    pub carry_over: bool,
}

impl CoveragePolicy {
    /// Overlays the values explicitly given on top of `self`.
    pub fn with_overrides(
        self,
        endpoints: Option<Endpoints>,
        zero_length: Option<ZeroLength>,
        carry_over: Option<bool>,
    ) -> CoveragePolicy {
        CoveragePolicy {
            endpoints: endpoints.unwrap_or(self.endpoints),
            zero_length: zero_length.unwrap_or(self.zero_length),
            carry_over: carry_over.unwrap_or(self.carry_over),
        }
    }
}
