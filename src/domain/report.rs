use std::fmt;

use crate::domain::error::CheckFailure;

/// Nagios plugin status with its conventional exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NagiosStatus {
    Ok,
    Critical,
    Unknown,
}

impl NagiosStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Critical => "CRITICAL",
            Self::Unknown => "UNKNOWN",
        }
    }

    pub fn exit_code(self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::Critical => 2,
            Self::Unknown => 3,
        }
    }
}

impl fmt::Display for NagiosStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures collected from one probe run, in check order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbeReport {
    pub failures: Vec<CheckFailure>,
}

impl ProbeReport {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn status(&self) -> NagiosStatus {
        if self.passed() {
            NagiosStatus::Ok
        } else {
            NagiosStatus::Critical
        }
    }

    /// Only the first failure is surfaced to the operator.
    pub fn summary(&self) -> String {
        match self.failures.first() {
            None => "All tests passed".to_string(),
            Some(failure) => format!("Test(s) Failed: {failure}"),
        }
    }
}
