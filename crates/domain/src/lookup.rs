use crate::DomainError;
use std::fmt;

/// One raw input line, handed to exactly one lookup task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub address: String,
}

impl LookupRequest {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

/// A single resolved (address, name) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResult {
    pub queried_address: String,
    pub resolved_name: String,
}

impl LookupResult {
    pub fn new(queried_address: impl Into<String>, resolved_name: impl Into<String>) -> Self {
        Self {
            queried_address: queried_address.into(),
            resolved_name: resolved_name.into(),
        }
    }
}

impl fmt::Display for LookupResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.queried_address, self.resolved_name)
    }
}

/// How a lookup task finished. Never written to the result stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Resolved { address: String, names: usize },
    Failed { address: String, error: DomainError },
}

/// Totals for one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupSummary {
    pub dispatched: u64,
    pub resolved: u64,
    pub failed: u64,
    pub names_emitted: u64,
    pub input_error: Option<String>,
}

impl LookupSummary {
    pub fn record(&mut self, outcome: &LookupOutcome) {
        match outcome {
            LookupOutcome::Resolved { names, .. } => {
                self.resolved += 1;
                self.names_emitted += *names as u64;
            }
            LookupOutcome::Failed { .. } => self.failed += 1,
        }
    }

    pub fn completed(&self) -> u64 {
        self.resolved + self.failed
    }
}
