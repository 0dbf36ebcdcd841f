use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DispatchConfig {
    /// Pause between two task launches, in milliseconds. Zero disables it.
    #[serde(default)]
    pub wait_ms: u64,

    /// Upper bound on concurrently running lookups. `None` launches one
    /// task per input line without limit.
    #[serde(default)]
    pub max_in_flight: Option<usize>,
}

impl DispatchConfig {
    pub fn wait(&self) -> Option<Duration> {
        (self.wait_ms > 0).then(|| Duration::from_millis(self.wait_ms))
    }
}
