use std::time::Duration;

/// How much surrounding material the extraction prompt carries.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Number of trailing statements included as transcript context
    pub context_statements: usize,
    /// Number of recent suggestion descriptions shown to the model as
    /// already-covered ground
    pub recent_descriptions: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            context_statements: 7,
            recent_descriptions: 10,
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context_statements(mut self, count: usize) -> Self {
        self.context_statements = count;
        self
    }

    pub fn with_recent_descriptions(mut self, count: usize) -> Self {
        self.recent_descriptions = count;
        self
    }
}

/// Pacing for transcript replay.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayConfig {
    /// Window the whole transcript is spread across. Each statement after the
    /// first waits `total_duration / count` before it is emitted.
    pub total_duration: Duration,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            total_duration: Duration::from_secs(60),
        }
    }
}

impl ReplayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_total_duration(mut self, total_duration: Duration) -> Self {
        self.total_duration = total_duration;
        self
    }

    /// The gap scheduled between consecutive statements of a transcript with
    /// `count` statements.
    pub fn interval(&self, count: usize) -> Duration {
        if count == 0 {
            Duration::ZERO
        } else {
            self.total_duration.div_f64(count as f64)
        }
    }
}
