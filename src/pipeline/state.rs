use std::time::Duration;

/// Coordinator tuning. The default is full fan-out.
#[derive(Debug, Clone, Default)]
pub struct OrchestratorConfig {
    /// Upper bound on tracks fetching at once; `None` runs every track at once.
    pub max_concurrent_tracks: Option<usize>,
}

/// Reported to the progress observer each time a track finishes.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanProgress {
    pub completed: usize,
    pub total: usize,
    /// Time since the scan started.
    pub elapsed: Duration,
    pub track: String,
    pub track_elapsed: Duration,
    pub failed: bool,
}

impl ScanProgress {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction() {
        let p = ScanProgress {
            completed: 1,
            total: 4,
            elapsed: Duration::from_secs(2),
            track: "EE".into(),
            track_elapsed: Duration::from_secs(1),
            failed: false,
        };
        assert_eq!(p.fraction(), 0.25);
    }

    #[test]
    fn test_default_is_unbounded() {
        assert!(OrchestratorConfig::default().max_concurrent_tracks.is_none());
    }
}
