use std::time::{Duration, Instant};

/// Start/end timestamps of one resolver request.
///
/// Started right before the request is sent and completed once the response
/// body has been read in full. A request that never completes has no latency.
#[derive(Debug, Clone, Copy)]
pub struct RequestTiming {
    started: Instant,
    completed: Option<Instant>,
}

impl RequestTiming {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
            completed: None,
        }
    }

    pub fn complete(&mut self) {
        self.completed = Some(Instant::now());
    }

    pub fn latency(&self) -> Option<Duration> {
        self.completed
            .map(|end| end.saturating_duration_since(self.started))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_timing_has_no_latency() {
        let timing = RequestTiming::start();
        assert_eq!(timing.latency(), None);
    }

    #[test]
    fn test_completed_timing_measures_elapsed() {
        let mut timing = RequestTiming::start();
        std::thread::sleep(Duration::from_millis(5));
        timing.complete();

        let latency = timing.latency().unwrap();
        assert!(latency >= Duration::from_millis(5));
    }
}
