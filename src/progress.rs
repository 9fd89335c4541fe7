//! Percentage progress for split-all runs.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: u32,
    pub total: u32,
}

impl Progress {
    /// `round(completed / total * 100)`. An unfinished run never reports 100,
    /// and an empty run counts as done.
    pub fn percent(&self) -> u8 {
        if self.is_complete() {
            return 100;
        }
        let pct = (f64::from(self.completed) / f64::from(self.total) * 100.0).round();
        pct.clamp(0.0, 99.0) as u8
    }

    pub fn is_complete(&self) -> bool {
        self.completed >= self.total
    }
}

pub trait ProgressReporter {
    fn report(&mut self, progress: Progress);
}

impl<F: FnMut(Progress)> ProgressReporter for F {
    fn report(&mut self, progress: Progress) {
        self(progress)
    }
}

/// Discards every update.
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&mut self, _progress: Progress) {}
}

/// Emits one `Splitting pages… N%` status line each time the percentage moves.
pub struct StatusProgress {
    last_percent: Option<u8>,
}

impl StatusProgress {
    pub fn new() -> Self {
        StatusProgress { last_percent: None }
    }
}

impl Default for StatusProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StatusProgress {
    fn report(&mut self, progress: Progress) {
        let pct = progress.percent();
        tracing::debug!(
            completed = progress.completed,
            total = progress.total,
            percent = pct,
            "split progress"
        );
        if self.last_percent != Some(pct) {
            self.last_percent = Some(pct);
            crate::status::Status::Splitting(pct).show();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_rounds() {
        assert_eq!(Progress { completed: 1, total: 3 }.percent(), 33);
        assert_eq!(Progress { completed: 2, total: 3 }.percent(), 67);
        assert_eq!(Progress { completed: 3, total: 3 }.percent(), 100);
    }

    #[test]
    fn test_percent_only_reaches_100_at_end() {
        let pcts: Vec<u8> = (1..=300)
            .map(|completed| Progress { completed, total: 300 }.percent())
            .collect();
        assert_eq!(pcts.iter().filter(|&&p| p == 100).count(), 1);
        assert_eq!(pcts[298], 99);
        assert_eq!(pcts.last(), Some(&100));
        assert!(pcts.windows(2).all(|w| w[0] <= w[1]));
        assert!(Progress { completed: 300, total: 300 }.is_complete());
        assert!(!Progress { completed: 299, total: 300 }.is_complete());
    }

    #[test]
    fn test_closure_reporter() {
        let mut seen = Vec::new();
        {
            let mut reporter = |p: Progress| seen.push(p.percent());
            reporter.report(Progress { completed: 1, total: 2 });
            reporter.report(Progress { completed: 2, total: 2 });
        }
        assert_eq!(seen, vec![50, 100]);
    }
}
