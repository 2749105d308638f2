use std::fmt;

const SUMMARY_INTERVAL_MS: f64 = 500.0;

/// Frame statistics for the debug overlay, fed with millisecond marks.
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    last_begin: Option<f64>,
    window_start: Option<f64>,
    frame_count: u32,
    frame_dt_ms: f64,
    work_ms: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsSummary {
    pub fps: f64,
    pub cadence_ms: f64,
    pub work_ms: f64,
}

impl fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1} fps (cadence {:.2} ms, render {:.2} ms)",
            self.fps, self.cadence_ms, self.work_ms
        )
    }
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, now_ms: f64) {
        self.frame_dt_ms = match self.last_begin {
            Some(last) => (now_ms - last).max(0.0),
            None => 1000.0 / 60.0,
        };
        self.last_begin = Some(now_ms);
        if self.window_start.is_none() {
            self.window_start = Some(now_ms);
        }
    }

    /// Close the current frame. Returns a summary roughly twice a second.
    pub fn end(&mut self, now_ms: f64) -> Option<StatsSummary> {
        let begin = self.last_begin?;
        self.work_ms = (now_ms - begin).max(0.0);
        self.frame_count = self.frame_count.saturating_add(1);

        let window_start = self.window_start.unwrap_or(begin);
        let elapsed = now_ms - window_start;
        if elapsed < SUMMARY_INTERVAL_MS {
            return None;
        }
        let summary = StatsSummary {
            fps: self.frame_count as f64 * 1000.0 / elapsed,
            cadence_ms: self.frame_dt_ms,
            work_ms: self.work_ms,
        };
        self.frame_count = 0;
        self.window_start = Some(now_ms);
        Some(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::FrameStats;

    #[test]
    fn end_without_begin_is_ignored() {
        let mut stats = FrameStats::new();
        assert_eq!(stats.end(10.0), None);
    }

    #[test]
    fn summarises_every_half_second() {
        let mut stats = FrameStats::new();
        let mut summary = None;
        for frame in 0..=30 {
            let begin = frame as f64 * 20.0;
            stats.begin(begin);
            summary = stats.end(begin + 4.0).or(summary);
            if summary.is_some() {
                break;
            }
        }
        let summary = summary.expect("summary after 500 ms");
        assert!((summary.cadence_ms - 20.0).abs() < 1e-9);
        assert!((summary.work_ms - 4.0).abs() < 1e-9);
        assert!(summary.fps > 45.0 && summary.fps < 55.0);
        assert!(summary.to_string().contains("fps"));
    }
}
