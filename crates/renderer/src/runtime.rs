use std::time::Instant;

/// Snapshot of the clock taken at the start of a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSample {
    /// Seconds elapsed since the clock was started.
    pub seconds: f32,
    /// Number of samples taken before this one.
    pub frame_index: u64,
}

impl TimeSample {
    /// Creates a new time sample.
    pub fn new(seconds: f32, frame_index: u64) -> Self {
        Self {
            seconds,
            frame_index,
        }
    }
}

/// Abstraction over where elapsed time originates from.
pub trait TimeSource: Send {
    /// Captures the start timestamp; everything sampled afterwards is relative to it.
    fn start(&mut self);
    /// Produces the time sample for the next frame.
    fn sample(&mut self) -> TimeSample;
}

/// Time source backed by the system monotonic clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemTimeSource {
    origin: Instant,
    frame: u64,
}

impl SystemTimeSource {
    /// Creates a system time source initialised to `Instant::now()`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
            frame: 0,
        }
    }
}

impl TimeSource for SystemTimeSource {
    fn start(&mut self) {
        self.origin = Instant::now();
        self.frame = 0;
    }

    fn sample(&mut self) -> TimeSample {
        let elapsed = self.origin.elapsed();
        let sample = TimeSample::new(elapsed.as_secs_f32(), self.frame);
        self.frame = self.frame.saturating_add(1);
        sample
    }
}

/// Time source that replays a fixed list of timestamps, one per sample.
///
/// Once the list is exhausted the last timestamp repeats, so a driver can keep
/// rendering after a scripted run without time moving backwards.
#[cfg(test)]
#[derive(Debug, Clone)]
pub(crate) struct ScriptedTimeSource {
    pending: std::collections::VecDeque<f32>,
    last: f32,
    frame: u64,
}

#[cfg(test)]
impl ScriptedTimeSource {
    pub fn new(samples: impl IntoIterator<Item = f32>) -> Self {
        Self {
            pending: samples.into_iter().collect(),
            last: 0.0,
            frame: 0,
        }
    }
}

#[cfg(test)]
impl TimeSource for ScriptedTimeSource {
    fn start(&mut self) {}

    fn sample(&mut self) -> TimeSample {
        if let Some(next) = self.pending.pop_front() {
            self.last = self.last.max(next);
        }
        let sample = TimeSample::new(self.last, self.frame);
        self.frame = self.frame.saturating_add(1);
        sample
    }
}

/// Convenient alias for owning time sources behind trait objects.
pub type BoxedTimeSource = Box<dyn TimeSource>;
