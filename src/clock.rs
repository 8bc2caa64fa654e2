use std::time::{Duration, Instant};

pub trait FramePacer {
    /// Blocks until the current frame has used up its time budget.
    fn tick(&mut self, target_fps: u32);
}

/// Sleeping frame limiter measured from the end of the previous tick.
#[derive(Default)]
pub struct FrameClock {
    last_tick: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Time still owed to a frame that has run for `elapsed`; zero when unpaced or over budget.
pub fn remaining_budget(elapsed: Duration, target_fps: u32) -> Duration {
    if target_fps == 0 {
        return Duration::ZERO;
    }
    let budget = Duration::from_secs(1) / target_fps;
    budget.saturating_sub(elapsed)
}

impl FramePacer for FrameClock {
    fn tick(&mut self, target_fps: u32) {
        if let Some(last_tick) = self.last_tick {
            let remaining = remaining_budget(last_tick.elapsed(), target_fps);
            if !remaining.is_zero() {
                std::thread::sleep(remaining);
            }
        }
        self.last_tick = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_at_120_fps() {
        let budget = remaining_budget(Duration::ZERO, 120);
        assert_eq!(budget, Duration::from_secs(1) / 120);
        assert_eq!(
            remaining_budget(Duration::from_millis(3), 120),
            budget - Duration::from_millis(3)
        );
    }

    #[test]
    fn overrun_frames_owe_nothing() {
        assert_eq!(remaining_budget(Duration::from_millis(50), 120), Duration::ZERO);
    }

    #[test]
    fn zero_fps_is_unpaced() {
        assert_eq!(remaining_budget(Duration::ZERO, 0), Duration::ZERO);
    }

    #[test]
    fn first_tick_does_not_sleep() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        clock.tick(1);
        assert!(start.elapsed() < Duration::from_millis(500));
    }
}
