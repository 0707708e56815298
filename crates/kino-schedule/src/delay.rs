//! 待機時間の生成

use rand::Rng;
use std::time::Duration;

use crate::error::{Result, ScheduleError};

const SECS_PER_HOUR: u64 = 60 * 60;

/// Source of the wait before each ambient message
pub trait DelaySource: Send + Sync {
    fn next_delay(&mut self) -> Duration;
}

/// Uniformly random whole hours in `[min_hours, max_hours]`
#[derive(Debug, Clone, Copy)]
pub struct RandomHours {
    min_hours: u64,
    max_hours: u64,
}

impl RandomHours {
    pub fn new(min_hours: u64, max_hours: u64) -> Result<Self> {
        if min_hours == 0 || min_hours > max_hours {
            return Err(ScheduleError::InvalidRange {
                min: min_hours,
                max: max_hours,
            });
        }
        Ok(Self {
            min_hours,
            max_hours,
        })
    }
}

impl Default for RandomHours {
    fn default() -> Self {
        Self {
            min_hours: 5,
            max_hours: 10,
        }
    }
}

impl DelaySource for RandomHours {
    fn next_delay(&mut self) -> Duration {
        let hours = rand::thread_rng().gen_range(self.min_hours..=self.max_hours);
        Duration::from_secs(hours * SECS_PER_HOUR)
    }
}

/// Always the same delay
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(pub Duration);

impl DelaySource for FixedDelay {
    fn next_delay(&mut self) -> Duration {
        self.0
    }
}
