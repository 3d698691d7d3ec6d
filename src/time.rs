//! Fixed-step clock for UI timers.
//!
//! `draw_web()` runs at the browser's frame rate; `GameTime` turns its
//! timestamps into a whole number of ticks so pulse and toast timers behave
//! the same at any frame rate.

/// Longest frame gap counted, so a backgrounded tab doesn't burst.
const MAX_FRAME_MS: f64 = 500.0;

pub struct GameTime {
    ms_per_tick: f64,
    /// Time carried over that hasn't filled a whole tick yet.
    carry_ms: f64,
    last_ms: Option<f64>,
}

impl GameTime {
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_sec.max(1) as f64,
            carry_ms: 0.0,
            last_ms: None,
        }
    }

    /// Feed the current timestamp (ms); returns the ticks elapsed since the
    /// previous call. The first call only records the timestamp.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let elapsed = self
            .last_ms
            .map_or(0.0, |prev| (now_ms - prev).clamp(0.0, MAX_FRAME_MS));
        self.last_ms = Some(now_ms);

        self.carry_ms += elapsed;
        let ticks = (self.carry_ms / self.ms_per_tick).floor() as u32;
        self.carry_ms -= ticks as f64 * self.ms_per_tick;
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_update_is_free() {
        let mut clock = GameTime::new(10);
        assert_eq!(clock.update(12_345.0), 0);
    }

    #[test]
    fn hit_pulse_length_is_half_a_second() {
        let mut clock = GameTime::new(10);
        clock.update(0.0);
        assert_eq!(clock.update(500.0), 5);
    }

    #[test]
    fn partial_ticks_carry_over() {
        let mut clock = GameTime::new(10);
        clock.update(0.0);
        assert_eq!(clock.update(250.0), 2);
        assert_eq!(clock.update(300.0), 1); // 50 carried + 50 new
    }

    #[test]
    fn long_gaps_are_clamped() {
        let mut clock = GameTime::new(10);
        clock.update(0.0);
        assert_eq!(clock.update(60_000.0), 5);
    }

    #[test]
    fn clock_going_backwards_yields_nothing() {
        let mut clock = GameTime::new(10);
        clock.update(1_000.0);
        assert_eq!(clock.update(900.0), 0);
    }

    #[test]
    fn sixty_fps_for_a_second() {
        let mut clock = GameTime::new(10);
        clock.update(0.0);
        let total: u32 = (1..=60).map(|i| clock.update(i as f64 * 1000.0 / 60.0)).sum();
        assert!((9..=10).contains(&total), "got {} ticks", total);
    }
}
