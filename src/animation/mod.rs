mod easing;

pub use easing::Easing;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealPhase {
    /// Value sits at the maximum line length; lines are fully hidden.
    Idle,
    Animating,
    /// Value reached 0; lines stay fully drawn until the next reset.
    Revealed,
}

/// Ticket for one `animate` call. Ticks carrying an older handle are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RevealHandle {
    generation: u64,
}

impl RevealHandle {
    #[must_use]
    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// Outcome of advancing the reveal clock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RevealTick {
    /// The configured delay has not elapsed yet.
    Pending,
    /// Remaining hidden length after this step.
    Progress(f64),
    Completed,
    /// The handle was invalidated by `reset()` or superseded.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Transition {
    from: f64,
    starts_at: Duration,
    duration: Duration,
}

/// Owner of the single reveal value shared by every animated series.
///
/// The value is the stroke dash offset still hidden, in pixels. The host
/// scheduler drives it by calling [`RevealController::tick`] with its clock;
/// the controller never reads wall time itself.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealController {
    easing: Easing,
    max_line_length: f64,
    value: f64,
    phase: RevealPhase,
    generation: u64,
    transition: Option<Transition>,
}

impl Default for RevealController {
    fn default() -> Self {
        Self {
            easing: Easing::default(),
            max_line_length: 0.0,
            value: 0.0,
            phase: RevealPhase::Idle,
            generation: 0,
            transition: None,
        }
    }
}

impl RevealController {
    #[must_use]
    pub fn new(easing: Easing) -> Self {
        Self {
            easing,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    #[must_use]
    pub fn max_line_length(&self) -> f64 {
        self.max_line_length
    }

    #[must_use]
    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    /// Records a measured line length. The maximum only grows.
    ///
    /// While idle the value follows the new maximum so freshly measured lines
    /// start fully hidden; an animating or revealed value is left alone.
    pub fn observe_max_length(&mut self, length: f64) {
        if !length.is_finite() || length <= self.max_line_length {
            return;
        }
        self.max_line_length = length;
        if self.phase == RevealPhase::Idle {
            self.value = length;
        }
        trace!(max_line_length = length, phase = ?self.phase, "reveal max length grew");
    }

    /// Starts interpolating the value from where it is now to 0.
    ///
    /// The interpolation begins at `now + delay` and lasts `duration`.
    /// Fails with [`ChartError::RevealInFlight`] while a previous run is live.
    pub fn animate(
        &mut self,
        now: Duration,
        delay: Duration,
        duration: Duration,
    ) -> ChartResult<RevealHandle> {
        if self.phase == RevealPhase::Animating {
            return Err(ChartError::RevealInFlight);
        }

        self.generation += 1;
        self.phase = RevealPhase::Animating;
        self.transition = Some(Transition {
            from: self.value,
            starts_at: now.saturating_add(delay),
            duration,
        });
        debug!(
            generation = self.generation,
            from = self.value,
            delay_ms = delay.as_millis() as u64,
            duration_ms = duration.as_millis() as u64,
            "reveal animation started"
        );
        Ok(RevealHandle {
            generation: self.generation,
        })
    }

    /// Advances the interpolation owned by `handle` to `now`.
    pub fn tick(&mut self, handle: RevealHandle, now: Duration) -> RevealTick {
        if handle.generation != self.generation {
            trace!(
                handle = handle.generation,
                current = self.generation,
                "stale reveal tick ignored"
            );
            return RevealTick::Stale;
        }
        let Some(transition) = self.transition else {
            return match self.phase {
                RevealPhase::Revealed => RevealTick::Completed,
                _ => RevealTick::Stale,
            };
        };

        if now < transition.starts_at {
            return RevealTick::Pending;
        }

        let elapsed = now - transition.starts_at;
        let progress = if transition.duration.is_zero() {
            1.0
        } else {
            elapsed.as_secs_f64() / transition.duration.as_secs_f64()
        };

        if progress >= 1.0 {
            self.value = 0.0;
            self.phase = RevealPhase::Revealed;
            self.transition = None;
            debug!(generation = self.generation, "reveal animation completed");
            return RevealTick::Completed;
        }

        self.value = transition.from * (1.0 - self.easing.apply(progress));
        RevealTick::Progress(self.value)
    }

    /// Snaps the value back to the maximum line length, abandoning any run.
    ///
    /// Only an in-flight run advances the generation, so calling this
    /// repeatedly changes nothing after the first call.
    pub fn reset(&mut self) {
        if self.transition.take().is_some() {
            self.generation += 1;
        }
        if self.phase != RevealPhase::Idle {
            debug!(phase = ?self.phase, "reveal reset");
        }
        self.phase = RevealPhase::Idle;
        self.value = self.max_line_length;
    }
}

#[cfg(test)]
mod tests {
    use super::{Easing, RevealController, RevealPhase, RevealTick};
    use crate::error::ChartError;
    use approx::assert_relative_eq;
    use std::time::Duration;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn starts_at_zero_and_follows_max_while_idle() {
        let mut reveal = RevealController::default();
        assert_eq!(reveal.value(), 0.0);

        reveal.observe_max_length(120.0);
        reveal.observe_max_length(80.0);
        assert_eq!(reveal.max_line_length(), 120.0);
        assert_eq!(reveal.value(), 120.0);
    }

    #[test]
    fn linear_run_respects_delay_and_completes() {
        let mut reveal = RevealController::new(Easing::Linear);
        reveal.observe_max_length(100.0);
        let handle = reveal.animate(ms(0), ms(50), ms(200)).expect("animate");

        assert_eq!(reveal.tick(handle, ms(20)), RevealTick::Pending);
        match reveal.tick(handle, ms(150)) {
            RevealTick::Progress(value) => assert_relative_eq!(value, 50.0, epsilon = 1e-9),
            other => panic!("unexpected tick {other:?}"),
        }
        assert_eq!(reveal.tick(handle, ms(250)), RevealTick::Completed);
        assert_eq!(reveal.value(), 0.0);
        assert_eq!(reveal.phase(), RevealPhase::Revealed);
        assert_eq!(reveal.tick(handle, ms(400)), RevealTick::Completed);
    }

    #[test]
    fn second_animate_while_running_is_rejected() {
        let mut reveal = RevealController::default();
        reveal.observe_max_length(10.0);
        reveal.animate(ms(0), ms(0), ms(100)).expect("animate");
        assert!(matches!(
            reveal.animate(ms(1), ms(0), ms(100)),
            Err(ChartError::RevealInFlight)
        ));
    }

    #[test]
    fn reset_invalidates_in_flight_handle() {
        let mut reveal = RevealController::default();
        reveal.observe_max_length(40.0);
        let handle = reveal.animate(ms(0), ms(0), ms(100)).expect("animate");
        let _ = reveal.tick(handle, ms(50));

        reveal.reset();
        assert_eq!(reveal.value(), 40.0);
        assert_eq!(reveal.tick(handle, ms(200)), RevealTick::Stale);
        assert_eq!(reveal.value(), 40.0);
        assert_eq!(reveal.phase(), RevealPhase::Idle);
    }

    #[test]
    fn zero_duration_completes_on_first_tick() {
        let mut reveal = RevealController::default();
        reveal.observe_max_length(5.0);
        let handle = reveal.animate(ms(10), ms(0), Duration::ZERO).expect("animate");
        assert_eq!(reveal.tick(handle, ms(10)), RevealTick::Completed);
        assert_eq!(reveal.value(), 0.0);
    }
}
