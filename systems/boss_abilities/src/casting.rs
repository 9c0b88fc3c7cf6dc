//! Advisory casting animation state machine.

use std::time::Duration;

/// Time spent in [`CastingPhase::Entering`].
pub const ENTER_DURATION: Duration = Duration::from_millis(400);
/// Time spent in [`CastingPhase::Active`] when the cast supplies no override.
pub const ACTIVE_DURATION: Duration = Duration::from_millis(800);
/// Time spent in [`CastingPhase::Exiting`].
pub const EXIT_DURATION: Duration = Duration::from_millis(200);

/// Phases of the casting animation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CastingPhase {
    /// Nothing is being cast.
    #[default]
    Idle,
    /// Wind-up before the ability lands.
    Entering,
    /// The ability's effects are playing out.
    Active,
    /// Wind-down after the effects.
    Exiting,
}

/// Single global casting state shared by every ability of the scheduler.
///
/// Transitions are driven purely by elapsed time. At most one ability occupies
/// a non-idle phase; a new wind-up only starts from idle unless it is forced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CastingState {
    phase: CastingPhase,
    phase_elapsed: Duration,
    active_override: Option<Duration>,
    ability: Option<String>,
}

impl CastingState {
    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> CastingPhase {
        self.phase
    }

    /// Time spent in the current phase.
    #[must_use]
    pub const fn phase_elapsed(&self) -> Duration {
        self.phase_elapsed
    }

    /// Name of the ability occupying the casting state, if any.
    #[must_use]
    pub fn ability(&self) -> Option<&str> {
        self.ability.as_deref()
    }

    /// Length of the active phase for the current cast.
    #[must_use]
    pub fn active_duration(&self) -> Duration {
        self.active_override.unwrap_or(ACTIVE_DURATION)
    }

    /// Reports whether nothing is being cast.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.phase == CastingPhase::Idle
    }

    /// Starts the wind-up for `ability` when idle; returns whether it started.
    pub(crate) fn begin(&mut self, ability: &str) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.force_begin(ability);
        true
    }

    /// Starts the wind-up for `ability` from any phase, replacing the current cast.
    pub(crate) fn force_begin(&mut self, ability: &str) {
        self.phase = CastingPhase::Entering;
        self.phase_elapsed = Duration::ZERO;
        self.active_override = None;
        self.ability = Some(ability.to_owned());
    }

    /// Stretches the active phase of `ability` to cover its staggered effects.
    ///
    /// Ignored unless `ability` currently occupies the wind-up or active phase.
    pub(crate) fn set_active_duration(&mut self, ability: &str, duration: Duration) {
        let occupied = matches!(self.phase, CastingPhase::Entering | CastingPhase::Active);
        if occupied && self.ability.as_deref() == Some(ability) {
            self.active_override = Some(duration);
        }
    }

    /// Advances the animation clock, crossing as many phase boundaries as `dt` covers.
    pub(crate) fn advance(&mut self, dt: Duration) {
        let mut remaining = dt;
        loop {
            let (limit, next) = match self.phase {
                CastingPhase::Idle => return,
                CastingPhase::Entering => (ENTER_DURATION, CastingPhase::Active),
                CastingPhase::Active => (self.active_duration(), CastingPhase::Exiting),
                CastingPhase::Exiting => (EXIT_DURATION, CastingPhase::Idle),
            };

            let needed = limit.saturating_sub(self.phase_elapsed);
            if remaining < needed {
                self.phase_elapsed += remaining;
                return;
            }

            remaining -= needed;
            self.phase = next;
            self.phase_elapsed = Duration::ZERO;
            if next == CastingPhase::Idle {
                self.active_override = None;
                self.ability = None;
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phases_over(state: &mut CastingState, step: Duration, steps: usize) -> Vec<CastingPhase> {
        let mut seen = Vec::new();
        for _ in 0..steps {
            state.advance(step);
            if seen.last() != Some(&state.phase()) {
                seen.push(state.phase());
            }
        }
        seen
    }

    #[test]
    fn idle_state_ignores_time() {
        let mut state = CastingState::default();
        state.advance(Duration::from_secs(5));
        assert!(state.is_idle());
        assert_eq!(state.phase_elapsed(), Duration::ZERO);
    }

    #[test]
    fn phases_follow_fixed_order_with_default_durations() {
        let mut state = CastingState::default();
        assert!(state.begin("Ember Rain"));

        let seen = phases_over(&mut state, Duration::from_millis(100), 20);

        assert_eq!(
            seen,
            vec![
                CastingPhase::Entering,
                CastingPhase::Active,
                CastingPhase::Exiting,
                CastingPhase::Idle
            ]
        );
        assert_eq!(state.ability(), None);
    }

    #[test]
    fn enter_active_exit_take_exactly_their_durations() {
        let mut state = CastingState::default();
        assert!(state.begin("Ember Rain"));

        state.advance(Duration::from_millis(399));
        assert_eq!(state.phase(), CastingPhase::Entering);
        state.advance(Duration::from_millis(1));
        assert_eq!(state.phase(), CastingPhase::Active);
        state.advance(ACTIVE_DURATION);
        assert_eq!(state.phase(), CastingPhase::Exiting);
        state.advance(EXIT_DURATION);
        assert!(state.is_idle());
    }

    #[test]
    fn begin_is_refused_while_busy() {
        let mut state = CastingState::default();
        assert!(state.begin("First"));
        assert!(!state.begin("Second"));
        assert_eq!(state.ability(), Some("First"));
    }

    #[test]
    fn forced_begin_replaces_current_cast() {
        let mut state = CastingState::default();
        assert!(state.begin("First"));
        state.advance(Duration::from_millis(500));
        assert_eq!(state.phase(), CastingPhase::Active);

        state.force_begin("Second");

        assert_eq!(state.phase(), CastingPhase::Entering);
        assert_eq!(state.ability(), Some("Second"));
        assert_eq!(state.phase_elapsed(), Duration::ZERO);
    }

    #[test]
    fn override_stretches_active_phase_for_matching_ability_only() {
        let mut state = CastingState::default();
        assert!(state.begin("Sweep"));
        state.set_active_duration("Other", Duration::from_secs(9));
        assert_eq!(state.active_duration(), ACTIVE_DURATION);

        state.set_active_duration("Sweep", Duration::from_secs(3));
        state.advance(ENTER_DURATION);
        state.advance(Duration::from_millis(2_999));
        assert_eq!(state.phase(), CastingPhase::Active);
        state.advance(Duration::from_millis(1));
        assert_eq!(state.phase(), CastingPhase::Exiting);
    }

    #[test]
    fn single_large_step_returns_to_idle() {
        let mut state = CastingState::default();
        assert!(state.begin("Burst"));
        state.advance(Duration::from_secs(10));
        assert!(state.is_idle());
        assert_eq!(state.active_duration(), ACTIVE_DURATION);
    }
}
