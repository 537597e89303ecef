//! # Typewriter Role Rotation
//!
//! The hero headline types a role out one character at a time, holds it,
//! deletes it, then moves on to the next role.
//!
//! ```text
//!            tick: +1 char              dwell elapsed
//!   ┌──────► Typing ───────────► Paused ───────────► Deleting ─┐
//!   │        (text == role)                   tick: -1 char    │
//!   └──────────────── text empty: index = (index + 1) % len ───┘
//! ```
//!
//! [`RoleCycle`] is the tagged state plus a pure transition
//! ([`RoleCycle::tick`]). [`Typewriter`] drives it from a single deadline:
//! every tick schedules exactly one follow-up, and [`Typewriter::cancel`]
//! drops the pending one so nothing fires after teardown.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const DEFAULT_TYPE_INTERVAL: Duration = Duration::from_millis(80);
pub const DEFAULT_DELETE_INTERVAL: Duration = Duration::from_millis(40);
pub const DEFAULT_PAUSE: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Typing,
    Paused,
    Deleting,
}

#[derive(Debug, PartialEq, Eq)]
pub enum RotatorError {
    EmptyRoles,
}

impl fmt::Display for RotatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotatorError::EmptyRoles => write!(f, "role list must contain at least one role"),
        }
    }
}

impl std::error::Error for RotatorError {}

/// How long each phase waits before its next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypewriterTiming {
    pub type_interval: Duration,
    pub delete_interval: Duration,
    pub pause: Duration,
}

impl Default for TypewriterTiming {
    fn default() -> Self {
        Self {
            type_interval: DEFAULT_TYPE_INTERVAL,
            delete_interval: DEFAULT_DELETE_INTERVAL,
            pause: DEFAULT_PAUSE,
        }
    }
}

/// Snapshot of the rotation. Cheap to clone: roles are shared.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleCycle {
    roles: Arc<[String]>,
    current_index: usize,
    /// Number of characters of the current role on display.
    shown: usize,
    phase: Phase,
}

impl RoleCycle {
    pub fn new(roles: Vec<String>) -> Result<Self, RotatorError> {
        if roles.is_empty() {
            return Err(RotatorError::EmptyRoles);
        }
        Ok(Self {
            roles: roles.into(),
            current_index: 0,
            shown: 0,
            phase: Phase::Typing,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_role(&self) -> &str {
        &self.roles[self.current_index]
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// The visible prefix of the current role.
    pub fn display_text(&self) -> &str {
        let role = self.current_role();
        match role.char_indices().nth(self.shown) {
            Some((end, _)) => &role[..end],
            None => role,
        }
    }

    /// Delay before the tick that follows this state.
    pub fn delay(&self, timing: &TypewriterTiming) -> Duration {
        match self.phase {
            Phase::Typing => timing.type_interval,
            Phase::Paused => timing.pause,
            Phase::Deleting => timing.delete_interval,
        }
    }

    /// Pure transition: the state one tick later.
    pub fn tick(&self) -> RoleCycle {
        let mut next = self.clone();
        let role_len = self.current_role().chars().count();

        match self.phase {
            Phase::Typing => {
                next.shown = (self.shown + 1).min(role_len);
                if next.shown == role_len {
                    next.phase = Phase::Paused;
                }
            }
            Phase::Paused => {
                next.phase = Phase::Deleting;
            }
            Phase::Deleting => {
                next.shown = self.shown.saturating_sub(1);
                if next.shown == 0 {
                    next.current_index = (self.current_index + 1) % self.roles.len();
                    next.phase = Phase::Typing;
                }
            }
        }
        next
    }
}

/// Drives a [`RoleCycle`] from one pending deadline.
#[derive(Debug)]
pub struct Typewriter {
    cycle: RoleCycle,
    timing: TypewriterTiming,
    deadline: Option<Instant>,
}

impl Typewriter {
    /// Mounts the rotator and schedules its first tick.
    pub fn start(cycle: RoleCycle, timing: TypewriterTiming, now: Instant) -> Self {
        let deadline = Some(now + cycle.delay(&timing));
        Self {
            cycle,
            timing,
            deadline,
        }
    }

    pub fn cycle(&self) -> &RoleCycle {
        &self.cycle
    }

    pub fn display_text(&self) -> &str {
        self.cycle.display_text()
    }

    /// When the pending tick is due, or `None` once cancelled.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        self.deadline.is_none()
    }

    /// Fires the pending tick if it is due and schedules the next one.
    ///
    /// At most one tick per call; the follow-up is measured from `now` so a
    /// late poll never fires a burst. Returns `true` if the state changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(due) if due <= now => {
                self.cycle = self.cycle.tick();
                self.deadline = Some(now + self.cycle.delay(&self.timing));
                true
            }
            _ => false,
        }
    }

    /// Drops the pending tick. Later polls are no-ops.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cycle(roles: &[&str]) -> RoleCycle {
        RoleCycle::new(roles.iter().map(|r| r.to_string()).collect()).unwrap()
    }

    fn ticks(mut state: RoleCycle, n: usize) -> RoleCycle {
        for _ in 0..n {
            state = state.tick();
        }
        state
    }

    #[test]
    fn test_empty_roles_rejected() {
        assert_eq!(RoleCycle::new(vec![]), Err(RotatorError::EmptyRoles));
    }

    #[test]
    fn test_initial_state() {
        let state = cycle(&["AI Engineer", "Creative Technologist"]);
        assert_eq!(state.phase(), Phase::Typing);
        assert_eq!(state.current_index(), 0);
        assert_eq!(state.display_text(), "");
    }

    #[test]
    fn test_types_one_char_per_tick_then_pauses() {
        let state = cycle(&["abc", "de"]);
        let state = state.tick();
        assert_eq!(state.display_text(), "a");
        assert_eq!(state.phase(), Phase::Typing);

        let state = ticks(state, 2);
        assert_eq!(state.display_text(), "abc");
        assert_eq!(state.phase(), Phase::Paused);
    }

    #[test]
    fn test_pause_tick_starts_deleting_without_changing_text() {
        let state = ticks(cycle(&["abc", "de"]), 3);
        let state = state.tick();
        assert_eq!(state.phase(), Phase::Deleting);
        assert_eq!(state.display_text(), "abc");
    }

    #[test]
    fn test_deleting_to_empty_advances_role() {
        // 3 typing + 1 pause + 3 deleting
        let state = ticks(cycle(&["abc", "de"]), 7);
        assert_eq!(state.display_text(), "");
        assert_eq!(state.current_index(), 1);
        assert_eq!(state.phase(), Phase::Typing);
        assert_eq!(state.tick().display_text(), "d");
    }

    #[test]
    fn test_index_wraps_around() {
        // "ab": 2 + 1 + 2 = 5 ticks per role; "c": 1 + 1 + 1 = 3
        let state = ticks(cycle(&["ab", "c"]), 8);
        assert_eq!(state.current_index(), 0);
        assert_eq!(state.phase(), Phase::Typing);
    }

    #[test]
    fn test_single_role_cycles_forever() {
        let mut state = cycle(&["X"]);
        let mut phases = Vec::new();
        for _ in 0..9 {
            state = state.tick();
            assert_eq!(state.current_role(), "X");
            phases.push(state.phase());
        }
        assert_eq!(
            phases,
            vec![
                Phase::Paused,
                Phase::Deleting,
                Phase::Typing,
                Phase::Paused,
                Phase::Deleting,
                Phase::Typing,
                Phase::Paused,
                Phase::Deleting,
                Phase::Typing,
            ]
        );
    }

    #[test]
    fn test_multibyte_roles_slice_on_char_boundaries() {
        let state = ticks(cycle(&["王子怡"]), 2);
        assert_eq!(state.display_text(), "王子");
    }

    #[test]
    fn test_empty_role_string_pauses_immediately() {
        let state = cycle(&["", "x"]).tick();
        assert_eq!(state.phase(), Phase::Paused);
        assert_eq!(state.display_text(), "");
    }

    #[test]
    fn test_delay_per_phase() {
        let timing = TypewriterTiming::default();
        let state = cycle(&["a"]);
        assert_eq!(state.delay(&timing), DEFAULT_TYPE_INTERVAL);
        let state = state.tick();
        assert_eq!(state.delay(&timing), DEFAULT_PAUSE);
        let state = state.tick();
        assert_eq!(state.delay(&timing), DEFAULT_DELETE_INTERVAL);
    }

    #[test]
    fn test_typewriter_fires_only_when_due() {
        let t0 = Instant::now();
        let mut typewriter = Typewriter::start(cycle(&["ab"]), TypewriterTiming::default(), t0);
        assert!(!typewriter.poll(t0));
        assert_eq!(typewriter.display_text(), "");

        let due = t0 + DEFAULT_TYPE_INTERVAL;
        assert!(typewriter.poll(due));
        assert_eq!(typewriter.display_text(), "a");
        assert_eq!(typewriter.next_deadline(), Some(due + DEFAULT_TYPE_INTERVAL));
    }

    #[test]
    fn test_typewriter_late_poll_fires_once() {
        let t0 = Instant::now();
        let mut typewriter = Typewriter::start(cycle(&["abcdef"]), TypewriterTiming::default(), t0);
        let late = t0 + Duration::from_secs(10);
        assert!(typewriter.poll(late));
        assert_eq!(typewriter.display_text(), "a");
        assert_eq!(typewriter.next_deadline(), Some(late + DEFAULT_TYPE_INTERVAL));
    }

    #[test]
    fn test_typewriter_uses_pause_after_full_role() {
        let t0 = Instant::now();
        let mut typewriter = Typewriter::start(cycle(&["a"]), TypewriterTiming::default(), t0);
        let t1 = t0 + DEFAULT_TYPE_INTERVAL;
        typewriter.poll(t1);
        assert_eq!(typewriter.cycle().phase(), Phase::Paused);
        assert_eq!(typewriter.next_deadline(), Some(t1 + DEFAULT_PAUSE));
    }

    #[test]
    fn test_cancel_prevents_further_ticks() {
        let t0 = Instant::now();
        let mut typewriter = Typewriter::start(cycle(&["ab"]), TypewriterTiming::default(), t0);
        typewriter.cancel();
        assert!(typewriter.is_cancelled());
        assert!(!typewriter.poll(t0 + Duration::from_secs(60)));
        assert_eq!(typewriter.display_text(), "");
        assert_eq!(typewriter.next_deadline(), None);
    }

    proptest! {
        #[test]
        fn prop_display_is_prefix_of_current_role(
            roles in prop::collection::vec("[a-zé ]{0,8}", 1..5),
            steps in 0usize..200,
        ) {
            let mut state = RoleCycle::new(roles).unwrap();
            for _ in 0..steps {
                let before = state.clone();
                state = state.tick();

                prop_assert!(state.current_role().starts_with(state.display_text()));
                if state.phase() == Phase::Paused {
                    prop_assert_eq!(state.display_text(), state.current_role());
                }
                if state.current_index() != before.current_index() {
                    // Index only moves at the end of a deleting phase.
                    prop_assert_eq!(before.phase(), Phase::Deleting);
                    prop_assert_eq!(state.display_text(), "");
                    prop_assert_eq!(
                        state.current_index(),
                        (before.current_index() + 1) % state.roles().len()
                    );
                }
            }
        }
    }
}
