//! The spinning selection wheel.
//!
//! A [`Wheel`] owns the spin state for one wheel on screen. The host starts a
//! spin with the candidates it currently shows, then calls [`Wheel::advance`]
//! once per rendered frame for as long as the wheel holds a frame
//! subscription. When the wheel comes to rest the candidate under the pointer
//! is resolved, and after a short reveal pause its payload is handed to the
//! completion callback, exactly once.

use std::{f64::consts::PI, rc::Rc};

use crate::{
    candidates::Candidate,
    schedule::{FrameScheduler, RandomSource, Subscription},
};

mod easing;
pub use easing::Easing;

pub mod geometry;

const MIN_TURNS: f64 = 5.0;
const EXTRA_TURNS: f64 = 3.0;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WheelConfig {
    pub min_candidates: usize,
    pub duration_ms: f64,
    pub easing: Easing,
    pub reveal_delay_ms: f64,
    /// Shown to the user when there are not enough candidates to spin
    pub advisory: &'static str,
}

impl WheelConfig {
    /// "What should I eat?"
    pub const fn menu() -> Self {
        Self {
            min_candidates: 3,
            duration_ms: 4000.0,
            easing: Easing::Cubic,
            reveal_delay_ms: 100.0,
            advisory: "Please select filters that show at least 3 items!",
        }
    }

    /// "Who pays?", slower and with a longer tail
    pub const fn payment() -> Self {
        Self {
            min_candidates: 2,
            duration_ms: 5000.0,
            easing: Easing::Quartic,
            reveal_delay_ms: 200.0,
            advisory: "Enter at least 2 names to spin the wheel!",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SpinState {
    Idle {
        rotation: f64,
    },
    Spinning {
        start_rotation: f64,
        start_time: f64,
        target_total_rotation: f64,
        duration_ms: f64,
    },
    Settled {
        final_rotation: f64,
        winner_index: usize,
        settled_at: f64,
    },
}

impl Default for SpinState {
    fn default() -> Self {
        Self::Idle { rotation: 0.0 }
    }
}

impl SpinState {
    fn progress(now: f64, start_time: f64, duration_ms: f64) -> f64 {
        if duration_ms <= 0.0 {
            return 1.0;
        }
        ((now - start_time) / duration_ms).clamp(0.0, 1.0)
    }

    pub fn rotation_at(&self, now: f64, easing: Easing) -> f64 {
        match *self {
            Self::Idle { rotation } => rotation,
            Self::Spinning {
                start_rotation,
                start_time,
                target_total_rotation,
                duration_ms,
            } => {
                let progress = Self::progress(now, start_time, duration_ms);
                start_rotation + target_total_rotation * easing.ease_out(progress)
            }
            Self::Settled { final_rotation, .. } => final_rotation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StartError {
    #[error("the wheel is already spinning")]
    AlreadySpinning,

    #[error("{advisory}")]
    TooFewCandidates {
        required: usize,
        found: usize,
        advisory: &'static str,
    },
}

pub struct Wheel<T> {
    config: WheelConfig,
    state: SpinState,
    now: f64,
    snapshot: Vec<Candidate<T>>,
    subscription: Option<Subscription>,
    scheduler: Rc<dyn FrameScheduler>,
    on_complete: Box<dyn FnMut(T)>,
}

impl<T> std::fmt::Debug for Wheel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wheel")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("candidates", &self.snapshot.len())
            .field("subscribed", &self.subscription.is_some())
            .finish()
    }
}

impl<T: Clone> Wheel<T> {
    pub fn new(
        config: WheelConfig,
        scheduler: Rc<dyn FrameScheduler>,
        on_complete: impl FnMut(T) + 'static,
    ) -> Self {
        Self {
            config,
            state: SpinState::default(),
            now: 0.0,
            snapshot: Vec::new(),
            subscription: None,
            scheduler,
            on_complete: Box::new(on_complete),
        }
    }

    pub const fn config(&self) -> &WheelConfig {
        &self.config
    }

    pub const fn state(&self) -> &SpinState {
        &self.state
    }

    /// The orientation to draw, as of the last frame
    pub fn rotation(&self) -> f64 {
        self.state.rotation_at(self.now, self.config.easing)
    }

    pub const fn is_spinning(&self) -> bool {
        matches!(self.state, SpinState::Spinning { .. })
    }

    /// Spinning, or settled and still waiting out the reveal pause
    pub const fn is_active(&self) -> bool {
        self.subscription.is_some()
    }

    /// The candidates captured by the last spin
    pub fn candidates(&self) -> &[Candidate<T>] {
        &self.snapshot
    }

    pub fn winner(&self) -> Option<&Candidate<T>> {
        match self.state {
            SpinState::Settled { winner_index, .. } => Some(&self.snapshot[winner_index]),
            _ => None,
        }
    }

    /// Starts a fresh spin from wherever the wheel is resting.
    ///
    /// The candidates are copied, later changes to the caller's list are not
    /// seen by this spin. Rejected starts leave the wheel untouched.
    pub fn start(
        &mut self,
        candidates: &[Candidate<T>],
        now: f64,
        rng: &mut impl RandomSource,
    ) -> Result<(), StartError> {
        if self.is_active() {
            log::warn!("ignoring start, the wheel is already spinning");
            return Err(StartError::AlreadySpinning);
        }

        let required = self.config.min_candidates.max(1);
        if candidates.len() < required {
            log::warn!(
                "ignoring start, {} candidates but {required} are needed",
                candidates.len()
            );
            return Err(StartError::TooFewCandidates {
                required,
                found: candidates.len(),
                advisory: self.config.advisory,
            });
        }

        let start_rotation = self.rotation();
        let spins = MIN_TURNS + rng.next_f64() * EXTRA_TURNS;
        let target_total_rotation = spins * 2.0 * PI;

        self.snapshot = candidates.to_vec();
        self.now = now;
        self.state = SpinState::Spinning {
            start_rotation,
            start_time: now,
            target_total_rotation,
            duration_ms: self.config.duration_ms,
        };
        self.subscription
            .replace(Subscription::acquire(Rc::clone(&self.scheduler)));

        log::info!(
            "spinning {} candidates for {spins:.2} turns from {start_rotation:.3} rad",
            self.snapshot.len()
        );
        Ok(())
    }

    /// Moves the spin to `now` and returns the rotation to draw.
    ///
    /// Only elapsed time matters, frames may arrive at any cadence. Does
    /// nothing unless the wheel holds a frame subscription.
    pub fn advance(&mut self, now: f64) -> f64 {
        if self.subscription.is_none() {
            return self.rotation();
        }

        self.now = now;
        match self.state {
            SpinState::Spinning {
                start_time,
                duration_ms,
                ..
            } => {
                if SpinState::progress(now, start_time, duration_ms) < 1.0 {
                    self.request_frame();
                } else {
                    self.settle(now);
                    self.try_reveal(now);
                }
            }
            SpinState::Settled { .. } => self.try_reveal(now),
            SpinState::Idle { .. } => {
                self.subscription.take();
            }
        }

        self.rotation()
    }

    /// Stops the wheel where it is. A cancelled spin never completes.
    pub fn cancel(&mut self) {
        if self.subscription.take().is_some() {
            log::debug!("spin cancelled");
        }
        self.state = SpinState::Idle {
            rotation: self.rotation(),
        };
        self.snapshot.clear();
    }

    fn request_frame(&self) {
        if let Some(subscription) = &self.subscription {
            subscription.request_next()
        }
    }

    fn settle(&mut self, now: f64) {
        let final_rotation = self.state.rotation_at(now, self.config.easing);
        // the snapshot was taken at start, so the count cannot have moved
        let winner_index = geometry::winner_index(final_rotation, self.snapshot.len());

        log::info!(
            "wheel settled at {final_rotation:.3} rad on '{}'",
            self.snapshot[winner_index].label
        );

        self.state = SpinState::Settled {
            final_rotation,
            winner_index,
            settled_at: now,
        };
    }

    fn try_reveal(&mut self, now: f64) {
        let (winner_index, settled_at) = match self.state {
            SpinState::Settled {
                winner_index,
                settled_at,
                ..
            } => (winner_index, settled_at),
            _ => return,
        };

        if now - settled_at < self.config.reveal_delay_ms {
            self.request_frame();
            return;
        }

        self.subscription.take();
        let winner = self.snapshot[winner_index].payload.clone();
        (self.on_complete)(winner);
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::RefCell,
        f64::consts::{PI, TAU},
        rc::Rc,
    };

    use super::*;
    use crate::schedule::testing::{FixedRandom, ManualScheduler, SequenceRandom};

    type Winners<T> = Rc<RefCell<Vec<T>>>;

    fn make_wheel<T: Clone + 'static>(
        config: WheelConfig,
    ) -> (Wheel<T>, ManualScheduler, Winners<T>) {
        let scheduler = ManualScheduler::default();
        let winners = Winners::default();
        let sink = Rc::clone(&winners);
        let wheel = Wheel::new(config, Rc::new(scheduler.clone()), move |winner| {
            sink.borrow_mut().push(winner)
        });
        (wheel, scheduler, winners)
    }

    fn names(list: &[&str]) -> Vec<Candidate<String>> {
        list.iter()
            .map(|name| Candidate::new(*name, name.to_string()))
            .collect()
    }

    fn run_to_rest<T: Clone>(wheel: &mut Wheel<T>, mut now: f64, step: f64) -> f64 {
        while wheel.is_active() {
            now += step;
            wheel.advance(now);
        }
        now
    }

    #[test]
    fn half_random_follows_the_cubic_curve() {
        let (mut wheel, ..) = make_wheel::<String>(WheelConfig::menu());
        let candidates = names(&["a", "b", "c"]);

        wheel.start(&candidates, 0.0, &mut FixedRandom(0.5)).unwrap();

        let target = match *wheel.state() {
            SpinState::Spinning {
                target_total_rotation,
                duration_ms,
                start_rotation,
                ..
            } => {
                assert_eq!(duration_ms, 4000.0);
                assert_eq!(start_rotation, 0.0);
                target_total_rotation
            }
            state => panic!("unexpected state: {state:?}"),
        };
        assert!((target - 13.0 * PI).abs() < 1e-9);

        let rotation = wheel.advance(2000.0);
        assert!((rotation - 0.875 * 13.0 * PI).abs() < 1e-9);
        assert_eq!(wheel.rotation(), rotation);
    }

    #[test]
    fn payment_wheel_uses_the_quartic_curve() {
        let (mut wheel, ..) = make_wheel::<String>(WheelConfig::payment());
        wheel
            .start(&names(&["a", "b"]), 100.0, &mut FixedRandom(0.0))
            .unwrap();

        // 10π total, halfway through five seconds
        let rotation = wheel.advance(2600.0);
        assert!((rotation - 0.9375 * 10.0 * PI).abs() < 1e-9);
    }

    #[test]
    fn three_items_spin_two_do_not() {
        let (mut wheel, scheduler, _) = make_wheel::<String>(WheelConfig::menu());

        let err = wheel
            .start(&names(&["a", "b"]), 0.0, &mut FixedRandom(0.5))
            .unwrap_err();
        assert_eq!(
            err,
            StartError::TooFewCandidates {
                required: 3,
                found: 2,
                advisory: WheelConfig::menu().advisory
            }
        );
        assert_eq!(wheel.state(), &SpinState::Idle { rotation: 0.0 });
        assert_eq!(wheel.advance(1000.0), 0.0);
        assert_eq!(scheduler.submitted(), 0);

        wheel
            .start(&names(&["a", "b", "c"]), 0.0, &mut FixedRandom(0.5))
            .unwrap();
        assert!(wheel.is_spinning());
        assert_eq!(scheduler.live(), 1);
    }

    #[test]
    fn names_need_two() {
        let (mut wheel, ..) = make_wheel::<String>(WheelConfig::payment());
        assert!(wheel
            .start(&names(&["solo"]), 0.0, &mut FixedRandom(0.1))
            .is_err());
        assert!(wheel
            .start(&names(&["a", "b"]), 0.0, &mut FixedRandom(0.1))
            .is_ok());
    }

    #[test]
    fn cancelled_spin_never_completes() {
        let (mut wheel, scheduler, winners) = make_wheel::<String>(WheelConfig::menu());
        wheel
            .start(&names(&["a", "b", "c"]), 0.0, &mut FixedRandom(0.3))
            .unwrap();

        let mid = wheel.advance(1500.0);
        wheel.cancel();
        assert_eq!(scheduler.live(), 0);
        assert_eq!(wheel.state(), &SpinState::Idle { rotation: mid });

        for now in [3000.0, 4000.0, 4100.0, 9000.0] {
            assert_eq!(wheel.advance(now), mid);
        }
        assert!(winners.borrow().is_empty());
    }

    #[test]
    fn cancelling_during_the_reveal_pause_suppresses_the_callback() {
        let (mut wheel, scheduler, winners) = make_wheel::<String>(WheelConfig::payment());
        wheel
            .start(&names(&["a", "b"]), 0.0, &mut FixedRandom(0.3))
            .unwrap();

        wheel.advance(5000.0);
        assert!(matches!(wheel.state(), SpinState::Settled { .. }));
        assert!(wheel.is_active());

        wheel.cancel();
        wheel.advance(6000.0);
        assert!(winners.borrow().is_empty());
        assert_eq!(scheduler.live(), 0);
    }

    #[test]
    fn dropping_the_wheel_releases_the_frame() {
        let (mut wheel, scheduler, winners) = make_wheel::<String>(WheelConfig::menu());
        wheel
            .start(&names(&["a", "b", "c"]), 0.0, &mut FixedRandom(0.3))
            .unwrap();
        wheel.advance(16.0);
        assert_eq!(scheduler.live(), 1);

        drop(wheel);
        assert_eq!(scheduler.live(), 0);
        assert!(winners.borrow().is_empty());
    }

    #[test]
    fn completes_once_after_the_reveal_pause() {
        let (mut wheel, scheduler, winners) = make_wheel::<String>(WheelConfig::menu());
        wheel
            .start(&names(&["a", "b", "c"]), 0.0, &mut FixedRandom(0.7))
            .unwrap();

        wheel.advance(4000.0);
        assert!(matches!(wheel.state(), SpinState::Settled { .. }));
        assert!(winners.borrow().is_empty());

        wheel.advance(4050.0);
        assert!(winners.borrow().is_empty());

        wheel.advance(4100.0);
        assert_eq!(winners.borrow().len(), 1);
        assert_eq!(scheduler.live(), 0);

        for now in [4200.0, 5000.0, 10_000.0] {
            wheel.advance(now);
        }
        assert_eq!(winners.borrow().len(), 1);
        assert_eq!(
            Some(&winners.borrow()[0]),
            wheel.winner().map(|c| &c.payload)
        );
    }

    #[test]
    fn zero_random_lands_on_alice() {
        let (mut wheel, _, winners) = make_wheel::<String>(WheelConfig::payment());
        wheel
            .start(&names(&["Alice", "Bob", "Charlie"]), 0.0, &mut FixedRandom(0.0))
            .unwrap();

        run_to_rest(&mut wheel, 0.0, 16.0);

        match *wheel.state() {
            SpinState::Settled {
                final_rotation,
                winner_index,
                ..
            } => {
                assert!((final_rotation - 5.0 * TAU).abs() < 1e-9);
                assert_eq!(winner_index, 0);
            }
            state => panic!("unexpected state: {state:?}"),
        }
        assert_eq!(*winners.borrow(), vec!["Alice".to_string()]);
    }

    #[test]
    fn second_spin_starts_where_the_first_stopped() {
        let (mut wheel, _, winners) = make_wheel::<String>(WheelConfig::menu());
        let candidates = names(&["a", "b", "c", "d"]);
        let mut rng = SequenceRandom::new([0.25, 0.9]);

        wheel.start(&candidates, 0.0, &mut rng).unwrap();
        let now = run_to_rest(&mut wheel, 0.0, 16.0);
        let first = wheel.rotation();
        assert!(first > 0.0);

        wheel.start(&candidates, now, &mut rng).unwrap();
        match *wheel.state() {
            SpinState::Spinning { start_rotation, .. } => assert_eq!(start_rotation, first),
            state => panic!("unexpected state: {state:?}"),
        }
        assert_eq!(wheel.rotation(), first);

        run_to_rest(&mut wheel, now, 16.0);
        assert!(wheel.rotation() > first + 5.0 * TAU - 1e-9);
        assert_eq!(winners.borrow().len(), 2);
    }

    #[test]
    fn cannot_start_while_active() {
        let (mut wheel, ..) = make_wheel::<String>(WheelConfig::menu());
        let candidates = names(&["a", "b", "c"]);
        wheel.start(&candidates, 0.0, &mut FixedRandom(0.5)).unwrap();

        assert_eq!(
            wheel.start(&candidates, 10.0, &mut FixedRandom(0.1)),
            Err(StartError::AlreadySpinning)
        );

        // settled but not yet revealed
        wheel.advance(4000.0);
        assert_eq!(
            wheel.start(&candidates, 4010.0, &mut FixedRandom(0.1)),
            Err(StartError::AlreadySpinning)
        );

        wheel.advance(4100.0);
        assert!(wheel.start(&candidates, 4200.0, &mut FixedRandom(0.1)).is_ok());
    }

    #[test]
    fn dropped_frames_do_not_change_the_outcome() {
        let candidates = names(&["a", "b", "c", "d", "e", "f", "g"]);

        let (mut smooth, _, smooth_winners) = make_wheel::<String>(WheelConfig::menu());
        smooth.start(&candidates, 0.0, &mut FixedRandom(0.42)).unwrap();
        run_to_rest(&mut smooth, 0.0, 16.0);

        let (mut choppy, _, choppy_winners) = make_wheel::<String>(WheelConfig::menu());
        choppy.start(&candidates, 0.0, &mut FixedRandom(0.42)).unwrap();
        for now in [1.0, 900.0, 3999.0, 4500.0, 4700.0] {
            choppy.advance(now);
        }

        assert_eq!(smooth.rotation(), choppy.rotation());
        assert_eq!(*smooth_winners.borrow(), *choppy_winners.borrow());
        assert_eq!(choppy_winners.borrow().len(), 1);
    }

    #[test]
    fn spin_sees_only_the_snapshot() {
        let (mut wheel, _, winners) = make_wheel::<String>(WheelConfig::payment());
        let mut candidates = names(&["Alice", "Bob", "Charlie"]);
        wheel.start(&candidates, 0.0, &mut FixedRandom(0.0)).unwrap();

        candidates.clear();
        candidates.extend(names(&["Mallory"]));

        run_to_rest(&mut wheel, 0.0, 33.0);
        assert_eq!(wheel.candidates().len(), 3);
        assert_eq!(*winners.borrow(), vec!["Alice".to_string()]);
    }

    #[test]
    fn winner_matches_what_is_under_the_pointer() {
        let candidates = names(&["a", "b", "c", "d", "e"]);
        for step in 0..20 {
            let random = step as f64 / 20.0;
            let (mut wheel, _, winners) = make_wheel::<String>(WheelConfig::menu());
            wheel.start(&candidates, 0.0, &mut FixedRandom(random)).unwrap();
            run_to_rest(&mut wheel, 0.0, 16.0);

            let index = geometry::winner_index(wheel.rotation(), candidates.len());
            assert_eq!(winners.borrow()[0], candidates[index].payload);
        }
    }

    #[test]
    fn advancing_before_the_start_time_holds_still() {
        let (mut wheel, ..) = make_wheel::<String>(WheelConfig::menu());
        wheel
            .start(&names(&["a", "b", "c"]), 1000.0, &mut FixedRandom(0.5))
            .unwrap();
        assert_eq!(wheel.advance(900.0), 0.0);
        assert!(wheel.is_spinning());
    }
}
