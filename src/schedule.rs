//! Things a [`Wheel`](crate::wheel::Wheel) borrows from its host: a clock, a
//! random source and something that hands out display frames.

use std::{cell::Cell, rc::Rc};

use crate::RequestPaint;

pub trait Clock {
    /// Monotonic milliseconds since some fixed origin
    fn now_ms(&self) -> f64;
}

impl Clock for egui::Context {
    fn now_ms(&self) -> f64 {
        self.input().time * 1000.0
    }
}

pub trait RandomSource {
    /// Uniform in `[0, 1)`
    fn next_f64(&mut self) -> f64;

    /// Uniform in `0..upper`, the `floor(random() * upper)` way
    fn below(&mut self, upper: u32) -> u32 {
        ((self.next_f64() * upper as f64) as u32).min(upper.saturating_sub(1))
    }
}

pub struct FastRandom(fastrand::Rng);

impl Default for FastRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl FastRandom {
    pub fn new() -> Self {
        Self(fastrand::Rng::new())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self(fastrand::Rng::with_seed(seed))
    }
}

impl RandomSource for FastRandom {
    fn next_f64(&mut self) -> f64 {
        self.0.f64()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameToken(u64);

impl FrameToken {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Delivers display frames to a subscriber until its token is cancelled.
pub trait FrameScheduler {
    fn submit(&self) -> FrameToken;

    /// Called by a live subscriber once per frame it still wants to see.
    fn next_frame(&self, token: FrameToken) {
        let _ = token;
    }

    fn cancel(&self, token: FrameToken);
}

/// Turns frame requests into repaint requests.
///
/// egui has no way to take back a repaint, so cancelling only forgets the token.
pub struct RepaintScheduler<R> {
    repaint: R,
    next: Cell<u64>,
    live: Cell<usize>,
}

impl<R: RequestPaint> RepaintScheduler<R> {
    pub fn new(repaint: R) -> Self {
        Self {
            repaint,
            next: Cell::new(0),
            live: Cell::new(0),
        }
    }

    pub fn live(&self) -> usize {
        self.live.get()
    }
}

impl<R: RequestPaint> FrameScheduler for RepaintScheduler<R> {
    fn submit(&self) -> FrameToken {
        let id = self.next.get();
        self.next.set(id + 1);
        self.live.set(self.live.get() + 1);
        self.repaint.request_repaint();
        FrameToken(id)
    }

    fn next_frame(&self, _token: FrameToken) {
        self.repaint.request_repaint();
    }

    fn cancel(&self, token: FrameToken) {
        log::trace!("frame subscription {} released", token.0);
        self.live.set(self.live.get().saturating_sub(1));
    }
}

/// A live frame subscription, released when dropped.
pub struct Subscription {
    token: FrameToken,
    scheduler: Rc<dyn FrameScheduler>,
}

impl Subscription {
    pub fn acquire(scheduler: Rc<dyn FrameScheduler>) -> Self {
        let token = scheduler.submit();
        Self { token, scheduler }
    }

    pub const fn token(&self) -> FrameToken {
        self.token
    }

    pub fn request_next(&self) {
        self.scheduler.next_frame(self.token)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.scheduler.cancel(self.token)
    }
}


#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::{testing::*, *};

    struct CountingPaint(Rc<Cell<usize>>);

    impl RequestPaint for CountingPaint {
        fn request_repaint(&self) {
            self.0.set(self.0.get() + 1)
        }
    }

    #[test]
    fn subscription_releases_on_drop() {
        let scheduler = ManualScheduler::default();
        let sub = Subscription::acquire(Rc::new(scheduler.clone()));
        assert_eq!(scheduler.live(), 1);

        sub.request_next();
        sub.request_next();
        assert_eq!(scheduler.requested(), 2);

        drop(sub);
        assert_eq!(scheduler.live(), 0);
        assert_eq!(scheduler.cancelled(), 1);
    }

    #[test]
    fn repaint_scheduler_asks_for_repaints() {
        let count = Rc::new(Cell::new(0));
        let scheduler = RepaintScheduler::new(CountingPaint(count.clone()));

        let token = scheduler.submit();
        scheduler.next_frame(token);
        assert_eq!(count.get(), 2);
        assert_eq!(scheduler.live(), 1);

        scheduler.cancel(token);
        assert_eq!(scheduler.live(), 0);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn below_stays_in_range() {
        assert_eq!(FixedRandom(0.0).below(9000), 0);
        assert_eq!(FixedRandom(0.5).below(10), 5);
        assert_eq!(FixedRandom(0.999_999_999_999).below(10), 9);
    }

    #[test]
    fn seeded_fastrand_is_uniform_unit() {
        let mut rng = FastRandom::with_seed(7);
        for _ in 0..1000 {
            let n = rng.next_f64();
            assert!((0.0..1.0).contains(&n));
        }
    }
}
