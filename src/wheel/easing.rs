/// Deceleration curve for a spin, `1 - (1 - p)^k`
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Easing {
    Cubic,
    Quartic,
}

impl Easing {
    const fn exponent(self) -> i32 {
        match self {
            Self::Cubic => 3,
            Self::Quartic => 4,
        }
    }

    pub fn ease_out(self, progress: f64) -> f64 {
        let remaining = 1.0 - progress.clamp(0.0, 1.0);
        1.0 - remaining.powi(self.exponent())
    }
}

#[cfg(test)]
mod tests {
    use super::Easing;

    #[test]
    fn endpoints() {
        for easing in [Easing::Cubic, Easing::Quartic] {
            assert_eq!(easing.ease_out(0.0), 0.0);
            assert_eq!(easing.ease_out(1.0), 1.0);
            assert_eq!(easing.ease_out(-3.0), 0.0);
            assert_eq!(easing.ease_out(7.0), 1.0);
        }
    }

    #[test]
    fn halfway() {
        assert_eq!(Easing::Cubic.ease_out(0.5), 0.875);
        assert_eq!(Easing::Quartic.ease_out(0.5), 0.9375);
    }

    #[test]
    fn monotonic() {
        for easing in [Easing::Cubic, Easing::Quartic] {
            let mut last = 0.0;
            for step in 0..=1000 {
                let eased = easing.ease_out(step as f64 / 1000.0);
                assert!(eased >= last);
                last = eased;
            }
        }
    }

    #[test]
    fn quartic_settles_earlier() {
        for step in 1..100 {
            let p = step as f64 / 100.0;
            assert!(Easing::Quartic.ease_out(p) > Easing::Cubic.ease_out(p));
        }
    }
}
