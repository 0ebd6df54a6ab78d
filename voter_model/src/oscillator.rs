//! Bounded reflecting oscillator used for the head shake.

/// Triangle-wave animation of `ratio` across `[0, 1]`.
///
/// Each update adds `step`.  Reaching or crossing a bound reflects the
/// overshoot back inside and turns the step around, so `ratio` never leaves
/// the unit interval no matter how many updates run.
#[derive(Clone, Debug, PartialEq)]
pub struct Oscillator {
    ratio: f32,
    step:  f32,
}

impl Oscillator {
    /// Maximum visual deflection either side of centre, in degrees.
    pub const AMPLITUDE_DEG: f32 = 10.0;

    pub fn new(step: f32) -> Self {
        Oscillator { ratio: 0.0, step }
    }

    /// Start at `ratio` (clamped into `[0, 1]`) instead of zero.
    pub fn starting_at(mut self, ratio: f32) -> Self {
        self.ratio = ratio.clamp(0.0, 1.0);
        self
    }

    pub fn ratio(&self) -> f32 { self.ratio }
    pub fn step(&self)  -> f32 { self.step }

    pub fn update(&mut self) {
        self.ratio += self.step;
        if self.ratio >= 1.0 {
            self.ratio = 2.0 - self.ratio;
            self.step = -self.step.abs();
        } else if self.ratio <= 0.0 {
            self.ratio = -self.ratio;
            self.step = self.step.abs();
        }
    }

    /// Current deflection in degrees, in `[-10, +10]`.
    pub fn angle(&self) -> f32 {
        (self.ratio - 0.5) * 2.0 * Self::AMPLITUDE_DEG
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn ratio_stays_in_unit_interval() {
        let mut osc = Oscillator::new(0.02).starting_at(0.5);
        for _ in 0..100_000 {
            osc.update();
            assert!((0.0..=1.0).contains(&osc.ratio()), "ratio {}", osc.ratio());
        }
    }

    #[test]
    fn awkward_step_still_bounded() {
        let mut osc = Oscillator::new(0.37);
        for _ in 0..10_000 {
            osc.update();
            assert!((0.0..=1.0).contains(&osc.ratio()));
        }
    }

    #[test]
    fn direction_flips_only_at_bounds() {
        let mut osc = Oscillator::new(0.02).starting_at(0.5);
        let mut flips = 0;
        for _ in 0..1_000 {
            let before = osc.step();
            osc.update();
            if osc.step().signum() != before.signum() {
                flips += 1;
                let r = osc.ratio();
                assert!(r <= 0.02 + 1e-5 || r >= 1.0 - 0.02 - 1e-5, "flip at {}", r);
                if before > 0.0 { assert!(r >= 0.5); } else { assert!(r <= 0.5); }
            }
        }
        // Period is 100 updates, so roughly 20 turnarounds in 1000.
        assert!(flips >= 18 && flips <= 22, "flips {}", flips);
    }

    #[test]
    fn reflects_overshoot() {
        let mut osc = Oscillator::new(0.3).starting_at(0.9);
        osc.update();
        assert_abs_diff_eq!(osc.ratio(), 0.8, epsilon = 1e-6);
        assert!(osc.step() < 0.0);
    }

    #[test]
    fn angle_spans_plus_minus_ten() {
        assert_abs_diff_eq!(Oscillator::new(0.1).angle(), -10.0);
        assert_abs_diff_eq!(Oscillator::new(0.1).starting_at(1.0).angle(), 10.0);
        assert_abs_diff_eq!(Oscillator::new(0.1).starting_at(0.5).angle(), 0.0);
    }
}
