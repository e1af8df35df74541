// orbs.rs - Floating orb tweens
//
// Four blurred background shapes drift back and forth forever. Each orb
// yoyos between its rest position and a random offset picked once at start,
// with sine in/out easing and a staggered start.
//
// Offsets are a pure function of elapsed time, so whatever clock drives them
// is independent of the particle frame loop.

use std::f64::consts::PI;

use rand::Rng;

pub const ORB_COUNT: usize = 4;

// Offset target ranges in pixels, symmetric around 0
pub const ORB_DRIFT_X: f32 = 20.0;
pub const ORB_DRIFT_Y: f32 = 30.0;

// Seconds per half cycle (rest -> target)
pub const ORB_DURATION_MIN: f64 = 4.0;
pub const ORB_DURATION_MAX: f64 = 6.0;

// Start delay between consecutive orbs
pub const ORB_STAGGER: f64 = 0.2;

/// Sine ease-in-out on [0, 1]
#[inline]
pub fn sine_in_out(t: f64) -> f64 {
    -((PI * t).cos() - 1.0) / 2.0
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbTween {
    pub target_x: f32,
    pub target_y: f32,
    pub duration: f64,
    pub delay: f64,
}

impl OrbTween {
    fn random<R: Rng>(index: usize, rng: &mut R) -> Self {
        Self {
            target_x: rng.random_range(-ORB_DRIFT_X..=ORB_DRIFT_X),
            target_y: rng.random_range(-ORB_DRIFT_Y..=ORB_DRIFT_Y),
            duration: rng.random_range(ORB_DURATION_MIN..ORB_DURATION_MAX),
            delay: index as f64 * ORB_STAGGER,
        }
    }

    /// Eased position along rest -> target, in [0, 1]
    pub fn progress(&self, elapsed: f64) -> f64 {
        let local = elapsed - self.delay;
        if local <= 0.0 || self.duration <= 0.0 {
            return 0.0;
        }
        let cycles = local / self.duration;
        let half = cycles.floor();
        let frac = cycles - half;
        // Odd half-cycles run backwards
        let phase = if half as u64 % 2 == 0 { frac } else { 1.0 - frac };
        sine_in_out(phase)
    }

    /// Offset from rest in pixels
    pub fn offset(&self, elapsed: f64) -> (f32, f32) {
        let p = self.progress(elapsed) as f32;
        (self.target_x * p, self.target_y * p)
    }
}

/// The orb set for one mount
#[derive(Clone, Debug, PartialEq)]
pub struct OrbField {
    tweens: [OrbTween; ORB_COUNT],
}

impl OrbField {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            tweens: std::array::from_fn(|i| OrbTween::random(i, rng)),
        }
    }

    pub fn tweens(&self) -> &[OrbTween; ORB_COUNT] {
        &self.tweens
    }

    /// Offsets of every orb `elapsed` seconds after start
    pub fn offsets(&self, elapsed: f64) -> [(f32, f32); ORB_COUNT] {
        std::array::from_fn(|i| self.tweens[i].offset(elapsed))
    }
}
