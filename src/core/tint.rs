//! Colours for tiles and pieces, and timed transitions between them.
//!
//! Tints are purely cosmetic. The engine keeps them current on every tick so
//! a host can copy them onto its sprites.

use serde::{Deserialize, Serialize};

/// RGBA colour with channels in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tint {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl Default for Tint {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Tint {
    pub const WHITE: Tint = Tint::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Tint = Tint::rgb(0.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Linear interpolation, `t` clamped to `0.0..=1.0`.
    #[must_use]
    pub fn lerp(self, to: Tint, t: f32) -> Tint {
        let t = t.clamp(0.0, 1.0);
        Tint::new(
            self.r + (to.r - self.r) * t,
            self.g + (to.g - self.g) * t,
            self.b + (to.b - self.b) * t,
            self.a + (to.a - self.a) * t,
        )
    }
}

/// An in-progress linear fade from one tint to another.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TintTransition {
    from: Tint,
    to: Tint,
    duration: f32,
    elapsed: f32,
}

impl TintTransition {
    #[must_use]
    pub fn new(from: Tint, to: Tint, duration: f32) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: 0.0,
        }
    }

    #[must_use]
    pub fn target(&self) -> Tint {
        self.to
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advance by `dt` seconds and return the tint to show now.
    ///
    /// Once finished this returns exactly the target tint.
    pub fn advance(&mut self, dt: f32) -> Tint {
        self.elapsed += dt.max(0.0);
        if self.is_finished() {
            self.to
        } else {
            self.from.lerp(self.to, self.elapsed / self.duration)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        let a = Tint::BLACK;
        let b = Tint::WHITE;

        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 2.0), b);
        assert_eq!(a.lerp(b, 0.5), Tint::rgb(0.5, 0.5, 0.5));
    }

    #[test]
    fn test_transition_reaches_target_exactly() {
        let target = Tint::rgb(0.3, 0.6, 0.9);
        let mut transition = TintTransition::new(Tint::BLACK, target, 0.1);

        let mut last = Tint::BLACK;
        for _ in 0..7 {
            last = transition.advance(0.016);
        }

        assert!(transition.is_finished());
        assert_eq!(last, target);
    }

    #[test]
    fn test_zero_duration_is_immediate() {
        let mut transition = TintTransition::new(Tint::BLACK, Tint::WHITE, 0.0);
        assert!(transition.is_finished());
        assert_eq!(transition.advance(0.0), Tint::WHITE);
    }

    #[test]
    fn test_alpha_defaults_to_opaque() {
        let tint: Tint = serde_json::from_str(r#"{"r":0.5,"g":0.5,"b":0.5}"#).unwrap();
        assert_eq!(tint.a, 1.0);
    }
}
