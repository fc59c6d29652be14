//! The spinning token entity and its spin damping rule

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::shapes::ShapeId;

/// Ranges used to randomise a freshly spawned token
///
/// Recomputed whenever the viewport changes size; existing tokens keep
/// whatever velocity and spin they already have.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnProfile {
    /// Half-range of the initial x velocity
    pub speed_x: f32,
    /// Half-range of the initial y velocity
    pub speed_y: f32,
    pub spin_min: f32,
    pub spin_max: f32,
}

impl SpawnProfile {
    /// Scale the configured ranges for tokens of `diameter`
    ///
    /// Speeds scale linearly with size, spin with the square root of the
    /// size ratio. Spin never starts below the damping floor.
    pub fn for_diameter(config: &SimConfig, diameter: f32) -> Self {
        let scale = diameter / config.reference_size;
        let spin_scale = scale.sqrt();
        let spin_min = (config.spin_start_min * spin_scale).max(config.min_spin);
        let spin_max = (config.spin_start_max * spin_scale).max(spin_min);
        Self {
            speed_x: config.spawn_speed_x * scale,
            speed_y: config.spawn_speed_y * scale,
            spin_min,
            spin_max,
        }
    }
}

/// Parameters of a spin damping event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinDamping {
    pub loss: f32,
    pub min_spin: f32,
    pub cooldown_steps: u32,
}

impl From<&SimConfig> for SpinDamping {
    fn from(config: &SimConfig) -> Self {
        Self {
            loss: config.spin_loss,
            min_spin: config.min_spin,
            cooldown_steps: config.spin_cooldown_steps,
        }
    }
}

/// A spinning, collidable token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub pos: Vec2,
    /// Change in position per step
    pub vel: Vec2,
    pub radius: f32,
    /// Orientation in radians (never normalized)
    pub angle: f32,
    /// Signed angular velocity in radians per step
    pub spin: f32,
    /// Steps left before spin can be damped again
    pub spin_cooldown: u32,
    pub shape: ShapeId,
}

impl Token {
    /// A token at rest with no spin
    pub fn new(pos: Vec2, radius: f32, shape: ShapeId) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            angle: 0.0,
            spin: 0.0,
            spin_cooldown: 0,
            shape,
        }
    }

    /// A token with randomised velocity, orientation and spin
    pub fn spawn(
        pos: Vec2,
        radius: f32,
        shape: ShapeId,
        profile: &SpawnProfile,
        rng: &mut impl Rng,
    ) -> Self {
        let vel = Vec2::new(
            rng.random_range(-profile.speed_x..=profile.speed_x),
            rng.random_range(-profile.speed_y..=profile.speed_y),
        );
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let magnitude = rng.random_range(profile.spin_min..=profile.spin_max);
        let spin = if rng.random_bool(0.5) { magnitude } else { -magnitude };

        Self {
            pos,
            vel,
            radius,
            angle,
            spin,
            spin_cooldown: 0,
            shape,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Hit test against the token's circle (boundary inclusive)
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.distance_squared(self.pos) <= self.radius * self.radius
    }

    /// Slow the spin once per contact window
    ///
    /// Returns true if the spin was actually reduced.
    pub fn apply_spin_loss(&mut self, damping: &SpinDamping) -> bool {
        if self.spin_cooldown > 0 {
            return false;
        }

        let sign = if self.spin >= 0.0 { 1.0 } else { -1.0 };
        let magnitude = (self.spin.abs() * damping.loss).max(damping.min_spin);
        self.spin = sign * magnitude;
        self.spin_cooldown = damping.cooldown_steps;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn damping() -> SpinDamping {
        SpinDamping::from(&SimConfig::default())
    }

    #[test]
    fn test_spin_loss_preserves_sign() {
        let mut token = Token::new(Vec2::ZERO, 10.0, ShapeId(0));
        token.spin = -0.2;
        assert!(token.apply_spin_loss(&damping()));
        assert!((token.spin - (-0.2 * 0.94)).abs() < 1e-6);
        assert_eq!(token.spin_cooldown, 8);
    }

    #[test]
    fn test_spin_loss_floor() {
        let mut token = Token::new(Vec2::ZERO, 10.0, ShapeId(0));
        token.spin = 0.061;
        token.apply_spin_loss(&damping());
        assert_eq!(token.spin, 0.06);

        token.spin_cooldown = 0;
        token.apply_spin_loss(&damping());
        assert_eq!(token.spin, 0.06);
    }

    #[test]
    fn test_spin_loss_cooldown_guard() {
        let mut token = Token::new(Vec2::ZERO, 10.0, ShapeId(0));
        token.spin = 0.25;
        assert!(token.apply_spin_loss(&damping()));
        let after_first = token.spin;
        assert!(!token.apply_spin_loss(&damping()));
        assert_eq!(token.spin, after_first);
    }

    #[test]
    fn test_spawn_within_profile() {
        let config = SimConfig::default();
        let profile = SpawnProfile::for_diameter(&config, config.reference_size);
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..200 {
            let t = Token::spawn(Vec2::new(5.0, 5.0), 90.0, ShapeId(3), &profile, &mut rng);
            assert!(t.vel.x.abs() <= 3.2 && t.vel.y.abs() <= 2.8);
            assert!((0.18..=0.28).contains(&t.spin.abs()));
            assert!((0.0..std::f32::consts::TAU).contains(&t.angle));
            assert_eq!(t.spin_cooldown, 0);
        }
    }

    #[test]
    fn test_profile_scales_with_diameter() {
        let config = SimConfig::default();
        let half = SpawnProfile::for_diameter(&config, 90.0);
        assert!((half.speed_x - 1.6).abs() < 1e-5);
        assert!((half.speed_y - 1.4).abs() < 1e-5);
        assert!(half.spin_min >= config.min_spin);
        assert!(half.spin_min < config.spin_start_min);

        // Spin never starts under the floor, however small the token
        let tiny = SpawnProfile::for_diameter(&config, 1.0);
        assert_eq!(tiny.spin_min, config.min_spin);
        assert!(tiny.spin_max >= tiny.spin_min);
    }

    #[test]
    fn test_contains_boundary() {
        let token = Token::new(Vec2::new(100.0, 100.0), 50.0, ShapeId(0));
        assert!(token.contains(Vec2::new(150.0, 100.0)));
        assert!(!token.contains(Vec2::new(150.1, 100.0)));
    }
}
