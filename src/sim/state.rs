//! Simulation state and its out-of-band mutations (spawn, resize, pointer)

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::CollisionParams;
use super::drag::{DragState, PointerId, PressOutcome};
use super::token::{SpawnProfile, SpinDamping, Token};
use crate::config::{ConfigError, SimConfig};
use crate::shapes::ShapeSource;

/// Result of a pointer press after hit testing and spawning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Grabbed(usize),
    Spawned(usize),
    /// Missed every token but no shapes were usable
    SpawnSkipped,
    /// Another pointer is already dragging
    Ignored,
}

/// Complete simulation state, owned by a single tick driver
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Validated at construction; read-only afterwards
    config: SimConfig,
    /// Viewport width and height
    pub bounds: Vec2,
    /// Tokens in insertion order; last is drawn and picked on top
    pub tokens: Vec<Token>,
    pub drag: DragState,
    /// Current responsive token diameter
    diameter: f32,
    spawn_profile: SpawnProfile,
    rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl SimulationState {
    /// Create an empty simulation for a viewport, seeded for reproducibility
    ///
    /// Fails if `config` does not pass [`SimConfig::validate`].
    pub fn new(
        config: SimConfig,
        width: f32,
        height: f32,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let diameter = config.responsive_diameter(width, height);
        let spawn_profile = SpawnProfile::for_diameter(&config, diameter);
        log::info!(
            "Simulation created: viewport {}x{}, token diameter {:.1}, seed {}",
            width,
            height,
            diameter,
            seed
        );
        Ok(Self {
            config,
            bounds: Vec2::new(width, height),
            tokens: Vec::new(),
            drag: DragState::Idle,
            diameter,
            spawn_profile,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
        })
    }

    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[inline]
    pub fn diameter(&self) -> f32 {
        self.diameter
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.diameter * 0.5
    }

    pub fn spawn_profile(&self) -> &SpawnProfile {
        &self.spawn_profile
    }

    pub fn damping(&self) -> SpinDamping {
        SpinDamping::from(&self.config)
    }

    pub fn collision_params(&self) -> CollisionParams {
        CollisionParams {
            restitution: self.config.restitution_obj,
            extra_separation: self.config.extra_separation,
        }
    }

    /// Apply a viewport resize before the next tick
    ///
    /// Every existing token takes the new radius. Only tokens spawned from
    /// now on use the rescaled speed and spin ranges.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.bounds = Vec2::new(width, height);
        self.diameter = self.config.responsive_diameter(width, height);
        self.spawn_profile = SpawnProfile::for_diameter(&self.config, self.diameter);

        let radius = self.radius();
        for token in &mut self.tokens {
            token.radius = radius;
        }
        log::info!(
            "Resized to {}x{}: token diameter {:.1}",
            width,
            height,
            self.diameter
        );
    }

    /// Append a randomised token at `pos` using one of the usable shapes
    ///
    /// Returns the new token's index, or `None` if no shape is usable.
    pub fn spawn_at<S: ShapeSource + ?Sized>(&mut self, pos: Vec2, shapes: &S) -> Option<usize> {
        let usable = shapes.usable_shapes();
        if usable.is_empty() {
            log::debug!("Spawn at ({:.1}, {:.1}) ignored: no usable shapes", pos.x, pos.y);
            return None;
        }

        let shape = usable[self.rng.random_range(0..usable.len())];
        let token = Token::spawn(pos, self.radius(), shape, &self.spawn_profile, &mut self.rng);
        self.tokens.push(token);
        let index = self.tokens.len() - 1;
        log::debug!("Spawned token {} at ({:.1}, {:.1})", index, pos.x, pos.y);
        Some(index)
    }

    /// Pointer pressed: grab the topmost token, or spawn one if none is hit
    pub fn pointer_down<S: ShapeSource + ?Sized>(
        &mut self,
        pointer_id: PointerId,
        pos: Vec2,
        shapes: &S,
    ) -> PointerAction {
        match self.drag.press(&mut self.tokens, pointer_id, pos) {
            PressOutcome::Grabbed(index) => PointerAction::Grabbed(index),
            PressOutcome::Ignored => PointerAction::Ignored,
            PressOutcome::Miss => match self.spawn_at(pos, shapes) {
                Some(index) => PointerAction::Spawned(index),
                None => PointerAction::SpawnSkipped,
            },
        }
    }

    /// Pointer released: fling the dragged token if this pointer owns it
    pub fn pointer_up(&mut self, pointer_id: PointerId) -> Option<usize> {
        self.drag
            .release(&mut self.tokens, pointer_id, self.config.max_speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{ShapeId, ShapeSet};

    fn state() -> SimulationState {
        SimulationState::new(SimConfig::default(), 1000.0, 1000.0, 42).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let inverted_sizes = SimConfig {
            min_size: 200.0,
            max_size: 100.0,
            ..SimConfig::default()
        };
        let err = SimulationState::new(inverted_sizes, 800.0, 600.0, 1).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let negative_speed = SimConfig {
            spawn_speed_x: -1.0,
            ..SimConfig::default()
        };
        assert!(SimulationState::new(negative_speed, 800.0, 600.0, 1).is_err());

        let inverted_spin = SimConfig {
            spin_start_min: 0.3,
            spin_start_max: 0.1,
            ..SimConfig::default()
        };
        assert!(SimulationState::new(inverted_spin, 800.0, 600.0, 1).is_err());
    }

    #[test]
    fn test_spawn_without_shapes_is_noop() {
        let mut s = state();
        let shapes = ShapeSet::new(6);
        assert_eq!(s.spawn_at(Vec2::new(200.0, 200.0), &shapes), None);
        assert!(s.tokens.is_empty());

        let none: Vec<ShapeId> = Vec::new();
        assert_eq!(
            s.pointer_down(0, Vec2::new(200.0, 200.0), &none),
            PointerAction::SpawnSkipped
        );
        assert!(s.tokens.is_empty());
    }

    #[test]
    fn test_pointer_down_spawns_then_grabs() {
        let mut s = state();
        let shapes = vec![ShapeId(1), ShapeId(2)];
        let pos = Vec2::new(300.0, 300.0);

        assert_eq!(s.pointer_down(0, pos, &shapes), PointerAction::Spawned(0));
        let token = &s.tokens[0];
        assert_eq!(token.pos, pos);
        assert_eq!(token.radius, 90.0);
        assert!(shapes.contains(&token.shape));

        s.pointer_up(0);
        assert_eq!(s.pointer_down(0, pos, &shapes), PointerAction::Grabbed(0));
        assert_eq!(s.tokens[0].vel, Vec2::ZERO);
        assert_eq!(s.tokens.len(), 1);
    }

    #[test]
    fn test_second_pointer_neither_grabs_nor_spawns() {
        let mut s = state();
        let shapes = vec![ShapeId(1)];
        s.pointer_down(0, Vec2::new(300.0, 300.0), &shapes);
        s.pointer_up(0);
        s.pointer_down(0, Vec2::new(300.0, 300.0), &shapes);

        assert_eq!(
            s.pointer_down(1, Vec2::new(800.0, 800.0), &shapes),
            PointerAction::Ignored
        );
        assert_eq!(s.tokens.len(), 1);
    }

    #[test]
    fn test_resize_updates_all_radii() {
        let mut s = state();
        let shapes = vec![ShapeId(1)];
        s.spawn_at(Vec2::new(200.0, 200.0), &shapes);
        s.spawn_at(Vec2::new(600.0, 600.0), &shapes);

        s.resize(500.0, 800.0);
        // 500 * 0.18 = 90
        assert!((s.diameter() - 90.0).abs() < 1e-4);
        assert_eq!(s.bounds, Vec2::new(500.0, 800.0));
        assert!(s.tokens.iter().all(|t| (t.radius - 45.0).abs() < 1e-4));
        assert!((s.spawn_profile().speed_x - 1.6).abs() < 1e-5);
    }

    #[test]
    fn test_same_seed_same_tokens() {
        let shapes = vec![ShapeId(1), ShapeId(2), ShapeId(3)];
        let mut a = state();
        let mut b = state();
        for i in 0..5 {
            let pos = Vec2::new(100.0 + i as f32 * 150.0, 500.0);
            a.spawn_at(pos, &shapes);
            b.spawn_at(pos, &shapes);
        }
        assert_eq!(a.tokens, b.tokens);
    }
}
