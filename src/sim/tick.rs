//! Simulation step
//!
//! Pipeline per tick, in this order:
//! 1. queued pointer presses/releases
//! 2. integrate, bounce off walls and clamp speed (per token)
//! 3. pin the dragged token to the pointer
//! 4. resolve all token pairs

use glam::Vec2;

use super::collision::resolve_all;
use super::drag::PointerId;
use super::motion::{bounce_walls, clamp_speed, integrate};
use super::state::{PointerAction, SimulationState};
use crate::shapes::ShapeSource;

/// Discrete pointer event, delivered between ticks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { id: PointerId, pos: Vec2 },
    Up { id: PointerId },
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Current position of the primary pointer, if known
    ///
    /// `None` while dragging leaves the token in place and zeroes its
    /// pending fling velocity.
    pub pointer: Option<Vec2>,
    /// Events received since the previous tick, oldest first
    pub events: Vec<PointerEvent>,
}

impl TickInput {
    /// Input with only a pointer position
    pub fn at(pointer: Vec2) -> Self {
        Self {
            pointer: Some(pointer),
            events: Vec::new(),
        }
    }
}

/// What happened during a tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub actions: Vec<PointerAction>,
    pub released: Option<usize>,
    pub wall_hits: u32,
    pub contacts: u32,
    pub impulses: u32,
}

/// Advance the simulation by one step
pub fn tick<S: ShapeSource + ?Sized>(
    state: &mut SimulationState,
    shapes: &S,
    input: &TickInput,
) -> TickReport {
    let mut report = TickReport::default();

    for event in &input.events {
        match *event {
            PointerEvent::Down { id, pos } => {
                report.actions.push(state.pointer_down(id, pos, shapes));
            }
            PointerEvent::Up { id } => {
                if let Some(index) = state.pointer_up(id) {
                    report.released = Some(index);
                }
            }
        }
    }

    state.time_ticks += 1;

    let damping = state.damping();
    let bounds = state.bounds;
    let restitution = state.config().restitution_wall;
    let max_speed = state.config().max_speed;

    for (i, token) in state.tokens.iter_mut().enumerate() {
        let role = state.drag.role_of(i);
        integrate(token, role);
        report.wall_hits += bounce_walls(token, role, bounds, restitution, &damping);
        clamp_speed(token, role, max_speed);
    }

    match input.pointer {
        Some(pointer) => state.drag.follow(&mut state.tokens, pointer),
        None => state.drag.hold(),
    }

    let params = state.collision_params();
    let stats = resolve_all(&mut state.tokens, &state.drag, &params, &damping);
    report.contacts = stats.contacts;
    report.impulses = stats.impulses;

    report
}

/// Owns a simulation and the shapes it spawns with
#[derive(Debug)]
pub struct Simulator<S: ShapeSource> {
    pub state: SimulationState,
    pub shapes: S,
}

impl<S: ShapeSource> Simulator<S> {
    pub fn new(state: SimulationState, shapes: S) -> Self {
        Self { state, shapes }
    }

    /// Run one tick
    pub fn step(&mut self, input: &TickInput) -> TickReport {
        tick(&mut self.state, &self.shapes, input)
    }

    /// Apply a viewport resize before the next tick
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }
}
