//! Deterministic simulation module
//!
//! All token physics and pointer interaction lives here:
//! - One fixed step per tick, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (token insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod drag;
pub mod motion;
pub mod state;
pub mod tick;
pub mod token;

pub use collision::{CollisionParams, CollisionStats, Contact, resolve_all, resolve_pair};
pub use drag::{DragState, PointerId, PressOutcome, Role, pick_topmost};
pub use motion::{bounce_walls, clamp_speed, integrate};
pub use state::{PointerAction, SimulationState};
pub use tick::{PointerEvent, Simulator, TickInput, TickReport, tick};
pub use token::{SpawnProfile, SpinDamping, Token};
