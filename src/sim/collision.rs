//! Token-token collision detection and response
//!
//! Tokens are treated as circles. Overlapping pairs are pushed apart along the
//! contact normal, then given an elastic impulse. A dragged token behaves as
//! if it had infinite mass: it neither moves nor absorbs momentum.

use glam::Vec2;

use super::drag::{DragState, Role};
use super::token::{SpinDamping, Token};

/// Parameters for pairwise response
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionParams {
    pub restitution: f32,
    /// Padding added to the overlap so resting contacts do not jitter
    pub extra_separation: f32,
}

/// What happened when a pair was checked
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// Circles do not overlap
    None,
    /// Centers coincide; no normal exists so the pair is skipped
    Degenerate,
    /// Overlapping but already moving apart; separated without an impulse
    Separating { normal: Vec2 },
    /// Overlapping and approaching; separated and bounced
    Impulse { normal: Vec2, magnitude: f32 },
}

/// Which side of a pair is immovable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    None,
    A,
    B,
}

impl Anchor {
    fn from_roles(a: Role, b: Role) -> Self {
        match (a, b) {
            (Role::Dragged, Role::Free) => Anchor::A,
            (Role::Free, Role::Dragged) => Anchor::B,
            _ => Anchor::None,
        }
    }
}

/// Resolve a single pair
pub fn resolve_pair(
    a: &mut Token,
    role_a: Role,
    b: &mut Token,
    role_b: Role,
    params: &CollisionParams,
    damping: &SpinDamping,
) -> Contact {
    let delta = b.pos - a.pos;
    let dist_sq = delta.length_squared();
    let min_dist = a.radius + b.radius;

    if dist_sq == 0.0 {
        return Contact::Degenerate;
    }
    if dist_sq >= min_dist * min_dist {
        return Contact::None;
    }

    let dist = dist_sq.sqrt();
    let normal = delta / dist;
    let overlap = min_dist - dist + params.extra_separation;
    let anchor = Anchor::from_roles(role_a, role_b);

    // Positional correction
    match anchor {
        Anchor::A => b.pos += normal * overlap,
        Anchor::B => a.pos -= normal * overlap,
        Anchor::None => {
            a.pos -= normal * (overlap * 0.5);
            b.pos += normal * (overlap * 0.5);
        }
    }

    let vel_along_normal = (b.vel - a.vel).dot(normal);
    let contact = if vel_along_normal > 0.0 {
        Contact::Separating { normal }
    } else {
        let magnitude = -(1.0 + params.restitution) * vel_along_normal / 2.0;
        let impulse = normal * magnitude;
        match anchor {
            // The anchored side takes nothing, so the free side gets it all
            Anchor::A => b.vel += impulse * 2.0,
            Anchor::B => a.vel -= impulse * 2.0,
            Anchor::None => {
                a.vel -= impulse;
                b.vel += impulse;
            }
        }
        Contact::Impulse { normal, magnitude }
    };

    a.apply_spin_loss(damping);
    b.apply_spin_loss(damping);
    contact
}

/// Totals from one collision pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionStats {
    pub contacts: u32,
    pub impulses: u32,
    pub degenerate: u32,
}

/// Check every unordered pair once, in list order
pub fn resolve_all(
    tokens: &mut [Token],
    drag: &DragState,
    params: &CollisionParams,
    damping: &SpinDamping,
) -> CollisionStats {
    let mut stats = CollisionStats::default();

    for i in 0..tokens.len() {
        let (head, tail) = tokens.split_at_mut(i + 1);
        let a = &mut head[i];
        let role_a = drag.role_of(i);

        for (offset, b) in tail.iter_mut().enumerate() {
            let j = i + 1 + offset;
            match resolve_pair(a, role_a, b, drag.role_of(j), params, damping) {
                Contact::None => {}
                Contact::Degenerate => stats.degenerate += 1,
                Contact::Separating { .. } => stats.contacts += 1,
                Contact::Impulse { .. } => {
                    stats.contacts += 1;
                    stats.impulses += 1;
                }
            }
        }
    }

    stats
}
