//! Per-token motion: integration, wall bounces and the speed ceiling

use glam::Vec2;

use super::drag::Role;
use super::token::{SpinDamping, Token};

/// Advance one step
///
/// Dragged tokens keep spinning but their position is driven by the pointer.
/// The spin cooldown ticks down either way.
pub fn integrate(token: &mut Token, role: Role) {
    if role == Role::Free {
        token.pos += token.vel;
    }
    token.angle += token.spin;
    token.spin_cooldown = token.spin_cooldown.saturating_sub(1);
}

/// Keep a free token inside `[0, bounds.x] x [0, bounds.y]`
///
/// Each crossed boundary reflects the matching velocity component and
/// triggers one spin damping event. On an axis shorter than the token's
/// diameter the token is parked at the center of that axis. Returns the
/// number of boundaries hit.
pub fn bounce_walls(
    token: &mut Token,
    role: Role,
    bounds: Vec2,
    restitution: f32,
    damping: &SpinDamping,
) -> u32 {
    if role == Role::Dragged {
        return 0;
    }

    let r = token.radius;
    let mut hits = 0;

    if token.pos.x - r < 0.0 {
        token.pos.x = r;
        token.vel.x = token.vel.x.abs() * restitution;
        token.apply_spin_loss(damping);
        hits += 1;
    }
    if token.pos.x + r > bounds.x {
        token.pos.x = bounds.x - r;
        token.vel.x = -token.vel.x.abs() * restitution;
        token.apply_spin_loss(damping);
        hits += 1;
    }
    if token.pos.y - r < 0.0 {
        token.pos.y = r;
        token.vel.y = token.vel.y.abs() * restitution;
        token.apply_spin_loss(damping);
        hits += 1;
    }
    if token.pos.y + r > bounds.y {
        token.pos.y = bounds.y - r;
        token.vel.y = -token.vel.y.abs() * restitution;
        token.apply_spin_loss(damping);
        hits += 1;
    }

    // Viewport narrower than the token on an axis: park it centered there
    if bounds.x < 2.0 * r {
        token.pos.x = bounds.x * 0.5;
    }
    if bounds.y < 2.0 * r {
        token.pos.y = bounds.y * 0.5;
    }

    hits
}

/// Scale a free token's velocity down to `max_speed` if it exceeds it
pub fn clamp_speed(token: &mut Token, role: Role, max_speed: f32) {
    if role == Role::Dragged {
        return;
    }
    let speed = token.speed();
    if speed > max_speed {
        token.vel *= max_speed / speed;
    }
}
