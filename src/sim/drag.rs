//! Pointer drag controller
//!
//! At most one token is under pointer control at a time. The first pointer
//! to press owns the drag until it is released; other pointers are ignored.

use glam::Vec2;

use super::token::Token;

/// Identifies a pointer (mouse = 0, touches by their platform id)
pub type PointerId = u32;

/// How a token takes part in motion and collision response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Integrated, bounced and speed-limited normally
    Free,
    /// Driven by the pointer; immovable in collisions
    Dragged,
}

/// Drag state machine
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// Index of the dragged token in the token list
        index: usize,
        pointer_id: PointerId,
        /// Token center minus pointer position at grab time
        offset: Vec2,
        prev_pointer: Vec2,
        /// Last per-step pointer displacement, handed back on release
        fling: Vec2,
    },
}

/// Outcome of a pointer press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// A token was grabbed
    Grabbed(usize),
    /// Nothing under the pointer; caller may spawn here
    Miss,
    /// Another pointer already owns the drag
    Ignored,
}

impl DragState {
    #[inline]
    pub fn target(&self) -> Option<usize> {
        match *self {
            DragState::Idle => None,
            DragState::Dragging { index, .. } => Some(index),
        }
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.target().is_some()
    }

    /// Role of the token at `index`
    #[inline]
    pub fn role_of(&self, index: usize) -> Role {
        if self.target() == Some(index) {
            Role::Dragged
        } else {
            Role::Free
        }
    }

    /// Handle a pointer press: grab the topmost token under the pointer
    pub fn press(
        &mut self,
        tokens: &mut [Token],
        pointer_id: PointerId,
        pointer: Vec2,
    ) -> PressOutcome {
        if self.is_dragging() {
            return PressOutcome::Ignored;
        }

        let Some(index) = pick_topmost(tokens, pointer) else {
            return PressOutcome::Miss;
        };

        let token = &mut tokens[index];
        // Stop residual motion so it does not fight the pointer; spin keeps going
        token.vel = Vec2::ZERO;
        *self = DragState::Dragging {
            index,
            pointer_id,
            offset: token.pos - pointer,
            prev_pointer: pointer,
            fling: Vec2::ZERO,
        };
        log::debug!("Drag start: token {} by pointer {}", index, pointer_id);
        PressOutcome::Grabbed(index)
    }

    /// Per-step update: pin the token to the pointer and track fling velocity
    pub fn follow(&mut self, tokens: &mut [Token], pointer: Vec2) {
        if let DragState::Dragging {
            index,
            offset,
            prev_pointer,
            fling,
            ..
        } = self
        {
            if let Some(token) = tokens.get_mut(*index) {
                token.pos = pointer + *offset;
            }
            *fling = pointer - *prev_pointer;
            *prev_pointer = pointer;
        }
    }

    /// Per-step update when the pointer position is unknown
    ///
    /// The token stays where it is and the pending fling is dropped, so a
    /// release after a still period does not throw it.
    pub fn hold(&mut self) {
        if let DragState::Dragging { fling, .. } = self {
            *fling = Vec2::ZERO;
        }
    }

    /// Handle a pointer release: throw the token with the clamped fling velocity
    ///
    /// Returns the released token index, if this pointer owned the drag.
    pub fn release(
        &mut self,
        tokens: &mut [Token],
        pointer_id: PointerId,
        max_speed: f32,
    ) -> Option<usize> {
        let DragState::Dragging {
            index,
            pointer_id: owner,
            fling,
            ..
        } = *self
        else {
            return None;
        };
        if owner != pointer_id {
            return None;
        }

        let vel = fling.clamp(Vec2::splat(-max_speed), Vec2::splat(max_speed));
        if let Some(token) = tokens.get_mut(index) {
            token.vel = vel;
        }
        *self = DragState::Idle;
        log::debug!("Drag end: token {} flung at ({:.2}, {:.2})", index, vel.x, vel.y);
        Some(index)
    }
}

/// Topmost token (last in list) whose circle contains `point`
pub fn pick_topmost(tokens: &[Token], point: Vec2) -> Option<usize> {
    tokens.iter().rposition(|t| t.contains(point))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ShapeId;

    fn token_at(x: f32, y: f32) -> Token {
        let mut t = Token::new(Vec2::new(x, y), 50.0, ShapeId(0));
        t.vel = Vec2::new(2.0, -1.0);
        t
    }

    #[test]
    fn test_pick_topmost_prefers_last() {
        let tokens = vec![token_at(100.0, 100.0), token_at(120.0, 100.0)];
        assert_eq!(pick_topmost(&tokens, Vec2::new(110.0, 100.0)), Some(1));
        assert_eq!(pick_topmost(&tokens, Vec2::new(55.0, 100.0)), Some(0));
        assert_eq!(pick_topmost(&tokens, Vec2::new(400.0, 400.0)), None);
    }

    #[test]
    fn test_press_records_offset_and_stops_token() {
        let mut tokens = vec![token_at(100.0, 100.0)];
        let mut drag = DragState::default();

        let outcome = drag.press(&mut tokens, 0, Vec2::new(110.0, 90.0));
        assert_eq!(outcome, PressOutcome::Grabbed(0));
        assert_eq!(tokens[0].vel, Vec2::ZERO);
        assert_eq!(drag.role_of(0), Role::Dragged);

        // Token does not snap to the pointer
        drag.follow(&mut tokens, Vec2::new(130.0, 95.0));
        assert_eq!(tokens[0].pos, Vec2::new(120.0, 105.0));
    }

    #[test]
    fn test_press_miss() {
        let mut tokens = vec![token_at(100.0, 100.0)];
        let mut drag = DragState::default();
        assert_eq!(drag.press(&mut tokens, 0, Vec2::new(300.0, 300.0)), PressOutcome::Miss);
        assert_eq!(drag, DragState::Idle);
    }

    #[test]
    fn test_second_pointer_ignored() {
        let mut tokens = vec![token_at(100.0, 100.0), token_at(400.0, 100.0)];
        let mut drag = DragState::default();
        drag.press(&mut tokens, 1, Vec2::new(100.0, 100.0));

        assert_eq!(drag.press(&mut tokens, 2, Vec2::new(400.0, 100.0)), PressOutcome::Ignored);
        assert_eq!(drag.target(), Some(0));
        // Second token untouched
        assert_eq!(tokens[1].vel, Vec2::new(2.0, -1.0));

        // Release from the wrong pointer does nothing
        assert_eq!(drag.release(&mut tokens, 2, 6.0), None);
        assert!(drag.is_dragging());
        assert_eq!(drag.release(&mut tokens, 1, 6.0), Some(0));
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_release_clamps_fling_per_axis() {
        let mut tokens = vec![token_at(100.0, 100.0)];
        let mut drag = DragState::default();
        drag.press(&mut tokens, 0, Vec2::new(100.0, 100.0));
        drag.follow(&mut tokens, Vec2::new(120.0, 103.0));

        drag.release(&mut tokens, 0, 6.0);
        assert_eq!(tokens[0].vel, Vec2::new(6.0, 3.0));
        assert_eq!(drag.role_of(0), Role::Free);
    }

    #[test]
    fn test_hold_clears_pending_fling() {
        let mut tokens = vec![token_at(100.0, 100.0)];
        let mut drag = DragState::default();
        drag.press(&mut tokens, 0, Vec2::new(100.0, 100.0));
        drag.follow(&mut tokens, Vec2::new(105.0, 102.0));
        drag.hold();
        assert_eq!(tokens[0].pos, Vec2::new(105.0, 102.0));

        drag.release(&mut tokens, 0, 6.0);
        assert_eq!(tokens[0].vel, Vec2::ZERO);
    }

    #[test]
    fn test_release_without_motion_drops_token() {
        let mut tokens = vec![token_at(100.0, 100.0)];
        let mut drag = DragState::default();
        drag.press(&mut tokens, 0, Vec2::new(100.0, 100.0));
        drag.follow(&mut tokens, Vec2::new(100.0, 100.0));
        drag.release(&mut tokens, 0, 6.0);
        assert_eq!(tokens[0].vel, Vec2::ZERO);
    }
}
