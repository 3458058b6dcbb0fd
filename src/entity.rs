use crate::painter::Painter;
use crate::viewport::Viewport;
use glam::{Vec2, Vec4};

/// What a tick of agent/food physics reads from the outside world.
#[derive(Debug, Copy, Clone)]
pub struct TickEnv {
    pub viewport: Viewport,
    pub mouse_world: Vec2,
    pub gravity: f32,
    pub floor_height: f32,
}

impl TickEnv {
    /// Screen-space y of the line agents walk on.
    pub fn floor_line(&self) -> f32 {
        self.viewport.height - self.floor_height
    }
}

#[derive(Debug, Copy, Clone)]
pub struct DrawContext {
    pub viewport: Viewport,
    pub accent: Vec4,
}

pub trait Draw {
    fn draw(&self, painter: &mut Painter<'_>, context: &DrawContext);
}

/// Self-contained entities that age out on their own.
pub trait Transient {
    fn advance(&mut self);
    fn is_expired(&self) -> bool;
}

/// Advances every entity once and drops the expired ones in the same pass,
/// keeping survivors in order.
pub fn advance_transients<T: Transient>(items: &mut Vec<T>) {
    items.retain_mut(|item| {
        item.advance();
        !item.is_expired()
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Countdown(u32);

    impl Transient for Countdown {
        fn advance(&mut self) {
            self.0 = self.0.saturating_sub(1);
        }
        fn is_expired(&self) -> bool {
            self.0 == 0
        }
    }

    #[test]
    fn expired_entries_removed_survivors_kept_in_order() {
        let mut items = vec![Countdown(3), Countdown(1), Countdown(2), Countdown(1)];
        advance_transients(&mut items);
        let left: Vec<u32> = items.iter().map(|c| c.0).collect();
        assert_eq!(left, vec![2, 1]);
        advance_transients(&mut items);
        assert_eq!(items.len(), 1);
        advance_transients(&mut items);
        assert!(items.is_empty());
    }
}
