use crate::constants::*;
use crate::entity::{Draw, DrawContext, Transient};
use crate::painter::Painter;
use glam::Vec2;

/// Expanding, fading ring left behind by the pointer. Lives in screen space.
#[derive(Debug, Clone)]
pub struct Ripple {
    pub position: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    pub speed: f32,
    pub alpha: f32,
}

impl Ripple {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            radius: RIPPLE_START_RADIUS,
            max_radius: RIPPLE_MAX_RADIUS,
            speed: RIPPLE_SPEED,
            alpha: 1.0,
        }
    }

    /// Shock ring for the profile explosion.
    pub fn amplified(position: Vec2) -> Self {
        Self {
            max_radius: RIPPLE_MAX_RADIUS * AMPLIFIED_SPEED_MULTIPLIER,
            speed: RIPPLE_SPEED * AMPLIFIED_SPEED_MULTIPLIER,
            ..Self::new(position)
        }
    }
}

impl Transient for Ripple {
    fn advance(&mut self) {
        self.radius = (self.radius + self.speed).min(self.max_radius);
        self.alpha -= RIPPLE_FADE_STEP;
    }

    fn is_expired(&self) -> bool {
        self.alpha <= 0.0
    }
}

impl Draw for Ripple {
    fn draw(&self, painter: &mut Painter<'_>, context: &DrawContext) {
        painter.save();
        painter.set_alpha(self.alpha * RIPPLE_OPACITY);
        painter.stroke_circle(self.position, self.radius, RIPPLE_LINE_WIDTH, context.accent);
        painter.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::advance_transients;

    #[test]
    fn grows_until_capped() {
        let mut ripple = Ripple::new(Vec2::ZERO);
        for _ in 0..45 {
            ripple.advance();
        }
        assert_eq!(ripple.radius, RIPPLE_MAX_RADIUS);
    }

    #[test]
    fn removed_after_fifty_ticks() {
        let mut ripples = vec![Ripple::new(Vec2::new(5.0, 5.0))];
        let mut ticks = 0;
        let mut last_alpha = 1.0;
        while !ripples.is_empty() {
            advance_transients(&mut ripples);
            ticks += 1;
            if let Some(r) = ripples.first() {
                assert!((last_alpha - r.alpha - RIPPLE_FADE_STEP).abs() < 1e-5);
                last_alpha = r.alpha;
            }
        }
        assert!((49..=51).contains(&ticks), "removed after {ticks} ticks");
    }

    #[test]
    fn amplified_ring_spreads_wider() {
        let mut ripple = Ripple::amplified(Vec2::ZERO);
        for _ in 0..20 {
            ripple.advance();
        }
        assert_eq!(ripple.radius, RIPPLE_START_RADIUS + 20.0 * 3.0);
    }
}
