use crate::config::FoodConfig;
use crate::constants::*;
use crate::entity::{Draw, DrawContext, TickEnv};
use crate::painter::{Painter, arc_points, cubic_bezier_points, star_points};
use crate::theme::Theme;
use crate::utils::{ease_vec_toward, random_signed, rgb, with_alpha};
use glam::{Vec2, Vec4};
use rand::Rng;

const CLOUD_COLOR: Vec4 = Vec4::new(1.0, 1.0, 1.0, 0.8);
const STAR_COLOR: Vec4 = rgb(0xfbbf24);
const MOON_COLOR: Vec4 = rgb(0xfef3c7);
const GLOW_RADIUS: f32 = 26.0;
const GLOW_ALPHA: f32 = 0.2;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FoodKind {
    Cloud,
    Star,
    Moon,
}

impl FoodKind {
    /// Clouds by day; mostly stars with the odd moon by night.
    pub fn pick<R: Rng + ?Sized>(theme: Theme, star_probability: f64, rng: &mut R) -> Self {
        match theme {
            Theme::Light => FoodKind::Cloud,
            Theme::Dark => {
                if rng.gen_bool(star_probability.clamp(0.0, 1.0)) {
                    FoodKind::Star
                } else {
                    FoodKind::Moon
                }
            }
        }
    }
}

/// Decorative sky object that drifts around and can be dragged to an agent.
/// Position is in world space.
#[derive(Debug, Clone)]
pub struct Food {
    pub kind: FoodKind,
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
}

impl Food {
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        kind: FoodKind,
        env: &TickEnv,
        config: &FoodConfig,
    ) -> Self {
        let span = (env.viewport.width - 2.0 * FOOD_SPAWN_MARGIN_X).max(1.0);
        let x = rng.gen_range(0.0..span) + FOOD_SPAWN_MARGIN_X;
        let y = rng.gen_range(0.0..(env.viewport.height * 0.5).max(1.0));
        let velocity = Vec2::new(
            random_signed(rng, config.max_drift),
            random_signed(rng, config.max_drift),
        );
        Self {
            kind,
            position: Vec2::new(x, y),
            velocity,
            radius: config.radius,
        }
    }

    /// A dragged food chases the pointer; otherwise it drifts and bounces
    /// inside the upper part of the viewport.
    pub fn update(&mut self, is_dragged: bool, env: &TickEnv) {
        if is_dragged {
            self.position = ease_vec_toward(self.position, env.mouse_world, FOOD_DRAG_LERP);
            return;
        }
        self.position += self.velocity;
        if self.position.x < 0.0 {
            self.velocity.x = self.velocity.x.abs();
        } else if self.position.x > env.viewport.width {
            self.velocity.x = -self.velocity.x.abs();
        }
        let bottom = env.viewport.height - FOOD_BOTTOM_MARGIN;
        if self.position.y < 0.0 {
            self.velocity.y = self.velocity.y.abs();
        } else if self.position.y > bottom {
            self.velocity.y = -self.velocity.y.abs();
        }
    }

    pub fn hit_test(&self, screen_point: Vec2, scroll_y: f32, hit_radius: f32) -> bool {
        let screen = Vec2::new(self.position.x, self.position.y - scroll_y);
        screen.distance(screen_point) < hit_radius
    }

    fn draw_cloud(painter: &mut Painter<'_>) {
        painter.fill_circle(Vec2::ZERO, 20.0, CLOUD_COLOR);
        painter.fill_circle(Vec2::new(-15.0, 5.0), 15.0, CLOUD_COLOR);
        painter.fill_circle(Vec2::new(15.0, 5.0), 15.0, CLOUD_COLOR);
        painter.fill_circle(Vec2::new(8.0, -10.0), 18.0, CLOUD_COLOR);
    }

    fn draw_star(painter: &mut Painter<'_>) {
        painter.fill_circle(Vec2::ZERO, GLOW_RADIUS, with_alpha(STAR_COLOR, GLOW_ALPHA));
        painter.fill_polygon(&star_points(Vec2::ZERO, 5, 20.0, 10.0), STAR_COLOR);
    }

    fn draw_moon(painter: &mut Painter<'_>) {
        painter.fill_circle(Vec2::ZERO, GLOW_RADIUS, with_alpha(MOON_COLOR, GLOW_ALPHA));
        // Outer rim swings round the left side, the inner curve closes the crescent.
        let mut outline = arc_points(Vec2::ZERO, 15.0, 1.3, 5.2);
        let rim_end = *outline.last().unwrap_or(&Vec2::ZERO);
        let inner = cubic_bezier_points(
            rim_end,
            Vec2::new(-5.0, 0.0),
            Vec2::new(-5.0, 15.0),
            Vec2::new(0.0, 15.0),
            12,
        );
        outline.extend(inner.into_iter().skip(1));
        painter.fill_polygon(&outline, MOON_COLOR);
    }
}

impl Draw for Food {
    fn draw(&self, painter: &mut Painter<'_>, context: &DrawContext) {
        if !context.viewport.is_row_visible(self.position.y, FOOD_CULL_MARGIN) {
            return;
        }
        painter.save();
        painter.translate(context.viewport.world_to_screen(self.position));
        match self.kind {
            FoodKind::Cloud => Self::draw_cloud(painter),
            FoodKind::Star => Self::draw_star(painter),
            FoodKind::Moon => Self::draw_moon(painter),
        }
        painter.restore();
    }
}
