use crate::constants::*;
use crate::entity::{Draw, DrawContext, Transient};
use crate::painter::Painter;
use crate::utils::{pick_color, random_signed};
use glam::{Vec2, Vec4};
use rand::Rng;

/// Short-lived speck thrown out by a splash or the profile explosion.
/// Lives in screen space.
#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    pub color: Vec4,
    pub life: f32,
    pub decay: f32,
    pub gravity: f32,
    pub friction: f32,
}

impl Particle {
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, origin: Vec2, color: Vec4, amplified: bool) -> Self {
        let (size_mult, speed_mult) = if amplified {
            (AMPLIFIED_SIZE_MULTIPLIER, AMPLIFIED_SPEED_MULTIPLIER)
        } else {
            (1.0, 1.0)
        };
        let size = (rng.gen_range(0.0..PARTICLE_SIZE_SPREAD) + PARTICLE_MIN_SIZE) * size_mult;
        let velocity = Vec2::new(
            random_signed(rng, PARTICLE_MAX_SPEED),
            random_signed(rng, PARTICLE_MAX_SPEED),
        ) * speed_mult;
        let decay = rng.gen_range(0.0..PARTICLE_DECAY_SPREAD) + PARTICLE_MIN_DECAY;
        Self::new(origin, velocity, size, color, decay)
    }

    pub fn new(position: Vec2, velocity: Vec2, size: f32, color: Vec4, decay: f32) -> Self {
        Self {
            position,
            velocity,
            size,
            color,
            life: 1.0,
            decay,
            gravity: PARTICLE_GRAVITY,
            friction: PARTICLE_FRICTION,
        }
    }
}

/// Pushes `count` particles at `origin`, colours drawn from `palette`.
pub fn spawn_burst<R: Rng + ?Sized>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    origin: Vec2,
    count: usize,
    palette: &[Vec4],
    amplified: bool,
) {
    particles.reserve(count);
    for _ in 0..count {
        let color = pick_color(rng, palette);
        particles.push(Particle::spawn(rng, origin, color, amplified));
    }
}

impl Transient for Particle {
    fn advance(&mut self) {
        self.velocity.y += self.gravity;
        self.velocity *= self.friction;
        self.position += self.velocity;
        self.life -= self.decay;
    }

    fn is_expired(&self) -> bool {
        self.life <= 0.0
    }
}

impl Draw for Particle {
    fn draw(&self, painter: &mut Painter<'_>, _context: &DrawContext) {
        painter.save();
        painter.set_alpha(self.life);
        painter.fill_circle(self.position, self.size, self.color);
        painter.restore();
    }
}
