use crate::config::{AgentConfig, SimulationConfig};
use crate::constants::*;
use crate::entity::{Draw, DrawContext, TickEnv};
use crate::painter::Painter;
use crate::utils::{ease_toward, ease_vec_toward, mix_rgb, pick_color, random_signed};
use glam::{Vec2, Vec4};
use rand::Rng;
use std::f32::consts::{PI, TAU};

const LIMB_COLOR: Vec4 = Vec4::ONE;
const LEG_WIDTH: f32 = 3.0;
const FACE_LINE_WIDTH: f32 = 2.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AgentState {
    Walk,
    Dragged,
    Fall,
    Land,
    Recover,
    Jump,
}

/// Face drawn on the body, derived from state and timers.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Expression {
    /// `^ ^` eyes and a smile.
    Smiling,
    /// X eyes right after a hard landing.
    Dazed,
    /// Wide O eyes while held or falling.
    Startled,
    /// Dot eyes shifted toward the walking direction.
    Looking { offset: f32 },
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum LegPose {
    Swing(f32),
    Splayed,
    Standing,
}

/// A little walker on the floor line that can be grabbed, thrown and fed.
/// `position.y` is in world space.
#[derive(Debug, Clone)]
pub struct Agent {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub color: Vec4,
    pub state: AgentState,
    pub walk_cycle: f32,
    pub struggle_cycle: f32,
    pub land_timer: u32,
    pub recover_timer: u32,
    pub smile_timer: u32,
    pub scale: Vec2,
}

impl Agent {
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, env: &TickEnv, config: &SimulationConfig) -> Self {
        let radius = config.agent.radius;
        let color = pick_color(rng, &config.palette);
        let x = rng.gen_range(0.0..env.viewport.width.max(1.0));
        let mut agent = Self::new(Vec2::new(x, env.floor_line() - radius), radius, color);
        agent.velocity.x = random_signed(rng, config.agent.max_walk_speed);
        agent
    }

    pub fn new(position: Vec2, radius: f32, color: Vec4) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            radius,
            color,
            state: AgentState::Walk,
            walk_cycle: 0.0,
            struggle_cycle: 0.0,
            land_timer: 0,
            recover_timer: 0,
            smile_timer: 0,
            scale: Vec2::ONE,
        }
    }

    #[inline]
    fn floor_y(&self, env: &TickEnv) -> f32 {
        env.floor_line() - self.radius
    }

    #[inline]
    fn touches_floor(&self, env: &TickEnv) -> bool {
        self.position.y + self.radius >= env.floor_line()
    }

    pub fn screen_position(&self, scroll_y: f32) -> Vec2 {
        Vec2::new(self.position.x, self.position.y - scroll_y)
    }

    pub fn hit_test(&self, screen_point: Vec2, scroll_y: f32, hit_radius: f32) -> bool {
        self.screen_position(scroll_y).distance(screen_point) < hit_radius
    }

    pub fn can_eat(&self) -> bool {
        matches!(self.state, AgentState::Walk | AgentState::Jump)
    }

    pub fn is_smiling(&self) -> bool {
        self.smile_timer > 0
    }

    pub fn begin_drag(&mut self) {
        log::debug!("agent grabbed at {:?} (was {:?})", self.position, self.state);
        self.state = AgentState::Dragged;
    }

    /// Lets go of a dragged agent; the velocity picked up while dragging is
    /// the throw.
    pub fn release(&mut self) {
        log::debug!("agent thrown with velocity {:?}", self.velocity);
        self.state = AgentState::Fall;
    }

    pub fn jump(&mut self, config: &AgentConfig) {
        self.state = AgentState::Jump;
        self.velocity.y = config.jump_velocity;
        self.smile_timer = config.jump_smile_ticks;
    }

    pub fn celebrate(&mut self, ticks: u32) {
        self.smile_timer = ticks;
    }

    pub fn update<R: Rng + ?Sized>(&mut self, env: &TickEnv, config: &AgentConfig, rng: &mut R) {
        self.decay_effects();
        self.step_state(env, config, rng);
    }

    /// Start-of-tick cosmetics: the smile runs down and the squash eases
    /// back. Runs before feeding so a fresh jump keeps its full smile.
    pub fn decay_effects(&mut self) {
        self.smile_timer = self.smile_timer.saturating_sub(1);
        self.scale.x = ease_toward(self.scale.x, 1.0, SCALE_EASE);
        self.scale.y = ease_toward(self.scale.y, 1.0, SCALE_EASE);
    }

    /// State-machine physics for one tick.
    pub fn step_state<R: Rng + ?Sized>(&mut self, env: &TickEnv, config: &AgentConfig, rng: &mut R) {
        match self.state {
            AgentState::Walk => {
                self.position.x += self.velocity.x;
                self.walk_cycle = (self.walk_cycle + WALK_CYCLE_STEP) % TAU;
                if self.position.x < 0.0 {
                    self.velocity.x = self.velocity.x.abs();
                } else if self.position.x > env.viewport.width {
                    self.velocity.x = -self.velocity.x.abs();
                }
                self.position.y = self.floor_y(env);
            }
            AgentState::Jump => {
                self.velocity.y += env.gravity;
                self.position += self.velocity;
                if self.touches_floor(env) {
                    self.position.y = self.floor_y(env);
                    self.velocity.y = 0.0;
                    self.state = AgentState::Walk;
                }
            }
            AgentState::Dragged => {
                self.position = ease_vec_toward(self.position, env.mouse_world, DRAG_LERP);
                self.velocity = env.mouse_world - self.position;
                self.struggle_cycle = (self.struggle_cycle + STRUGGLE_CYCLE_STEP) % TAU;
            }
            AgentState::Fall => {
                self.velocity.y += env.gravity;
                self.position += self.velocity;
                self.velocity.x *= FALL_FRICTION_X;
                if self.touches_floor(env) {
                    self.position.y = self.floor_y(env);
                    self.velocity = Vec2::ZERO;
                    self.scale = Vec2::new(LAND_SQUASH_X, LAND_SQUASH_Y);
                    self.land_timer = LAND_TICKS;
                    self.state = AgentState::Land;
                    log::debug!("agent landed at x={:.1}", self.position.x);
                }
            }
            AgentState::Land => {
                self.land_timer = self.land_timer.saturating_sub(1);
                if self.land_timer == 0 {
                    self.recover_timer = RECOVER_TICKS;
                    self.state = AgentState::Recover;
                }
            }
            AgentState::Recover => {
                self.recover_timer = self.recover_timer.saturating_sub(1);
                if self.recover_timer == 0 {
                    self.velocity.x = random_signed(rng, config.max_walk_speed);
                    self.state = AgentState::Walk;
                }
            }
        }
    }

    pub fn expression(&self) -> Expression {
        if self.is_smiling() {
            return Expression::Smiling;
        }
        match self.state {
            AgentState::Land => Expression::Dazed,
            AgentState::Dragged | AgentState::Fall => Expression::Startled,
            _ => Expression::Looking {
                offset: if self.velocity.x > 0.0 { 3.0 } else { -3.0 },
            },
        }
    }

    pub fn leg_pose(&self) -> LegPose {
        match self.state {
            AgentState::Walk => LegPose::Swing(self.walk_cycle.sin() * 5.0),
            AgentState::Dragged | AgentState::Jump => LegPose::Splayed,
            _ => LegPose::Standing,
        }
    }

    /// Leg segments (hip, foot) in the agent's local frame.
    pub fn leg_segments(&self) -> [(Vec2, Vec2); 2] {
        let left_hip = Vec2::new(-5.0, 5.0);
        let right_hip = Vec2::new(5.0, 5.0);
        match self.leg_pose() {
            LegPose::Swing(offset) => [
                (left_hip, Vec2::new(-5.0, 15.0 + offset)),
                (right_hip, Vec2::new(5.0, 15.0 - offset)),
            ],
            LegPose::Splayed => {
                let kick = if self.state == AgentState::Dragged {
                    self.struggle_cycle.sin() * 2.0
                } else {
                    0.0
                };
                [
                    (left_hip, Vec2::new(-8.0 - kick, 18.0)),
                    (right_hip, Vec2::new(8.0 + kick, 18.0)),
                ]
            }
            LegPose::Standing => [
                (left_hip, Vec2::new(-5.0, 15.0)),
                (right_hip, Vec2::new(5.0, 15.0)),
            ],
        }
    }

    pub fn body_color(&self) -> Vec4 {
        if self.is_smiling() {
            mix_rgb(self.color, Vec4::ONE, GLOW_MIX)
        } else {
            self.color
        }
    }

    fn draw_face(&self, painter: &mut Painter<'_>) {
        match self.expression() {
            Expression::Smiling => {
                let left = [Vec2::new(-7.0, -4.0), Vec2::new(-4.0, -7.0), Vec2::new(-1.0, -4.0)];
                let right = [Vec2::new(1.0, -4.0), Vec2::new(4.0, -7.0), Vec2::new(7.0, -4.0)];
                painter.polyline(&left, FACE_LINE_WIDTH, LIMB_COLOR);
                painter.polyline(&right, FACE_LINE_WIDTH, LIMB_COLOR);
                painter.stroke_arc(Vec2::new(0.0, 2.0), 5.0, 0.0, PI, FACE_LINE_WIDTH, LIMB_COLOR);
            }
            Expression::Dazed => {
                for corner in [Vec2::new(-6.0, -4.0), Vec2::new(2.0, -4.0)] {
                    painter.line(corner, corner + Vec2::splat(4.0), FACE_LINE_WIDTH, LIMB_COLOR);
                    painter.line(
                        corner + Vec2::new(4.0, 0.0),
                        corner + Vec2::new(0.0, 4.0),
                        FACE_LINE_WIDTH,
                        LIMB_COLOR,
                    );
                }
            }
            Expression::Startled => {
                painter.fill_circle(Vec2::new(-4.0, -2.0), 4.0, LIMB_COLOR);
                painter.fill_circle(Vec2::new(4.0, -2.0), 4.0, LIMB_COLOR);
            }
            Expression::Looking { offset } => {
                painter.fill_circle(Vec2::new(-4.0 + offset, -2.0), 2.0, LIMB_COLOR);
                painter.fill_circle(Vec2::new(4.0 + offset, -2.0), 2.0, LIMB_COLOR);
            }
        }
    }
}

impl Draw for Agent {
    fn draw(&self, painter: &mut Painter<'_>, context: &DrawContext) {
        if !context.viewport.is_row_visible(self.position.y, AGENT_CULL_MARGIN) {
            return;
        }
        painter.save();
        painter.translate(self.screen_position(context.viewport.scroll_y));
        painter.scale(self.scale);

        for (hip, foot) in self.leg_segments() {
            painter.line(hip, foot, LEG_WIDTH, LIMB_COLOR);
        }
        painter.fill_circle(Vec2::ZERO, self.radius, self.body_color());
        self.draw_face(painter);

        painter.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::painter::{DrawCommand, DrawList};
    use crate::viewport::Viewport;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const HEIGHT: f32 = 600.0;

    fn env() -> TickEnv {
        TickEnv {
            viewport: Viewport::new(800.0, HEIGHT),
            mouse_world: Vec2::new(200.0, 100.0),
            gravity: GRAVITY,
            floor_height: FLOOR_HEIGHT,
        }
    }

    fn floor_y() -> f32 {
        HEIGHT - FLOOR_HEIGHT - AGENT_RADIUS
    }

    fn walker(x: f32, vx: f32) -> Agent {
        let mut agent = Agent::new(Vec2::new(x, floor_y()), AGENT_RADIUS, Vec4::X);
        agent.velocity.x = vx;
        agent
    }

    #[test]
    fn walk_pins_to_floor_and_reflects() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = AgentConfig::default();
        let mut agent = walker(799.5, 1.0);
        agent.position.y = 10.0;
        agent.update(&env(), &config, &mut rng);
        assert_eq!(agent.position.y, floor_y());
        assert!(agent.velocity.x < 0.0);
        for _ in 0..10 {
            agent.update(&env(), &config, &mut rng);
            assert_eq!(agent.position.y, floor_y());
        }
    }

    #[test]
    fn dragged_agent_eases_toward_mouse_and_keeps_residual_velocity() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut agent = walker(0.0, 0.0);
        agent.position = Vec2::new(100.0, 100.0);
        agent.begin_drag();
        agent.update(&env(), &AgentConfig::default(), &mut rng);
        assert!((agent.position - Vec2::new(120.0, 100.0)).length() < 1e-4);
        assert!((agent.velocity - Vec2::new(80.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn fall_lands_recovers_and_walks_on_schedule() {
        let mut rng = StdRng::seed_from_u64(3);
        let config = AgentConfig::default();
        let mut agent = walker(300.0, 0.0);
        agent.position.y = 100.0;
        agent.velocity = Vec2::new(2.0, 0.0);
        agent.release();

        let mut guard = 0;
        while agent.state == AgentState::Fall {
            agent.update(&env(), &config, &mut rng);
            guard += 1;
            assert!(guard < 200);
        }
        assert_eq!(agent.state, AgentState::Land);
        assert_eq!(agent.position.y + agent.radius, HEIGHT - FLOOR_HEIGHT);
        assert_eq!(agent.scale, Vec2::new(1.4, 0.6));
        assert_eq!(agent.land_timer, 20);
        assert_eq!(agent.velocity, Vec2::ZERO);
        assert_eq!(agent.expression(), Expression::Dazed);

        for tick in 1..=20 {
            agent.update(&env(), &config, &mut rng);
            let expected = if tick < 20 { AgentState::Land } else { AgentState::Recover };
            assert_eq!(agent.state, expected, "tick {tick}");
        }
        assert_eq!(agent.recover_timer, 60);
        for tick in 1..=60 {
            agent.update(&env(), &config, &mut rng);
            let expected = if tick < 60 { AgentState::Recover } else { AgentState::Walk };
            assert_eq!(agent.state, expected, "tick {tick}");
        }
        assert!(agent.velocity.x.abs() <= 1.0);
        assert!((agent.scale - Vec2::ONE).length() < 0.01);
    }

    #[test]
    fn jump_rises_then_returns_to_walk() {
        let mut rng = StdRng::seed_from_u64(4);
        let config = AgentConfig::default();
        let mut agent = walker(300.0, 0.5);
        agent.jump(&config);
        assert_eq!(agent.velocity.y, -12.0);
        assert!(agent.is_smiling());

        agent.update(&env(), &config, &mut rng);
        assert!(agent.position.y < floor_y());
        assert_eq!(agent.leg_pose(), LegPose::Splayed);

        let mut guard = 0;
        while agent.state == AgentState::Jump {
            agent.update(&env(), &config, &mut rng);
            guard += 1;
            assert!(guard < 100);
        }
        assert_eq!(agent.state, AgentState::Walk);
        assert_eq!(agent.position.y, floor_y());
        assert_eq!(agent.velocity.y, 0.0);
    }

    #[test]
    fn timers_never_underflow() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut agent = walker(10.0, 0.0);
        agent.state = AgentState::Land;
        agent.land_timer = 0;
        agent.update(&env(), &AgentConfig::default(), &mut rng);
        assert_eq!(agent.state, AgentState::Recover);
        assert_eq!(agent.smile_timer, 0);
    }

    #[test]
    fn expression_follows_state_and_smile() {
        let mut agent = walker(0.0, 1.0);
        assert_eq!(agent.expression(), Expression::Looking { offset: 3.0 });
        agent.velocity.x = -1.0;
        assert_eq!(agent.expression(), Expression::Looking { offset: -3.0 });
        agent.state = AgentState::Fall;
        assert_eq!(agent.expression(), Expression::Startled);
        agent.celebrate(PROFILE_SMILE_TICKS);
        assert_eq!(agent.expression(), Expression::Smiling);
        assert_ne!(agent.body_color(), agent.color);
    }

    #[test]
    fn draw_is_culled_outside_visible_band() {
        let agent = walker(100.0, 0.0);
        let mut list = DrawList::new();
        let far = DrawContext {
            viewport: Viewport::new(800.0, HEIGHT).with_scroll(2000.0),
            accent: Vec4::ONE,
        };
        agent.draw(&mut Painter::new(&mut list), &far);
        assert!(list.is_empty());

        let near = DrawContext {
            viewport: Viewport::new(800.0, HEIGHT),
            accent: Vec4::ONE,
        };
        agent.draw(&mut Painter::new(&mut list), &near);
        // Two legs, body, two eyes.
        assert_eq!(list.len(), 5);
        match &list.commands()[2] {
            DrawCommand::FillEllipse { center, radii, .. } => {
                assert_eq!(*center, Vec2::new(100.0, floor_y()));
                assert_eq!(*radii, Vec2::splat(AGENT_RADIUS));
            }
            other => panic!("expected body, got {other:?}"),
        }
    }
}
