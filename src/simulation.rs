use crate::agent::{Agent, AgentState};
use crate::config::SimulationConfig;
use crate::constants::*;
use crate::entity::{Draw, DrawContext, TickEnv, advance_transients};
use crate::food::{Food, FoodKind};
use crate::painter::{DrawList, Painter};
use crate::particle::{Particle, spawn_burst};
use crate::ripple::Ripple;
use crate::theme::Theme;
use crate::viewport::{Rect, Viewport};
use glam::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;

pub type SimRng = StdRng;

/// The one entity following the pointer, if any. Indices refer to
/// `SimulationState::agents` / `SimulationState::foods`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum DragTarget {
    #[default]
    None,
    Agent(usize),
    Food(usize),
}

impl DragTarget {
    pub fn is_active(self) -> bool {
        self != DragTarget::None
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum CursorStyle {
    #[default]
    Default,
    Grab,
    Grabbing,
}

/// Cosmetic canvas properties written back to the host after each tick.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct HoverState {
    pub cursor: CursorStyle,
    /// When false, pointer events should pass through to the page beneath.
    pub pointer_capture: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PointerOutcome {
    Explosion,
    GrabbedFood(usize),
    GrabbedAgent(usize),
    Splash,
}

/// Decaying page shake triggered by the profile explosion.
#[derive(Debug, Copy, Clone, Default)]
pub struct ScreenShake {
    remaining: u32,
}

impl ScreenShake {
    pub fn start(&mut self, ticks: u32) {
        self.remaining = ticks;
    }

    pub fn advance(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    /// Deterministic jitter that fades out with the remaining ticks.
    pub fn offset(&self) -> Vec2 {
        if !self.is_active() {
            return Vec2::ZERO;
        }
        let t = self.remaining as f32;
        let strength = SHAKE_AMPLITUDE * t / SHAKE_TICKS as f32;
        Vec2::new((t * 2.3).sin(), (t * 3.1).cos()) * strength
    }
}

pub struct SimulationState {
    pub agents: Vec<Agent>,
    pub foods: Vec<Food>,
    pub particles: Vec<Particle>,
    pub ripples: Vec<Ripple>,
    pub config: SimulationConfig,
    rng: SimRng,
    viewport: Viewport,
    theme: Theme,
    profile: Option<Rect>,
    mouse: Vec2,
    ripple_anchor: Vec2,
    drag: DragTarget,
    hover: HoverState,
    shake: ScreenShake,
    is_paused: bool,
    tick: u64,
}

impl SimulationState {
    pub fn new(config: SimulationConfig, viewport: Viewport, theme: Theme) -> Self {
        Self::with_rng(config, viewport, theme, SimRng::from_entropy())
    }

    pub fn with_seed(config: SimulationConfig, viewport: Viewport, theme: Theme, seed: u64) -> Self {
        Self::with_rng(config, viewport, theme, SimRng::seed_from_u64(seed))
    }

    fn with_rng(config: SimulationConfig, viewport: Viewport, theme: Theme, rng: SimRng) -> Self {
        let mut state = Self {
            agents: Vec::with_capacity(config.agent_count),
            foods: Vec::with_capacity(config.food.batch_size),
            particles: Vec::with_capacity(EXPLOSION_PARTICLE_COUNT),
            ripples: Vec::new(),
            config,
            rng,
            viewport,
            theme,
            profile: None,
            mouse: Vec2::ZERO,
            ripple_anchor: Vec2::ZERO,
            drag: DragTarget::None,
            hover: HoverState::default(),
            shake: ScreenShake::default(),
            is_paused: false,
            tick: 0,
        };
        state.initialize_entities();
        state
    }

    fn initialize_entities(&mut self) {
        let env = self.tick_env();
        self.agents.clear();
        for _ in 0..self.config.agent_count {
            self.agents
                .push(Agent::spawn(&mut self.rng, &env, &self.config));
        }
        self.particles.clear();
        self.ripples.clear();
        self.drag = DragTarget::None;
        self.spawn_food();
    }

    fn tick_env(&self) -> TickEnv {
        TickEnv {
            viewport: self.viewport,
            mouse_world: self.viewport.screen_to_world(self.mouse),
            gravity: self.config.gravity,
            floor_height: self.config.floor_height,
        }
    }

    /// Replaces the whole food population with a batch matching the theme.
    pub fn spawn_food(&mut self) {
        let env = self.tick_env();
        self.foods.clear();
        for _ in 0..self.config.food.batch_size {
            let kind = FoodKind::pick(self.theme, self.config.food.star_probability, &mut self.rng);
            self.foods
                .push(Food::spawn(&mut self.rng, kind, &env, &self.config.food));
        }
        if matches!(self.drag, DragTarget::Food(_)) {
            self.drag = DragTarget::None;
        }
        log::info!(
            "Spawned {} food for {} theme",
            self.foods.len(),
            self.theme.attribute()
        );
    }

    // --- Host-facing state ---

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Theme-change notification; a real change respawns the food.
    pub fn set_theme(&mut self, theme: Theme) {
        if theme != self.theme {
            self.theme = theme;
            self.spawn_food();
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        let scroll_y = self.viewport.scroll_y;
        self.viewport = Viewport::new(width, height).with_scroll(scroll_y);
        log::info!("Resized canvas to {:.0}x{:.0}", self.viewport.width, self.viewport.height);
    }

    pub fn set_scroll(&mut self, scroll_y: f32) {
        self.viewport.scroll_y = scroll_y.max(0.0);
    }

    /// Screen-space bounds of the profile picture, `None` when the page has none.
    pub fn set_profile(&mut self, profile: Option<Rect>) {
        self.profile = profile;
    }

    pub fn profile(&self) -> Option<Rect> {
        self.profile
    }

    pub fn mouse(&self) -> Vec2 {
        self.mouse
    }

    pub fn drag_target(&self) -> DragTarget {
        self.drag
    }

    pub fn hover(&self) -> HoverState {
        self.hover
    }

    pub fn shake_offset(&self) -> Vec2 {
        self.shake.offset()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn toggle_pause(&mut self) {
        self.is_paused = !self.is_paused;
        log::info!(
            "Simulation {}",
            if self.is_paused { "Paused" } else { "Resumed" }
        );
    }

    pub fn restart(&mut self) {
        log::info!("Restarting simulation with new seed...");
        self.rng = SimRng::from_entropy();
        self.shake = ScreenShake::default();
        self.is_paused = false;
        self.tick = 0;
        self.initialize_entities();
    }

    // --- Input ---

    pub fn pointer_move(&mut self, position: Vec2) {
        self.mouse = position;
        if position.distance(self.ripple_anchor) > self.config.burst.ripple_spawn_distance {
            self.ripples.push(Ripple::new(position));
            self.ripple_anchor = position;
        }
    }

    pub fn pointer_down(&mut self, position: Vec2) -> PointerOutcome {
        self.mouse = position;
        if self.drag.is_active() {
            self.pointer_up();
        }

        // The profile picture sits above the canvas and swallows its own clicks.
        if self.profile.is_some_and(|rect| rect.contains_in_circle(position)) {
            self.profile_click();
            return PointerOutcome::Explosion;
        }

        let scroll_y = self.viewport.scroll_y;
        let food_radius = self.config.food.hit_radius;
        if let Some(index) = self
            .foods
            .iter()
            .position(|food| food.hit_test(position, scroll_y, food_radius))
        {
            self.drag = DragTarget::Food(index);
            log::debug!("Grabbed food #{index} ({:?})", self.foods[index].kind);
            return PointerOutcome::GrabbedFood(index);
        }

        let agent_radius = self.config.agent_hit_radius();
        if let Some(index) = self
            .agents
            .iter()
            .position(|agent| agent.hit_test(position, scroll_y, agent_radius))
        {
            self.agents[index].begin_drag();
            self.drag = DragTarget::Agent(index);
            return PointerOutcome::GrabbedAgent(index);
        }

        spawn_burst(
            &mut self.particles,
            &mut self.rng,
            position,
            self.config.burst.splash_count,
            &self.config.palette,
            false,
        );
        PointerOutcome::Splash
    }

    pub fn pointer_up(&mut self) {
        match std::mem::take(&mut self.drag) {
            DragTarget::Agent(index) => {
                if let Some(agent) = self.agents.get_mut(index) {
                    agent.release();
                }
            }
            DragTarget::Food(index) => log::debug!("Released food #{index}"),
            DragTarget::None => {}
        }
    }

    /// Explodes the profile picture. Returns false when there is none.
    pub fn profile_click(&mut self) -> bool {
        let Some(rect) = self.profile else {
            return false;
        };
        let center = rect.center();
        spawn_burst(
            &mut self.particles,
            &mut self.rng,
            center,
            self.config.burst.explosion_count,
            &self.config.palette,
            true,
        );
        self.ripples.push(Ripple::amplified(center));
        let smile_ticks = self.config.agent.profile_smile_ticks;
        for agent in &mut self.agents {
            agent.celebrate(smile_ticks);
        }
        if self.config.shake_on_explosion {
            self.shake.start(SHAKE_TICKS);
        }
        log::debug!("Profile explosion at {center:?}");
        true
    }

    // --- Tick ---

    /// Advances every entity by one tick in layer order, then refreshes the
    /// hover state.
    pub fn update(&mut self) {
        if self.is_paused {
            return;
        }
        self.tick += 1;

        advance_transients(&mut self.ripples);

        let env = self.tick_env();
        for (index, food) in self.foods.iter_mut().enumerate() {
            food.update(self.drag == DragTarget::Food(index), &env);
        }

        let agent_config = &self.config.agent;
        for agent in &mut self.agents {
            agent.decay_effects();
            if agent.can_eat() {
                if let DragTarget::Food(index) = self.drag {
                    let within_reach = self
                        .foods
                        .get(index)
                        .is_some_and(|food| agent.position.distance(food.position) < agent_config.eat_distance);
                    if within_reach {
                        let eaten = self.foods.remove(index);
                        self.drag = DragTarget::None;
                        agent.jump(agent_config);
                        log::debug!("Agent ate a {:?}", eaten.kind);
                    }
                }
            }
            agent.step_state(&env, agent_config, &mut self.rng);
        }

        advance_transients(&mut self.particles);

        self.shake.advance();
        self.hover = self.compute_hover();
    }

    fn compute_hover(&self) -> HoverState {
        if self.drag.is_active() {
            return HoverState {
                cursor: CursorStyle::Grabbing,
                pointer_capture: true,
            };
        }
        let scroll_y = self.viewport.scroll_y;
        let radius = self.config.hover_radius;
        let hovering = self
            .agents
            .iter()
            .map(|agent| agent.screen_position(scroll_y))
            .chain(
                self.foods
                    .iter()
                    .map(|food| self.viewport.world_to_screen(food.position)),
            )
            .any(|screen| screen.distance(self.mouse) < radius);
        if hovering {
            HoverState {
                cursor: CursorStyle::Grab,
                pointer_capture: true,
            }
        } else {
            HoverState::default()
        }
    }

    /// Records the frame: ripples, food, agents, particles, then the hole
    /// over the profile picture.
    pub fn render(&self, list: &mut DrawList) {
        let context = DrawContext {
            viewport: self.viewport,
            accent: self.theme.accent(),
        };
        let mut painter = Painter::new(list);
        painter.save();
        painter.translate(self.shake.offset());
        for ripple in &self.ripples {
            ripple.draw(&mut painter, &context);
        }
        for food in &self.foods {
            food.draw(&mut painter, &context);
        }
        for agent in &self.agents {
            agent.draw(&mut painter, &context);
        }
        for particle in &self.particles {
            particle.draw(&mut painter, &context);
        }
        painter.restore();

        if let Some(rect) = self.profile {
            painter.erase_circle(rect.center(), rect.circle_radius());
        }
    }

    /// One frame: `update` followed by `render`.
    pub fn step(&mut self, list: &mut DrawList) {
        self.update();
        list.clear();
        self.render(list);
    }

    pub fn get_state_counts(&self) -> [(AgentState, usize); 6] {
        let mut counts = [
            (AgentState::Walk, 0),
            (AgentState::Dragged, 0),
            (AgentState::Fall, 0),
            (AgentState::Land, 0),
            (AgentState::Recover, 0),
            (AgentState::Jump, 0),
        ];
        for agent in &self.agents {
            if let Some(entry) = counts.iter_mut().find(|(state, _)| *state == agent.state) {
                entry.1 += 1;
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::painter::DrawCommand;

    fn quiet_state(seed: u64) -> SimulationState {
        let mut state = SimulationState::with_seed(
            SimulationConfig::default(),
            Viewport::new(800.0, 600.0),
            Theme::Dark,
            seed,
        );
        state.foods.clear();
        state
    }

    #[test]
    fn starts_with_walkers_and_a_food_batch() {
        let state = SimulationState::with_seed(
            SimulationConfig::default(),
            Viewport::new(800.0, 600.0),
            Theme::Light,
            1,
        );
        assert_eq!(state.agents.len(), INITIAL_AGENT_COUNT);
        assert!(state.agents.iter().all(|a| a.state == AgentState::Walk));
        assert_eq!(state.foods.len(), FOOD_BATCH_SIZE);
        assert!(state.foods.iter().all(|f| f.kind == FoodKind::Cloud));
    }

    #[test]
    fn ripples_spawn_only_past_threshold() {
        let mut state = quiet_state(2);
        state.pointer_move(Vec2::new(3.0, 0.0));
        assert!(state.ripples.is_empty());
        state.pointer_move(Vec2::new(6.0, 0.0));
        assert_eq!(state.ripples.len(), 1);
        state.pointer_move(Vec2::new(9.0, 0.0));
        assert_eq!(state.ripples.len(), 1);
        state.pointer_move(Vec2::new(12.0, 0.0));
        assert_eq!(state.ripples.len(), 2);
    }

    #[test]
    fn theme_change_replaces_food_and_drops_food_drag() {
        let mut state = SimulationState::with_seed(
            SimulationConfig::default(),
            Viewport::new(800.0, 600.0),
            Theme::Light,
            3,
        );
        let food_screen = state.foods[0].position;
        assert_eq!(
            state.pointer_down(food_screen),
            PointerOutcome::GrabbedFood(0)
        );
        state.set_theme(Theme::Dark);
        assert_eq!(state.drag_target(), DragTarget::None);
        assert_eq!(state.foods.len(), FOOD_BATCH_SIZE);
        assert!(state.foods.iter().all(|f| f.kind != FoodKind::Cloud));

        // Same theme again is not a change.
        let before: Vec<Vec2> = state.foods.iter().map(|f| f.position).collect();
        state.set_theme(Theme::Dark);
        let after: Vec<Vec2> = state.foods.iter().map(|f| f.position).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn hover_reports_grab_near_agents_and_grabbing_while_dragging() {
        let mut state = quiet_state(4);
        state.pointer_move(Vec2::new(-500.0, -500.0));
        state.update();
        assert_eq!(state.hover(), HoverState::default());

        let agent_pos = state.agents[0].screen_position(0.0);
        state.pointer_move(agent_pos + Vec2::new(5.0, 0.0));
        state.agents.iter_mut().for_each(|a| a.velocity.x = 0.0);
        state.update();
        assert_eq!(state.hover().cursor, CursorStyle::Grab);
        assert!(state.hover().pointer_capture);

        state.pointer_down(agent_pos);
        state.update();
        assert_eq!(state.hover().cursor, CursorStyle::Grabbing);
        assert!(state.hover().pointer_capture);
    }

    #[test]
    fn grabbing_again_releases_previous_agent() {
        let mut state = quiet_state(5);
        for (i, agent) in state.agents.iter_mut().enumerate() {
            agent.position.x = 50.0 + i as f32 * 90.0;
        }
        let first = state.agents[0].screen_position(0.0);
        let second = state.agents[1].screen_position(0.0);
        state.pointer_down(first);
        assert_eq!(state.pointer_down(second), PointerOutcome::GrabbedAgent(1));
        assert_eq!(state.agents[0].state, AgentState::Fall);
        assert_eq!(state.agents[1].state, AgentState::Dragged);
    }

    #[test]
    fn pause_freezes_ticks() {
        let mut state = quiet_state(6);
        state.toggle_pause();
        let before: Vec<Vec2> = state.agents.iter().map(|a| a.position).collect();
        state.update();
        assert_eq!(state.tick_count(), 0);
        let after: Vec<Vec2> = state.agents.iter().map(|a| a.position).collect();
        assert_eq!(before, after);
        state.toggle_pause();
        state.update();
        assert_eq!(state.tick_count(), 1);
    }

    #[test]
    fn render_ends_with_profile_hole() {
        let mut state = quiet_state(7);
        state.set_profile(Some(Rect::new(300.0, 100.0, 200.0, 200.0)));
        state.pointer_down(Vec2::new(50.0, 50.0));
        let mut list = DrawList::new();
        state.step(&mut list);
        match list.commands().last() {
            Some(DrawCommand::EraseCircle { center, radius }) => {
                assert_eq!(*center, Vec2::new(400.0, 200.0));
                assert_eq!(*radius, 100.0);
            }
            other => panic!("expected erase last, got {other:?}"),
        }

        state.set_profile(None);
        state.step(&mut list);
        assert!(
            !list
                .commands()
                .iter()
                .any(|c| matches!(c, DrawCommand::EraseCircle { .. }))
        );
    }

    #[test]
    fn shake_fades_out() {
        let mut shake = ScreenShake::default();
        assert_eq!(shake.offset(), Vec2::ZERO);
        shake.start(SHAKE_TICKS);
        assert!(shake.offset().length() <= SHAKE_AMPLITUDE * 1.5);
        for _ in 0..SHAKE_TICKS {
            shake.advance();
        }
        assert!(!shake.is_active());
        assert_eq!(shake.offset(), Vec2::ZERO);
    }

    #[test]
    fn missing_profile_disables_explosion() {
        let mut state = quiet_state(8);
        assert!(!state.profile_click());
        assert!(state.particles.is_empty());
    }

    #[test]
    fn state_counts_cover_every_agent() {
        let state = quiet_state(9);
        let total: usize = state.get_state_counts().iter().map(|(_, n)| n).sum();
        assert_eq!(total, state.agents.len());
    }
}
