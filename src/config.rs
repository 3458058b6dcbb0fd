use crate::constants::*;
use crate::utils::rgb;
use glam::Vec4;

// Splash / agent palette (indigo, violet, purple, cyan, pink, orange).
pub const DEFAULT_PALETTE: [Vec4; 6] = [
    rgb(0x6366f1),
    rgb(0x8b5cf6),
    rgb(0xa855f7),
    rgb(0x06b6d4),
    rgb(0xec4899),
    rgb(0xf97316),
];

#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub radius: f32,
    // Grab radius is `radius * hit_radius_factor`, larger than the body.
    pub hit_radius_factor: f32,
    pub max_walk_speed: f32,
    pub eat_distance: f32,
    pub jump_velocity: f32,
    pub jump_smile_ticks: u32,
    pub profile_smile_ticks: u32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            radius: AGENT_RADIUS,
            hit_radius_factor: AGENT_HIT_RADIUS_FACTOR,
            max_walk_speed: AGENT_MAX_WALK_SPEED,
            eat_distance: EAT_DISTANCE,
            jump_velocity: JUMP_VELOCITY,
            jump_smile_ticks: JUMP_SMILE_TICKS,
            profile_smile_ticks: PROFILE_SMILE_TICKS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FoodConfig {
    pub batch_size: usize,
    pub radius: f32,
    pub hit_radius: f32,
    pub max_drift: f32,
    pub star_probability: f64,
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self {
            batch_size: FOOD_BATCH_SIZE,
            radius: FOOD_RADIUS,
            hit_radius: FOOD_HIT_RADIUS,
            max_drift: FOOD_MAX_DRIFT,
            star_probability: STAR_PROBABILITY,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BurstConfig {
    pub splash_count: usize,
    pub explosion_count: usize,
    pub ripple_spawn_distance: f32,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            splash_count: SPLASH_PARTICLE_COUNT,
            explosion_count: EXPLOSION_PARTICLE_COUNT,
            ripple_spawn_distance: RIPPLE_SPAWN_DISTANCE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub agent_count: usize,
    pub gravity: f32,
    pub floor_height: f32,
    pub hover_radius: f32,
    pub shake_on_explosion: bool,
    pub palette: Vec<Vec4>,
    pub agent: AgentConfig,
    pub food: FoodConfig,
    pub burst: BurstConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            agent_count: INITIAL_AGENT_COUNT,
            gravity: GRAVITY,
            floor_height: FLOOR_HEIGHT,
            hover_radius: HOVER_RADIUS,
            shake_on_explosion: true,
            palette: DEFAULT_PALETTE.to_vec(),
            agent: AgentConfig::default(),
            food: FoodConfig::default(),
            burst: BurstConfig::default(),
        }
    }
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn agent_hit_radius(&self) -> f32 {
        self.agent.radius * self.agent.hit_radius_factor
    }
}
