// --- Global Simulation Constants ---
// Motion constants are per tick and tuned for a ~60 Hz tick rate.

pub const WINDOW_WIDTH: u32 = 1280;
pub const WINDOW_HEIGHT: u32 = 800;
// Virtual page height in viewports; the mouse wheel scrolls through it.
pub const PAGE_HEIGHT_VIEWPORTS: f32 = 3.0;
pub const SCROLL_LINE_PIXELS: f32 = 48.0;

pub const FIXED_TIMESTEP: f64 = 1.0 / 60.0;
pub const MAX_TICKS_PER_FRAME: u32 = 5;
pub const FPS_UPDATE_INTERVAL_SECS: f64 = 1.0;

// --- World ---
pub const INITIAL_AGENT_COUNT: usize = 8;
pub const GRAVITY: f32 = 0.5;
pub const FLOOR_HEIGHT: f32 = 50.0;

// --- Agent ---
pub const AGENT_RADIUS: f32 = 15.0;
pub const AGENT_HIT_RADIUS_FACTOR: f32 = 2.5;
pub const AGENT_MAX_WALK_SPEED: f32 = 1.0;
pub const WALK_CYCLE_STEP: f32 = 0.2;
pub const STRUGGLE_CYCLE_STEP: f32 = 0.8;
pub const DRAG_LERP: f32 = 0.2;
pub const FALL_FRICTION_X: f32 = 0.99;
pub const LAND_TICKS: u32 = 20;
pub const RECOVER_TICKS: u32 = 60;
pub const LAND_SQUASH_X: f32 = 1.4;
pub const LAND_SQUASH_Y: f32 = 0.6;
pub const SCALE_EASE: f32 = 0.1;
pub const EAT_DISTANCE: f32 = 50.0;
pub const JUMP_VELOCITY: f32 = -12.0;
pub const JUMP_SMILE_TICKS: u32 = 60;
pub const PROFILE_SMILE_TICKS: u32 = 90;
pub const AGENT_CULL_MARGIN: f32 = 50.0;
// How far a smiling agent's body colour is pushed toward white.
pub const GLOW_MIX: f32 = 0.35;

// --- Food ---
pub const FOOD_BATCH_SIZE: usize = 6;
pub const FOOD_RADIUS: f32 = 20.0;
pub const FOOD_HIT_RADIUS: f32 = 40.0;
pub const FOOD_MAX_DRIFT: f32 = 0.25;
pub const FOOD_DRAG_LERP: f32 = 0.3;
pub const FOOD_SPAWN_MARGIN_X: f32 = 50.0;
// Food bounces off this distance above the viewport bottom.
pub const FOOD_BOTTOM_MARGIN: f32 = 100.0;
pub const FOOD_CULL_MARGIN: f32 = 100.0;
pub const STAR_PROBABILITY: f64 = 0.7;

// --- Particle ---
pub const SPLASH_PARTICLE_COUNT: usize = 15;
pub const EXPLOSION_PARTICLE_COUNT: usize = 200;
pub const PARTICLE_GRAVITY: f32 = 0.1;
pub const PARTICLE_FRICTION: f32 = 0.95;
pub const PARTICLE_MIN_SIZE: f32 = 2.0;
pub const PARTICLE_SIZE_SPREAD: f32 = 5.0;
pub const PARTICLE_MAX_SPEED: f32 = 3.0;
pub const PARTICLE_MIN_DECAY: f32 = 0.01;
pub const PARTICLE_DECAY_SPREAD: f32 = 0.02;
pub const AMPLIFIED_SIZE_MULTIPLIER: f32 = 2.5;
pub const AMPLIFIED_SPEED_MULTIPLIER: f32 = 3.0;

// --- Ripple ---
pub const RIPPLE_SPAWN_DISTANCE: f32 = 5.0;
pub const RIPPLE_START_RADIUS: f32 = 15.0;
pub const RIPPLE_MAX_RADIUS: f32 = 50.0;
pub const RIPPLE_SPEED: f32 = 1.0;
pub const RIPPLE_FADE_STEP: f32 = 0.02;
pub const RIPPLE_OPACITY: f32 = 0.4;
pub const RIPPLE_LINE_WIDTH: f32 = 2.0;

// --- Hover / shake ---
pub const HOVER_RADIUS: f32 = 30.0;
pub const SHAKE_TICKS: u32 = 30;
pub const SHAKE_AMPLITUDE: f32 = 6.0;
