//! Decorative hero canvas: walking agents that can be grabbed, thrown and fed
//! drifting sky food, pointer ripples, particle splashes and a hole punched
//! around the profile picture.

pub mod agent;
pub mod config;
pub mod constants;
pub mod entity;
pub mod food;
pub mod page;
pub mod painter;
pub mod particle;
pub mod renderer;
pub mod ripple;
pub mod scheduler;
pub mod simulation;
pub mod tessellate;
pub mod theme;
pub mod utils;
pub mod viewport;

pub use config::SimulationConfig;
pub use simulation::{CursorStyle, DragTarget, HoverState, PointerOutcome, SimulationState};
pub use theme::Theme;
pub use viewport::{Rect, Viewport};
