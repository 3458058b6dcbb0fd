use glam::Vec2;
use hero_canvas::agent::AgentState;
use hero_canvas::constants::*;
use hero_canvas::page::Page;
use hero_canvas::painter::DrawList;
use hero_canvas::renderer::Renderer;
use hero_canvas::scheduler::FrameClock;
use hero_canvas::tessellate::Mesh;
use hero_canvas::{CursorStyle, SimulationConfig, SimulationState, Theme, Viewport};
use std::{sync::Arc, time::Instant};
use winit::{
    dpi::PhysicalSize,
    event::{ElementState, Event, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorIcon, Window, WindowBuilder},
};

// Stands in for the page's `data-theme` attribute.
const THEME_ENV_VAR: &str = "HERO_CANVAS_THEME";

fn cursor_icon(style: CursorStyle) -> CursorIcon {
    match style {
        CursorStyle::Default => CursorIcon::Default,
        CursorStyle::Grab => CursorIcon::Grab,
        CursorStyle::Grabbing => CursorIcon::Grabbing,
    }
}

fn apply_resize(
    size: PhysicalSize<u32>,
    renderer: &mut Renderer<'_>,
    page: &mut Page,
    simulation: &mut SimulationState,
) {
    renderer.resize(size);
    page.resize(size.width as f32, size.height as f32);
    simulation.resize(size.width as f32, size.height as f32);
    simulation.set_scroll(page.scroll_y());
}

fn window_title(simulation: &SimulationState, fps: f64) -> String {
    let counts = simulation.get_state_counts();
    let walking = counts
        .iter()
        .find(|(state, _)| *state == AgentState::Walk)
        .map_or(0, |(_, n)| *n);
    let paused_text = if simulation.is_paused() { " [PAUSED]" } else { "" };
    format!(
        "Hero Canvas - {} theme - Walking: {}/{} - Food: {} - Particles: {} - FPS: {:.1}{}",
        simulation.theme().attribute(),
        walking,
        simulation.agents.len(),
        simulation.foods.len(),
        simulation.particles.len(),
        fps,
        paused_text
    )
}

// --- Main Function ---
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let event_loop = EventLoop::new()?;
    let window: Arc<Window> = Arc::new(
        WindowBuilder::new()
            .with_title("Hero Canvas")
            .with_inner_size(PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
            .build(&event_loop)?,
    );
    let mut renderer = pollster::block_on(Renderer::new(window.clone()))?;

    let width = renderer.size.width as f32;
    let height = renderer.size.height as f32;
    let theme = Theme::from_attribute(std::env::var(THEME_ENV_VAR).ok().as_deref());
    let mut page = Page::new(width, height);
    let mut simulation =
        SimulationState::new(SimulationConfig::new(), Viewport::new(width, height), theme);
    log::info!(
        "Started with {} agents in {} theme",
        simulation.agents.len(),
        theme.attribute()
    );

    let mut clock = FrameClock::new(Instant::now());
    let mut draw_list = DrawList::new();
    let mut mesh = Mesh::default();
    let mut current_cursor = CursorStyle::Default;
    let mut last_fps_update_time = Instant::now();
    let mut frames_since_last_fps_update = 0u32;

    event_loop.run(move |event, elwt: &EventLoopWindowTarget<()>| {
        elwt.set_control_flow(ControlFlow::Poll);
        match event {
            Event::AboutToWait => {
                let now = Instant::now();
                if simulation.is_paused() {
                    clock.reset(now);
                } else {
                    for _ in 0..clock.advance(now) {
                        simulation.update();
                    }
                }
                simulation.set_profile(Some(page.profile_screen_rect(simulation.shake_offset())));

                let hover = simulation.hover();
                if hover.cursor != current_cursor {
                    current_cursor = hover.cursor;
                    window.set_cursor_icon(cursor_icon(current_cursor));
                    // Click-through would need set_cursor_hittest(false), which also stops our own pointer events.
                    log::trace!("cursor {:?}, capture {}", hover.cursor, hover.pointer_capture);
                }
                window.request_redraw();
            }
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::Resized(physical_size) => {
                    apply_resize(physical_size, &mut renderer, &mut page, &mut simulation);
                }
                WindowEvent::ScaleFactorChanged { .. } => {
                    let new_inner_size = window.inner_size();
                    apply_resize(new_inner_size, &mut renderer, &mut page, &mut simulation);
                }
                WindowEvent::CursorMoved { position, .. } => {
                    simulation.pointer_move(Vec2::new(position.x as f32, position.y as f32));
                }
                WindowEvent::MouseInput {
                    state,
                    button: MouseButton::Left,
                    ..
                } => match state {
                    ElementState::Pressed => {
                        let outcome = simulation.pointer_down(simulation.mouse());
                        log::debug!("pointer down: {outcome:?}");
                    }
                    ElementState::Released => simulation.pointer_up(),
                },
                WindowEvent::MouseWheel { delta, .. } => {
                    let dy = match delta {
                        MouseScrollDelta::LineDelta(_, y) => -y * SCROLL_LINE_PIXELS,
                        MouseScrollDelta::PixelDelta(position) => -position.y as f32,
                    };
                    simulation.set_scroll(page.scroll_by(dy));
                }
                WindowEvent::KeyboardInput {
                    event: key_event, ..
                } => {
                    if key_event.state == ElementState::Pressed && !key_event.repeat {
                        match key_event.physical_key {
                            PhysicalKey::Code(KeyCode::KeyT) => {
                                let theme = simulation.theme().toggled();
                                simulation.set_theme(theme);
                            }
                            PhysicalKey::Code(KeyCode::Space) => simulation.toggle_pause(),
                            PhysicalKey::Code(KeyCode::KeyR) => simulation.restart(),
                            PhysicalKey::Code(KeyCode::Escape) => elwt.exit(),
                            _ => {}
                        }
                    }
                }
                WindowEvent::RedrawRequested => {
                    frames_since_last_fps_update += 1;
                    let now = Instant::now();
                    let elapsed_secs = now.duration_since(last_fps_update_time).as_secs_f64();
                    if elapsed_secs >= FPS_UPDATE_INTERVAL_SECS {
                        let current_fps = frames_since_last_fps_update as f64 / elapsed_secs;
                        last_fps_update_time = now;
                        frames_since_last_fps_update = 0;
                        window.set_title(&window_title(&simulation, current_fps));
                    }

                    draw_list.clear();
                    simulation.render(&mut draw_list);
                    if let Some(profile) = simulation.profile() {
                        page.draw_profile(&mut draw_list, profile, simulation.theme());
                    }
                    mesh.build(&draw_list);

                    match renderer.render(&mesh, simulation.theme().background()) {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            renderer.reconfigure()
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("WGPU Error: OutOfMemory");
                            elwt.exit();
                        }
                        Err(e) => log::warn!("WGPU Error: {:?}", e),
                    }
                }
                _ => {}
            },
            _ => {}
        }
    })?;
    Ok(())
}
