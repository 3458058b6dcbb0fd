//! Immediate-mode 2D drawing recorded into a [`DrawList`].
//!
//! Entities draw in their own local frame through a [`Painter`], which keeps a
//! canvas-style save/restore stack of translation, scale and global alpha and
//! bakes that state into screen-space [`DrawCommand`]s. The renderer turns the
//! list into triangles; tests inspect it directly.

use glam::{Vec2, Vec4};
use std::f32::consts::{PI, TAU};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillEllipse {
        center: Vec2,
        radii: Vec2,
        color: Vec4,
    },
    StrokeEllipse {
        center: Vec2,
        radii: Vec2,
        width: f32,
        color: Vec4,
    },
    StrokePolyline {
        points: Vec<Vec2>,
        width: f32,
        color: Vec4,
    },
    FillPolygon {
        points: Vec<Vec2>,
        color: Vec4,
    },
    /// Clears everything painted so far inside the circle (destination-out).
    EraseCircle { center: Vec2, radius: f32 },
}

#[derive(Debug, Default, Clone)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct PaintState {
    offset: Vec2,
    scale: Vec2,
    alpha: f32,
}

impl Default for PaintState {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: Vec2::ONE,
            alpha: 1.0,
        }
    }
}

pub struct Painter<'a> {
    list: &'a mut DrawList,
    state: PaintState,
    stack: Vec<PaintState>,
}

impl<'a> Painter<'a> {
    pub fn new(list: &'a mut DrawList) -> Self {
        Self {
            list,
            state: PaintState::default(),
            stack: Vec::new(),
        }
    }

    pub fn save(&mut self) {
        self.stack.push(self.state);
    }

    /// Unbalanced restores are ignored.
    pub fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.state.offset += self.state.scale * delta;
    }

    pub fn scale(&mut self, factor: Vec2) {
        self.state.scale *= factor;
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.state.alpha = alpha.clamp(0.0, 1.0);
    }

    #[inline]
    pub fn transform_point(&self, point: Vec2) -> Vec2 {
        self.state.offset + self.state.scale * point
    }

    fn stroke_width(&self, width: f32) -> f32 {
        width * (self.state.scale.x.abs() + self.state.scale.y.abs()) * 0.5
    }

    fn tint(&self, color: Vec4) -> Vec4 {
        Vec4::new(color.x, color.y, color.z, color.w * self.state.alpha)
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Vec4) {
        let command = DrawCommand::FillEllipse {
            center: self.transform_point(center),
            radii: (self.state.scale * radius).abs(),
            color: self.tint(color),
        };
        self.list.push(command);
    }

    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Vec4) {
        let command = DrawCommand::StrokeEllipse {
            center: self.transform_point(center),
            radii: (self.state.scale * radius).abs(),
            width: self.stroke_width(width),
            color: self.tint(color),
        };
        self.list.push(command);
    }

    pub fn polyline(&mut self, points: &[Vec2], width: f32, color: Vec4) {
        if points.len() < 2 {
            return;
        }
        let command = DrawCommand::StrokePolyline {
            points: points.iter().map(|&p| self.transform_point(p)).collect(),
            width: self.stroke_width(width),
            color: self.tint(color),
        };
        self.list.push(command);
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Vec4) {
        self.polyline(&[from, to], width, color);
    }

    /// Strokes an arc running clockwise on screen (increasing angle, y down).
    pub fn stroke_arc(
        &mut self,
        center: Vec2,
        radius: f32,
        start: f32,
        end: f32,
        width: f32,
        color: Vec4,
    ) {
        let points = arc_points(center, radius, start, end);
        self.polyline(&points, width, color);
    }

    pub fn fill_polygon(&mut self, points: &[Vec2], color: Vec4) {
        if points.len() < 3 {
            return;
        }
        let command = DrawCommand::FillPolygon {
            points: points.iter().map(|&p| self.transform_point(p)).collect(),
            color: self.tint(color),
        };
        self.list.push(command);
    }

    pub fn erase_circle(&mut self, center: Vec2, radius: f32) {
        let scale = (self.state.scale.x.abs() + self.state.scale.y.abs()) * 0.5;
        let command = DrawCommand::EraseCircle {
            center: self.transform_point(center),
            radius: radius * scale,
        };
        self.list.push(command);
    }
}

// --- Path helpers ---

pub fn arc_points(center: Vec2, radius: f32, start: f32, end: f32) -> Vec<Vec2> {
    let sweep = end - start;
    let segments = ((sweep.abs() / TAU) * 32.0).ceil().max(4.0) as usize;
    (0..=segments)
        .map(|i| {
            let angle = start + sweep * (i as f32 / segments as f32);
            center + Vec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

pub fn cubic_bezier_points(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, segments: usize) -> Vec<Vec2> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| {
            let t = i as f32 / segments as f32;
            let u = 1.0 - t;
            p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
        })
        .collect()
}

/// Outline of a star with `spikes` points, first spike pointing straight up.
pub fn star_points(center: Vec2, spikes: usize, outer_radius: f32, inner_radius: f32) -> Vec<Vec2> {
    let step = PI / spikes as f32;
    let mut rotation = PI * 1.5;
    let mut points = Vec::with_capacity(spikes * 2);
    for _ in 0..spikes {
        points.push(center + Vec2::new(rotation.cos(), rotation.sin()) * outer_radius);
        rotation += step;
        points.push(center + Vec2::new(rotation.cos(), rotation.sin()) * inner_radius);
        rotation += step;
    }
    points
}
