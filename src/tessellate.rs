//! Turns a [`DrawList`] into triangle lists the GPU can blend in order.

use crate::painter::{DrawCommand, DrawList};
use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec4};
use std::f32::consts::TAU;
use std::ops::Range;

// This struct MUST match the vertex layout in shader.wgsl.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2], // Screen pixels, y down
    pub color: [f32; 4],
}

impl Vertex {
    fn new(position: Vec2, color: Vec4) -> Self {
        Self {
            position: position.into(),
            color: color.into(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BlendMode {
    /// Regular source-over painting.
    Paint,
    /// Destination-out: clears what is underneath.
    Erase,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub blend: BlendMode,
    pub vertices: Range<u32>,
}

#[derive(Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub batches: Vec<Batch>,
}

impl Mesh {
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.batches.clear();
    }

    pub fn build(&mut self, list: &DrawList) {
        self.clear();
        for command in list.commands() {
            let start = self.vertices.len() as u32;
            let blend = match command {
                DrawCommand::EraseCircle { .. } => BlendMode::Erase,
                _ => BlendMode::Paint,
            };
            self.tessellate(command);
            let end = self.vertices.len() as u32;
            if end == start {
                continue;
            }
            match self.batches.last_mut() {
                Some(batch) if batch.blend == blend && batch.vertices.end == start => {
                    batch.vertices.end = end;
                }
                _ => self.batches.push(Batch {
                    blend,
                    vertices: start..end,
                }),
            }
        }
    }

    fn tessellate(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::FillEllipse {
                center,
                radii,
                color,
            } => self.fill_ellipse(*center, *radii, *color),
            DrawCommand::StrokeEllipse {
                center,
                radii,
                width,
                color,
            } => self.stroke_ellipse(*center, *radii, *width, *color),
            DrawCommand::StrokePolyline {
                points,
                width,
                color,
            } => self.stroke_polyline(points, *width, *color),
            DrawCommand::FillPolygon { points, color } => self.fill_polygon(points, *color),
            DrawCommand::EraseCircle { center, radius } => {
                self.fill_ellipse(*center, Vec2::splat(*radius), Vec4::ONE)
            }
        }
    }

    fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Vec4) {
        self.vertices.extend([
            Vertex::new(a, color),
            Vertex::new(b, color),
            Vertex::new(c, color),
        ]);
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Vec4) {
        if radii.x <= 0.0 || radii.y <= 0.0 || color.w <= 0.0 {
            return;
        }
        let segments = segment_count(radii.max_element());
        let mut previous = center + Vec2::new(radii.x, 0.0);
        for i in 1..=segments {
            let angle = TAU * i as f32 / segments as f32;
            let next = center + Vec2::new(angle.cos(), angle.sin()) * radii;
            self.triangle(center, previous, next, color);
            previous = next;
        }
    }

    fn stroke_ellipse(&mut self, center: Vec2, radii: Vec2, width: f32, color: Vec4) {
        if width <= 0.0 || color.w <= 0.0 {
            return;
        }
        let half = width * 0.5;
        let inner_radii = (radii - Vec2::splat(half)).max(Vec2::ZERO);
        let outer_radii = radii + Vec2::splat(half);
        let segments = segment_count(outer_radii.max_element());
        for i in 0..segments {
            let a0 = TAU * i as f32 / segments as f32;
            let a1 = TAU * (i + 1) as f32 / segments as f32;
            let d0 = Vec2::new(a0.cos(), a0.sin());
            let d1 = Vec2::new(a1.cos(), a1.sin());
            let (i0, i1) = (center + d0 * inner_radii, center + d1 * inner_radii);
            let (o0, o1) = (center + d0 * outer_radii, center + d1 * outer_radii);
            self.triangle(i0, o0, o1, color);
            self.triangle(i0, o1, i1, color);
        }
    }

    fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: Vec4) {
        if width <= 0.0 || color.w <= 0.0 {
            return;
        }
        let half = width * 0.5;
        for pair in points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let Some(direction) = (b - a).try_normalize() else {
                continue;
            };
            let normal = direction.perp() * half;
            self.triangle(a + normal, b + normal, b - normal, color);
            self.triangle(a + normal, b - normal, a - normal, color);
        }
        // Round caps and joins.
        for &point in points {
            self.fill_ellipse(point, Vec2::splat(half), color);
        }
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Vec4) {
        if color.w <= 0.0 {
            return;
        }
        for [a, b, c] in triangulate(points) {
            self.triangle(points[a], points[b], points[c], color);
        }
    }
}

fn segment_count(radius: f32) -> usize {
    ((radius * 0.75).ceil() as usize).clamp(12, 64)
}

fn signed_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    (0..n)
        .map(|i| points[i].perp_dot(points[(i + 1) % n]))
        .sum::<f32>()
        * 0.5
}

fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let d1 = (b - a).perp_dot(p - a);
    let d2 = (c - b).perp_dot(p - b);
    let d3 = (a - c).perp_dot(p - c);
    d1 >= 0.0 && d2 >= 0.0 && d3 >= 0.0
}

/// Ear-clipping triangulation of a simple polygon. Returns index triples into
/// `points`; degenerate input falls back to a fan over what is left.
pub fn triangulate(points: &[Vec2]) -> Vec<[usize; 3]> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }
    let mut remaining: Vec<usize> = (0..n).collect();
    if signed_area(points) < 0.0 {
        remaining.reverse();
    }

    let mut triangles = Vec::with_capacity(n - 2);
    let mut cursor = 0;
    let mut misses = 0;
    while remaining.len() > 3 {
        let m = remaining.len();
        if misses >= m {
            break;
        }
        let prev = remaining[(cursor + m - 1) % m];
        let curr = remaining[cursor % m];
        let next = remaining[(cursor + 1) % m];
        let (a, b, c) = (points[prev], points[curr], points[next]);
        let convex = (b - a).perp_dot(c - b) > f32::EPSILON;
        let is_ear = convex
            && remaining
                .iter()
                .filter(|&&i| i != prev && i != curr && i != next)
                .all(|&i| !point_in_triangle(points[i], a, b, c));
        if is_ear {
            triangles.push([prev, curr, next]);
            remaining.remove(cursor % m);
            cursor %= remaining.len();
            misses = 0;
        } else {
            cursor = (cursor + 1) % m;
            misses += 1;
        }
    }

    for i in 1..remaining.len().saturating_sub(1) {
        triangles.push([remaining[0], remaining[i], remaining[i + 1]]);
    }
    triangles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::painter::{Painter, star_points};

    fn triangle_area(points: &[Vec2], [a, b, c]: [usize; 3]) -> f32 {
        ((points[b] - points[a]).perp_dot(points[c] - points[a]) * 0.5).abs()
    }

    #[test]
    fn square_splits_into_two_triangles() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        let triangles = triangulate(&square);
        assert_eq!(triangles.len(), 2);
        let area: f32 = triangles.iter().map(|&t| triangle_area(&square, t)).sum();
        assert!((area - 100.0).abs() < 1e-3);
    }

    #[test]
    fn star_is_covered_exactly() {
        let star = star_points(Vec2::ZERO, 5, 20.0, 10.0);
        let triangles = triangulate(&star);
        assert_eq!(triangles.len(), star.len() - 2);
        let area: f32 = triangles.iter().map(|&t| triangle_area(&star, t)).sum();
        assert!((area - signed_area(&star).abs()).abs() < 1e-2);
    }

    #[test]
    fn batches_split_on_blend_change() {
        let mut list = DrawList::new();
        {
            let mut painter = Painter::new(&mut list);
            painter.fill_circle(Vec2::new(10.0, 10.0), 5.0, Vec4::ONE);
            painter.line(Vec2::ZERO, Vec2::new(10.0, 0.0), 2.0, Vec4::ONE);
            painter.erase_circle(Vec2::new(50.0, 50.0), 20.0);
        }
        let mut mesh = Mesh::default();
        mesh.build(&list);
        assert_eq!(mesh.batches.len(), 2);
        assert_eq!(mesh.batches[0].blend, BlendMode::Paint);
        assert_eq!(mesh.batches[1].blend, BlendMode::Erase);
        assert_eq!(mesh.batches[1].vertices.end as usize, mesh.vertices.len());
        assert_eq!(mesh.vertices.len() % 3, 0);
    }

    #[test]
    fn invisible_shapes_emit_nothing() {
        let mut list = DrawList::new();
        {
            let mut painter = Painter::new(&mut list);
            painter.set_alpha(0.0);
            painter.fill_circle(Vec2::ZERO, 5.0, Vec4::ONE);
        }
        let mut mesh = Mesh::default();
        mesh.build(&list);
        assert!(mesh.vertices.is_empty());
        assert!(mesh.batches.is_empty());
    }
}
