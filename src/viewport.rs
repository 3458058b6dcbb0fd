use glam::Vec2;

/// Visible window onto the page. `scroll_y` converts between world
/// coordinates (page space) and screen coordinates (window space).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub scroll_y: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
            scroll_y: 0.0,
        }
    }

    pub fn with_scroll(mut self, scroll_y: f32) -> Self {
        self.scroll_y = scroll_y;
        self
    }

    #[inline]
    pub fn screen_to_world(&self, point: Vec2) -> Vec2 {
        Vec2::new(point.x, point.y + self.scroll_y)
    }

    #[inline]
    pub fn world_to_screen(&self, point: Vec2) -> Vec2 {
        Vec2::new(point.x, point.y - self.scroll_y)
    }

    /// Whether a world-space `y` lands within `margin` of the visible band.
    pub fn is_row_visible(&self, world_y: f32, margin: f32) -> bool {
        let screen_y = world_y - self.scroll_y;
        screen_y >= -margin && screen_y <= self.height + margin
    }
}

/// Axis-aligned rectangle in screen space (a DOM bounding box).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_center(center: Vec2, size: f32) -> Self {
        Self::new(center.x - size * 0.5, center.y - size * 0.5, size, size)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Radius of the inscribed circle used for the profile picture.
    pub fn circle_radius(&self) -> f32 {
        self.width * 0.5
    }

    pub fn contains_in_circle(&self, point: Vec2) -> bool {
        point.distance(self.center()) <= self.circle_radius()
    }

    pub fn translated(&self, offset: Vec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_conversion_is_symmetric() {
        let viewport = Viewport::new(800.0, 600.0).with_scroll(250.0);
        let screen = Vec2::new(10.0, 20.0);
        let world = viewport.screen_to_world(screen);
        assert_eq!(world, Vec2::new(10.0, 270.0));
        assert_eq!(viewport.world_to_screen(world), screen);
    }

    #[test]
    fn visibility_respects_margin() {
        let viewport = Viewport::new(800.0, 600.0).with_scroll(1000.0);
        assert!(viewport.is_row_visible(1000.0, 0.0));
        assert!(viewport.is_row_visible(960.0, 50.0));
        assert!(!viewport.is_row_visible(900.0, 50.0));
        assert!(!viewport.is_row_visible(1700.0, 50.0));
    }

    #[test]
    fn circle_hit_uses_inscribed_radius() {
        let rect = Rect::new(100.0, 100.0, 200.0, 200.0);
        assert_eq!(rect.center(), Vec2::new(200.0, 200.0));
        assert!(rect.contains_in_circle(Vec2::new(200.0, 110.0)));
        // Corner of the box is outside the circle.
        assert!(!rect.contains_in_circle(Vec2::new(105.0, 105.0)));
    }
}
