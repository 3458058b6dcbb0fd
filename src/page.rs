//! Stand-in for the web page hosting the canvas: a scrollable document a few
//! viewports tall with a round profile picture in the hero section.

use crate::constants::PAGE_HEIGHT_VIEWPORTS;
use crate::painter::{DrawList, Painter};
use crate::theme::Theme;
use crate::utils::{mix_rgb, with_alpha};
use crate::viewport::Rect;
use glam::{Vec2, Vec4};

const PROFILE_MIN_SIZE: f32 = 120.0;
const PROFILE_MAX_SIZE: f32 = 280.0;

#[derive(Debug, Clone)]
pub struct Page {
    width: f32,
    height: f32,
    scroll_y: f32,
}

impl Page {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
            scroll_y: 0.0,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width.max(1.0);
        self.height = height.max(1.0);
        self.scroll_y = self.scroll_y.min(self.max_scroll());
    }

    pub fn max_scroll(&self) -> f32 {
        self.height * (PAGE_HEIGHT_VIEWPORTS - 1.0).max(0.0)
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    /// Scrolls by `delta` pixels and returns the clamped offset.
    pub fn scroll_by(&mut self, delta: f32) -> f32 {
        self.scroll_y = (self.scroll_y + delta).clamp(0.0, self.max_scroll());
        self.scroll_y
    }

    /// Profile picture bounds in page coordinates.
    pub fn profile_world_rect(&self) -> Rect {
        let size = (self.width.min(self.height) * 0.3).clamp(PROFILE_MIN_SIZE, PROFILE_MAX_SIZE);
        Rect::from_center(Vec2::new(self.width * 0.5, self.height * 0.4), size)
    }

    /// Profile picture bounds on screen, following scroll and any page shake.
    pub fn profile_screen_rect(&self, shake: Vec2) -> Rect {
        self.profile_world_rect()
            .translated(Vec2::new(shake.x, shake.y - self.scroll_y))
    }

    /// Paints the profile picture placeholder on top of the canvas.
    pub fn draw_profile(&self, list: &mut DrawList, rect: Rect, theme: Theme) {
        let center = rect.center();
        let radius = rect.circle_radius();
        let accent = theme.accent();
        let mut painter = Painter::new(list);
        painter.fill_circle(center, radius, mix_rgb(accent, theme.background(), 0.6));
        let figure = with_alpha(mix_rgb(accent, Vec4::ONE, 0.3), 0.9);
        painter.fill_circle(center + Vec2::new(0.0, -radius * 0.2), radius * 0.32, figure);
        painter.save();
        painter.translate(center + Vec2::new(0.0, radius * 0.55));
        painter.scale(Vec2::new(1.0, 0.5));
        painter.fill_circle(Vec2::ZERO, radius * 0.55, figure);
        painter.restore();
        painter.stroke_circle(center, radius, 4.0, accent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_is_clamped_to_page() {
        let mut page = Page::new(800.0, 600.0);
        assert_eq!(page.scroll_by(-50.0), 0.0);
        assert_eq!(page.scroll_by(5000.0), 1200.0);
        page.resize(800.0, 300.0);
        assert_eq!(page.scroll_y(), 600.0);
    }

    #[test]
    fn profile_moves_up_when_scrolling() {
        let mut page = Page::new(800.0, 600.0);
        let before = page.profile_screen_rect(Vec2::ZERO);
        page.scroll_by(100.0);
        let after = page.profile_screen_rect(Vec2::ZERO);
        assert_eq!(after.y, before.y - 100.0);
        assert_eq!(before.center(), Vec2::new(400.0, 240.0));
        assert_eq!(before.width, 180.0);
    }
}
