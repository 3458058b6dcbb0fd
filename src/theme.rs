use crate::utils::rgb;
use glam::Vec4;

/// Page colour scheme. Owned by the page; the canvas only reads it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// Parses the page's theme attribute. Anything but `"light"` is dark,
    /// which is also what the page falls back to when the attribute is unset.
    pub fn from_attribute(attribute: Option<&str>) -> Self {
        match attribute.map(str::trim) {
            Some(value) if value.eq_ignore_ascii_case("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn attribute(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn background(self) -> Vec4 {
        match self {
            Theme::Light => rgb(0xf8fafc),
            Theme::Dark => rgb(0x0a0a0f),
        }
    }

    /// Ripple stroke colour.
    pub fn accent(self) -> Vec4 {
        match self {
            Theme::Light => rgb(0x4f46e5),
            Theme::Dark => rgb(0x6366f1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_parsing_defaults_to_dark() {
        assert_eq!(Theme::from_attribute(Some("light")), Theme::Light);
        assert_eq!(Theme::from_attribute(Some(" Light ")), Theme::Light);
        assert_eq!(Theme::from_attribute(Some("dark")), Theme::Dark);
        assert_eq!(Theme::from_attribute(Some("sepia")), Theme::Dark);
        assert_eq!(Theme::from_attribute(None), Theme::Dark);
    }

    #[test]
    fn toggle_round_trips_through_attribute() {
        let theme = Theme::Dark.toggled();
        assert_eq!(theme, Theme::Light);
        assert_eq!(Theme::from_attribute(Some(theme.attribute())), theme);
        assert_eq!(theme.toggled(), Theme::Dark);
    }
}
