use kinetic_core::config::UiConfig;
use ratatui::style::Color;

/// Runtime palette; only the accent is configurable
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub grey0: Color,
    pub grey1: Color,

    // Semantic colors
    pub accent: Color,
    pub highlight: Color,
    pub muted: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Near-black studio palette with a cyan accent
        Self {
            bg0: Color::Rgb(0x0a, 0x0a, 0x0a),
            bg1: Color::Rgb(0x17, 0x17, 0x17),
            bg2: Color::Rgb(0x26, 0x26, 0x26),
            fg0: Color::Rgb(0xfa, 0xfa, 0xfa),
            fg1: Color::Rgb(0xd4, 0xd4, 0xd4),
            grey0: Color::Rgb(0x52, 0x52, 0x52),
            grey1: Color::Rgb(0xa3, 0xa3, 0xa3),
            accent: Color::Rgb(0x22, 0xd3, 0xee),
            highlight: Color::Rgb(0xa7, 0x8b, 0xfa),
            muted: Color::Rgb(0x73, 0x73, 0x73),
        }
    }
}

impl Theme {
    /// Default palette with the configured accent; a bad hex keeps the default
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Self::default();
        match parse_hex_color(&ui.accent) {
            Some(color) => theme.accent = color,
            None => tracing::warn!(accent = %ui.accent, "Ignoring invalid accent color"),
        }
        theme
    }

    /// `fg` faded toward the page background by `opacity` in [0, 1]
    pub fn faded(&self, fg: Color, opacity: f64) -> Color {
        blend(fg, self.bg0, opacity)
    }
}

/// Parse a hex color string into a ratatui Color
/// Accepts formats: "#RRGGBB", "RRGGBB", "#RGB", "RGB"
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        // Short form: RGB -> RRGGBB
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        }
        // Full form: RRGGBB
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

/// Linear mix of two RGB colors; non-RGB colors are shown or hidden whole
pub fn blend(fg: Color, bg: Color, opacity: f64) -> Color {
    let t = if opacity.is_finite() { opacity.clamp(0.0, 1.0) } else { 0.0 };
    match (fg, bg) {
        (Color::Rgb(fr, fg_, fb), Color::Rgb(br, bg_, bb)) => {
            let mix = |f: u8, b: u8| (b as f64 + (f as f64 - b as f64) * t).round() as u8;
            Color::Rgb(mix(fr, br), mix(fg_, bg_), mix(fb, bb))
        }
        _ if t >= 0.5 => fg,
        _ => bg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#22d3ee"), Some(Color::Rgb(0x22, 0xd3, 0xee)));
        assert_eq!(parse_hex_color("fff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("zzzzzz"), None);
        assert_eq!(parse_hex_color("ééé"), None);
    }

    #[test]
    fn test_blend_endpoints() {
        let fg = Color::Rgb(200, 100, 0);
        let bg = Color::Rgb(0, 0, 0);
        assert_eq!(blend(fg, bg, 1.0), fg);
        assert_eq!(blend(fg, bg, 0.0), bg);
        assert_eq!(blend(fg, bg, 0.5), Color::Rgb(100, 50, 0));
        assert_eq!(blend(fg, bg, 7.0), fg);
        assert_eq!(blend(fg, bg, f64::NAN), bg);
    }

    #[test]
    fn test_from_config_accent() {
        let ui = UiConfig {
            accent: "#ff0000".to_string(),
            ..UiConfig::default()
        };
        assert_eq!(Theme::from_config(&ui).accent, Color::Rgb(255, 0, 0));

        let bad = UiConfig {
            accent: "red-ish".to_string(),
            ..UiConfig::default()
        };
        assert_eq!(Theme::from_config(&bad).accent, Theme::default().accent);
    }
}
