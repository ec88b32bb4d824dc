use ratatui::style::Color;

/// Colors used by the pager shell and panels
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub grey1: Color,
    pub grey2: Color,

    // Semantic colors
    pub accent: Color,
    pub warning: Color,

    /// Text drawn on top of panel backgrounds
    pub panel_fg: Color,
    /// Fallback panel backgrounds, cycled by page index
    pub panel_cycle: Vec<Color>,
}

impl Default for Theme {
    fn default() -> Self {
        // Gruvbox Dark shell, pastel panels
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg1: Color::Rgb(0x32, 0x30, 0x2f),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            fg1: Color::Rgb(0xdd, 0xc7, 0xa1),
            grey1: Color::Rgb(0x92, 0x83, 0x74),
            grey2: Color::Rgb(0xa8, 0x99, 0x84),
            accent: Color::Rgb(0x89, 0xb4, 0x82),
            warning: Color::Rgb(0xe7, 0x8a, 0x4e),
            panel_fg: Color::Rgb(0xff, 0xff, 0xff),
            panel_cycle: vec![
                Color::Rgb(0xea, 0x69, 0x62),
                Color::Rgb(0xd8, 0xa6, 0x57),
                Color::Rgb(0x7d, 0xae, 0xa3),
                Color::Rgb(0xa9, 0xb6, 0x65),
                Color::Rgb(0xd3, 0x86, 0x9b),
            ],
        }
    }
}

impl Theme {
    /// Background for a panel, from its label when it names a color
    pub fn panel_color(&self, label: &str, index: usize) -> Color {
        named_color(label).unwrap_or_else(|| {
            self.panel_cycle
                .get(index % self.panel_cycle.len().max(1))
                .copied()
                .unwrap_or(self.bg1)
        })
    }
}

/// A handful of CSS color names, plus "#rrggbb" hex
fn named_color(name: &str) -> Option<Color> {
    let name = name.trim().to_ascii_lowercase();
    if let Some(hex) = name.strip_prefix('#') {
        return parse_hex(hex);
    }
    let rgb = match name.as_str() {
        "pink" => (0xff, 0xc0, 0xcb),
        "wheat" => (0xf5, 0xde, 0xb3),
        "powderblue" => (0xb0, 0xe0, 0xe6),
        "cornsilk" => (0xff, 0xf8, 0xdc),
        "palegreen" => (0x98, 0xfb, 0x98),
        "lavender" => (0xe6, 0xe6, 0xfa),
        "salmon" => (0xfa, 0x80, 0x72),
        "khaki" => (0xf0, 0xe6, 0x8c),
        "plum" => (0xdd, 0xa0, 0xdd),
        "skyblue" => (0x87, 0xce, 0xeb),
        _ => return None,
    };
    Some(Color::Rgb(rgb.0, rgb.1, rgb.2))
}

fn parse_hex(hex: &str) -> Option<Color> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}
