use crossterm::style::Color;

pub struct Theme {
    pub heading: Color,
    pub keyword: Color,
    pub dead_store: Color,
    pub comment: Color, // Grey
    pub success: Color, // Green
    pub error: Color,   // Red
}

pub const DEFAULT_THEME: Theme = Theme {
    heading: Color::Rgb { r: 137, g: 180, b: 250 }, // Blue
    keyword: Color::Rgb { r: 203, g: 166, b: 247 }, // Mauve for keywords
    dead_store: Color::Rgb { r: 250, g: 179, b: 135 }, // Orange for flagged assignments
    comment: Color::Rgb { r: 108, g: 112, b: 134 },
    success: Color::Rgb { r: 166, g: 227, b: 161 },
    error: Color::Rgb { r: 243, g: 139, b: 168 },
};
