use ratatui::style::Color;

/// Palette used by every widget in the picker. `nord` is the default;
/// `mono` maps everything onto the terminal's own colors.
pub struct Theme {
    // Polar Night
    pub nord0: Color, // #2E3440 - background
    pub nord1: Color, // #3B4252 - chips, status bar
    pub nord2: Color, // #434C5E - borders
    pub nord3: Color, // #4C566A - muted text, hints

    // Snow Storm
    pub nord4: Color, // #D8DEE9 - text
    pub nord5: Color, // #E5E9F0 - bright text
    pub nord6: Color, // #ECEFF4 - cursor

    // Frost
    pub nord7: Color,  // #8FBCBB - email column
    pub nord8: Color,  // #88C0D0 - focused border
    pub nord9: Color,  // #81A1C1 - chip text
    pub nord10: Color, // #5E81AC - active dropdown row

    // Aurora
    pub nord11: Color, // #BF616A - highlighted chip / remove glyph
    pub nord13: Color, // #EBCB8B - pending-delete hint
    pub nord14: Color, // #A3BE8C - selection count
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            nord0: Color::Rgb(46, 52, 64),
            nord1: Color::Rgb(59, 66, 82),
            nord2: Color::Rgb(67, 76, 94),
            nord3: Color::Rgb(76, 86, 106),
            nord4: Color::Rgb(216, 222, 233),
            nord5: Color::Rgb(229, 233, 240),
            nord6: Color::Rgb(236, 239, 244),
            nord7: Color::Rgb(143, 188, 187),
            nord8: Color::Rgb(136, 192, 208),
            nord9: Color::Rgb(129, 161, 193),
            nord10: Color::Rgb(94, 129, 172),
            nord11: Color::Rgb(191, 97, 106),
            nord13: Color::Rgb(235, 203, 139),
            nord14: Color::Rgb(163, 190, 140),
        }
    }
}

impl Theme {
    pub fn mono() -> Self {
        Self {
            nord0: Color::Reset,
            nord1: Color::Reset,
            nord2: Color::DarkGray,
            nord3: Color::DarkGray,
            nord4: Color::Reset,
            nord5: Color::White,
            nord6: Color::White,
            nord7: Color::Gray,
            nord8: Color::White,
            nord9: Color::Reset,
            nord10: Color::Gray,
            nord11: Color::Red,
            nord13: Color::Yellow,
            nord14: Color::Green,
        }
    }

    /// Look up a palette by its config name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "nord" => Some(Self::default()),
            "mono" => Some(Self::mono()),
            _ => None,
        }
    }

    // Semantic aliases
    pub fn bg(&self) -> Color {
        self.nord0
    }
    pub fn bg_secondary(&self) -> Color {
        self.nord1
    }
    pub fn border(&self) -> Color {
        self.nord2
    }
    pub fn muted(&self) -> Color {
        self.nord3
    }

    pub fn fg(&self) -> Color {
        self.nord4
    }
    pub fn fg_bright(&self) -> Color {
        self.nord5
    }
    pub fn fg_white(&self) -> Color {
        self.nord6
    }

    pub fn frost_mint(&self) -> Color {
        self.nord7
    }
    pub fn frost_ice(&self) -> Color {
        self.nord8
    }
    pub fn frost_blue(&self) -> Color {
        self.nord9
    }
    pub fn frost_dark(&self) -> Color {
        self.nord10
    }

    pub fn red(&self) -> Color {
        self.nord11
    }
    pub fn yellow(&self) -> Color {
        self.nord13
    }
    pub fn green(&self) -> Color {
        self.nord14
    }

    // Logic aliases
    pub fn active_panel(&self) -> Color {
        self.frost_ice()
    }
    pub fn inactive_panel(&self) -> Color {
        self.border()
    }
    pub fn chip_bg(&self) -> Color {
        self.bg_secondary()
    }
    pub fn chip_fg(&self) -> Color {
        self.frost_blue()
    }
    pub fn danger(&self) -> Color {
        self.red()
    }
    pub fn warning(&self) -> Color {
        self.yellow()
    }
    pub fn success(&self) -> Color {
        self.green()
    }
    pub fn row_active_bg(&self) -> Color {
        self.frost_dark()
    }
}
