#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    pub fn to_hex_string(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Globe colour palette.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Palette {
    pub ocean: Rgb,
    pub land: Rgb,
    pub border: Rgb,
    pub hover: Rgb,
    pub selected: Rgb,
    pub atmosphere: Rgb,
    pub default_opacity: f32,
    pub hover_opacity: f32,
    pub selected_opacity: f32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            ocean: Rgb::from_hex(0x061220),
            land: Rgb::from_hex(0x193558),
            border: Rgb::from_hex(0x2a6aad),
            hover: Rgb::from_hex(0x4a9fd4),
            selected: Rgb::from_hex(0x2b5ce6),
            atmosphere: Rgb::from_hex(0x1a3a6a),
            // Never zero: some hit-test backends skip fully transparent meshes.
            default_opacity: 0.01,
            hover_opacity: 0.3,
            selected_opacity: 0.42,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    None,
    Hover,
    Selected,
}

/// Render state of one country: pick-surface fill plus outline colour.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Appearance {
    pub fill: Rgb,
    pub fill_opacity: f32,
    pub outline: Rgb,
}

impl Palette {
    pub fn appearance(&self, highlight: Highlight) -> Appearance {
        match highlight {
            Highlight::None => Appearance {
                fill: self.land,
                fill_opacity: self.default_opacity,
                outline: self.border,
            },
            Highlight::Hover => Appearance {
                fill: self.hover,
                fill_opacity: self.hover_opacity,
                outline: self.hover,
            },
            Highlight::Selected => Appearance {
                fill: self.selected,
                fill_opacity: self.selected_opacity,
                outline: self.selected,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Highlight, Palette, Rgb};

    #[test]
    fn hex_round_trip() {
        assert_eq!(Rgb::from_hex(0x2b5ce6), Rgb::new(0x2b, 0x5c, 0xe6));
        assert_eq!(Rgb::from_hex(0x061220).to_hex_string(), "#061220");
    }

    #[test]
    fn default_appearance_is_faint_but_visible() {
        let p = Palette::default();
        let a = p.appearance(Highlight::None);
        assert!(a.fill_opacity > 0.0 && a.fill_opacity < 0.05);
        assert_eq!(a.outline, p.border);
        assert_eq!(p.appearance(Highlight::Selected).outline, p.selected);
    }
}
