use std::time::Duration;
use clap::ValueEnum;
use raylib::prelude::Color;

pub const OPACITY_MAX: u8 = 100;
pub const PERIOD_MIN: u8 = 2;
pub const PERIOD_MAX: u8 = 15;

/// Fixed accent palette used for the panel outline, labels and swatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Accent {
    #[default]
    Blue,
    Purple,
    Orange,
    Green,
    Pink,
}

impl Accent {
    pub const ALL: [Accent; 5] = [
        Accent::Blue,
        Accent::Purple,
        Accent::Orange,
        Accent::Green,
        Accent::Pink,
    ];

    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Accent::Blue => (0x0E, 0xA5, 0xE9),
            Accent::Purple => (0xD9, 0x46, 0xEF),
            Accent::Orange => (0xF9, 0x73, 0x16),
            Accent::Green => (0x10, 0xB9, 0x81),
            Accent::Pink => (0xEC, 0x48, 0x99),
        }
    }

    pub fn color(self) -> Color {
        let (r, g, b) = self.rgb();
        Color::new(r, g, b, 255)
    }

    pub fn name(self) -> &'static str {
        match self {
            Accent::Blue => "Blue",
            Accent::Purple => "Purple",
            Accent::Orange => "Orange",
            Accent::Green => "Green",
            Accent::Pink => "Pink",
        }
    }

    /// Palette entry for a 1-based swatch number, as bound to the digit keys.
    pub fn from_index(index: usize) -> Option<Accent> {
        index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

/// Opacity, accent and animation speed of the overlay. Setters clamp to the
/// ranges the sliders expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySettings {
    opacity_percent: u8,
    accent: Accent,
    animation_period_secs: u8,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            opacity_percent: 50,
            accent: Accent::Blue,
            animation_period_secs: 6,
        }
    }
}

impl DisplaySettings {
    pub fn new(opacity_percent: u8, accent: Accent, animation_period_secs: u8) -> Self {
        let mut settings = Self { accent, ..Self::default() };
        settings.set_opacity(opacity_percent);
        settings.set_animation_period(animation_period_secs);
        settings
    }

    pub fn opacity_percent(&self) -> u8 {
        self.opacity_percent
    }

    pub fn accent(&self) -> Accent {
        self.accent
    }

    pub fn animation_period_secs(&self) -> u8 {
        self.animation_period_secs
    }

    pub fn set_opacity(&mut self, percent: u8) {
        self.opacity_percent = percent.min(OPACITY_MAX);
    }

    pub fn set_accent(&mut self, accent: Accent) {
        self.accent = accent;
    }

    pub fn set_animation_period(&mut self, secs: u8) {
        self.animation_period_secs = secs.clamp(PERIOD_MIN, PERIOD_MAX);
    }

    /// Overlay opacity as a fraction in [0, 1].
    pub fn opacity_fraction(&self) -> f32 {
        self.opacity_percent as f32 / OPACITY_MAX as f32
    }

    pub fn animation_period(&self) -> Duration {
        Duration::from_secs(self.animation_period_secs as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_initial_panel() {
        let settings = DisplaySettings::default();
        assert_eq!(settings.opacity_percent(), 50);
        assert_eq!(settings.accent(), Accent::Blue);
        assert_eq!(settings.animation_period_secs(), 6);
    }

    #[test]
    fn setters_clamp_to_slider_ranges() {
        let mut settings = DisplaySettings::default();
        settings.set_opacity(250);
        assert_eq!(settings.opacity_percent(), 100);

        settings.set_animation_period(0);
        assert_eq!(settings.animation_period_secs(), PERIOD_MIN);
        settings.set_animation_period(99);
        assert_eq!(settings.animation_period_secs(), PERIOD_MAX);
    }

    #[test]
    fn opacity_fraction_is_percent_over_hundred() {
        for percent in [0u8, 1, 33, 50, 75, 100] {
            let settings = DisplaySettings::new(percent, Accent::Green, 6);
            let fraction = settings.opacity_fraction();
            assert!((0.0..=1.0).contains(&fraction));
            assert!((fraction - percent as f32 / 100.0).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn palette_lookup_by_swatch_number() {
        assert_eq!(Accent::from_index(1), Some(Accent::Blue));
        assert_eq!(Accent::from_index(4), Some(Accent::Green));
        assert_eq!(Accent::from_index(0), None);
        assert_eq!(Accent::from_index(6), None);
        assert_eq!(Accent::Orange.rgb(), (0xF9, 0x73, 0x16));
        assert_eq!(Accent::Purple.name(), "Purple");
    }
}
