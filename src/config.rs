use std::path::PathBuf;
use clap::Parser;
use crate::media::Accept;
use crate::presentation::PresentationPolicy;
use crate::settings::{Accent, DisplaySettings, OPACITY_MAX, PERIOD_MAX, PERIOD_MIN};

#[derive(Parser, Debug)]
#[command(name = "screenfloat", version, about = "Float a video or image across your screen")]
pub struct Cli {
    /// Video or image to overlay right away
    pub media: Option<PathBuf>,

    /// Overlay opacity in percent (0-100)
    #[arg(short, long, default_value_t = 50)]
    pub opacity: u16,

    /// Seconds per floating animation cycle (2-15)
    #[arg(short, long, default_value_t = 6)]
    pub speed: u16,

    /// Accent color of the panel
    #[arg(short, long, value_enum, default_value_t = Accent::Blue)]
    pub accent: Accent,

    /// What to do when fullscreen is refused
    #[arg(long, value_enum, default_value_t = PresentationPolicy::Optimistic)]
    pub policy: PresentationPolicy,

    /// Only accept video files
    #[arg(long)]
    pub video_only: bool,

    /// Initial window width
    #[arg(long, default_value_t = 1280)]
    pub width: i32,

    /// Initial window height
    #[arg(long, default_value_t = 720)]
    pub height: i32,

    /// Enable debug logging (RUST_LOG is honoured)
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Initial settings, clamped to the slider ranges.
    pub fn display_settings(&self) -> DisplaySettings {
        let opacity = self.opacity.min(OPACITY_MAX as u16) as u8;
        let speed = self.speed.clamp(PERIOD_MIN as u16, PERIOD_MAX as u16) as u8;
        DisplaySettings::new(opacity, self.accent, speed)
    }

    pub fn accept(&self) -> Accept {
        if self.video_only {
            Accept::VideoOnly
        } else {
            Accept::VideoAndImage
        }
    }
}
