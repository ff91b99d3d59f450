use clap::ValueEnum;
use crate::error::OverlayResult;

/// How activation reacts when fullscreen is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PresentationPolicy {
    /// Stay windowed and tell the user how to go fullscreen by hand.
    Minimal,
    /// Also ask for wake lock and notifications, and stay in overlay mode even
    /// if fullscreen itself was refused.
    #[default]
    Optimistic,
}

impl PresentationPolicy {
    pub fn is_optimistic(self) -> bool {
        self == PresentationPolicy::Optimistic
    }
}

/// Boundary to the windowing system. Every call is synchronous.
pub trait PresentationGateway {
    fn enter_presentation_mode(&mut self) -> OverlayResult<()>;
    fn exit_presentation_mode(&mut self) -> OverlayResult<()>;
    fn request_wake_lock(&mut self) -> OverlayResult<()>;
    fn request_notifications(&mut self) -> OverlayResult<()>;
    /// Returns true once after presentation mode ended without an
    /// `exit_presentation_mode` call.
    fn take_external_exit(&mut self) -> bool;
}
