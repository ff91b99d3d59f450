use std::f32::consts::TAU;
use raylib::prelude::Rectangle;
use crate::media::{MediaHandle, MediaKind};
use crate::settings::Accent;
use crate::state::OverlayState;

/// Overlay layer as it should appear this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayLayer {
    pub handle: MediaHandle,
    pub kind: MediaKind,
    pub opacity: f32,
    pub period_secs: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelView {
    pub hidden: bool,
    pub accent: Accent,
    pub opacity_percent: u8,
    pub period_secs: u8,
    pub active: bool,
    pub requesting: bool,
    pub granted: bool,
    pub media_kind: Option<MediaKind>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scene {
    pub overlay: Option<OverlayLayer>,
    pub panel: PanelView,
}

impl Scene {
    pub fn shows_reopen(&self) -> bool {
        self.panel.hidden
    }
}

pub fn compose(state: &OverlayState) -> Scene {
    let settings = &state.settings;
    let overlay = state.media.as_ref().map(|asset| OverlayLayer {
        handle: asset.handle,
        kind: asset.kind,
        opacity: settings.opacity_fraction(),
        period_secs: settings.animation_period().as_secs_f32(),
    });

    let panel = PanelView {
        hidden: state.presentation.is_panel_hidden(),
        accent: settings.accent(),
        opacity_percent: settings.opacity_percent(),
        period_secs: settings.animation_period_secs(),
        active: state.presentation.is_overlay_active(),
        requesting: state.presentation.is_requesting(),
        granted: state.permission.granted,
        media_kind: state.media.as_ref().map(|asset| asset.kind),
    };

    Scene { overlay, panel }
}

/// Moves a drift phase in [0, 1) forward by `dt` for a cycle of `period`
/// seconds. Wrapping keeps the step resolvable no matter how long it runs.
pub fn advance_phase(phase: f32, dt: f32, period: f32) -> f32 {
    if period <= 0.0 {
        return phase;
    }
    (phase + dt / period).rem_euclid(1.0)
}

/// Floating drift offset at `phase` of the cycle.
pub fn float_offset(phase: f32, amplitude: f32) -> f32 {
    amplitude * (TAU * phase).sin()
}

/// Source rectangle that crops a `tex_w`x`tex_h` texture to the aspect of the
/// target, centred, so it covers the target without distortion.
pub fn cover_source(tex_w: f32, tex_h: f32, target_w: f32, target_h: f32) -> Rectangle {
    if tex_w <= 0.0 || tex_h <= 0.0 || target_w <= 0.0 || target_h <= 0.0 {
        return Rectangle::new(0.0, 0.0, tex_w.max(0.0), tex_h.max(0.0));
    }
    let target_aspect = target_w / target_h;
    let tex_aspect = tex_w / tex_h;

    if tex_aspect > target_aspect {
        // Too wide: trim the sides
        let width = tex_h * target_aspect;
        Rectangle::new((tex_w - width) * 0.5, 0.0, width, tex_h)
    } else {
        // Too tall: trim top and bottom
        let height = tex_w / target_aspect;
        Rectangle::new(0.0, (tex_h - height) * 0.5, tex_w, height)
    }
}
