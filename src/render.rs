use raylib::prelude::*;
use crate::layer::MediaLayer;
use crate::media::MediaKind;
use crate::notice::{Level, Toaster};
use crate::panel::{slider_fraction, PanelLayout};
use crate::scene::{PanelView, Scene};
use crate::settings::{Accent, OPACITY_MAX, PERIOD_MAX, PERIOD_MIN};

const PANEL_BG: Color = Color::new(15, 18, 28, 204);
const TEXT: Color = Color::new(235, 238, 245, 255);
const MUTED: Color = Color::new(150, 156, 170, 255);
const TOAST_WIDTH: f32 = 340.0;
const TOAST_HEIGHT: f32 = 56.0;

fn with_alpha(color: Color, alpha: f32) -> Color {
    Color::new(color.r, color.g, color.b, (color.a as f32 * alpha.clamp(0.0, 1.0)) as u8)
}

fn inflate(rect: Rectangle, by: f32) -> Rectangle {
    Rectangle::new(rect.x - by, rect.y - by, rect.width + by * 2.0, rect.height + by * 2.0)
}

pub fn draw_scene(
    d: &mut RaylibDrawHandle,
    scene: &Scene,
    layout: &PanelLayout,
    layer: Option<&MediaLayer>,
    toaster: &Toaster,
) {
    // The overlay only exists while an asset is selected and its layer is loaded
    if let (Some(overlay), Some(layer)) = (scene.overlay.as_ref(), layer) {
        if layer.handle() == overlay.handle {
            layer.draw(d, overlay);
        }
    }

    if scene.shows_reopen() {
        draw_reopen(d, layout, scene.panel.accent);
    } else {
        draw_panel(d, layout, &scene.panel);
    }

    draw_toasts(d, toaster);
}

fn draw_button(d: &mut RaylibDrawHandle, rect: Rectangle, label: &str, accent: Color, filled: bool) {
    if filled {
        d.draw_rectangle_rec(rect, accent);
    } else {
        d.draw_rectangle_lines_ex(rect, 2.0, accent);
    }
    let text_color = if filled { Color::BLACK } else { accent };
    d.draw_text(label, rect.x as i32 + 16, (rect.y + rect.height * 0.5) as i32 - 10, 20, text_color);
}

fn draw_slider(d: &mut RaylibDrawHandle, rect: Rectangle, fraction: f32, accent: Color) {
    let track = Rectangle::new(rect.x, rect.y + rect.height * 0.5 - 3.0, rect.width, 6.0);
    d.draw_rectangle_rec(track, with_alpha(accent, 0.25));
    d.draw_rectangle_rec(Rectangle::new(track.x, track.y, track.width * fraction, track.height), accent);
    let knob = Vector2::new(rect.x + rect.width * fraction, rect.y + rect.height * 0.5);
    d.draw_circle_v(knob, rect.height * 0.6, TEXT);
    d.draw_circle_lines(knob.x as i32, knob.y as i32, rect.height * 0.6, accent);
}

fn draw_panel(d: &mut RaylibDrawHandle, layout: &PanelLayout, view: &PanelView) {
    let accent = view.accent.color();
    let frame = layout.frame;

    // Glow, card, border
    d.draw_rectangle_lines_ex(inflate(frame, 8.0), 8.0, with_alpha(accent, 0.12));
    d.draw_rectangle_lines_ex(inflate(frame, 3.0), 4.0, with_alpha(accent, 0.25));
    d.draw_rectangle_rec(frame, PANEL_BG);
    d.draw_rectangle_lines_ex(frame, 2.0, accent);

    let x = layout.title.x as i32;
    d.draw_text("ScreenFloat", x, layout.title.y as i32, 40, accent);
    d.draw_text("Media overlay for your desktop", x, layout.title.y as i32 + 44, 16, MUTED);

    let media_label = match view.media_kind {
        None => "Choose media",
        Some(MediaKind::Video) => "Change video",
        Some(MediaKind::Image) => "Change image",
    };
    draw_button(d, layout.media_button, media_label, accent, true);

    let opacity = layout.opacity_slider;
    d.draw_text(&format!("Overlay opacity: {}%", view.opacity_percent), x, opacity.y as i32 - 28, 18, accent);
    draw_slider(d, opacity, slider_fraction(view.opacity_percent, 0, OPACITY_MAX), accent);

    let first_swatch = layout.swatches[0];
    d.draw_text(&format!("Glow color: {}", view.accent.name()), x, first_swatch.y as i32 - 26, 18, accent);
    for (rect, swatch) in layout.swatches.iter().zip(Accent::ALL) {
        d.draw_rectangle_rec(*rect, swatch.color());
        if swatch == view.accent {
            d.draw_rectangle_lines_ex(inflate(*rect, 4.0), 4.0, with_alpha(swatch.color(), 0.5));
            d.draw_rectangle_lines_ex(*rect, 2.0, Color::WHITE);
        }
    }

    let speed = layout.speed_slider;
    d.draw_text(&format!("Animation speed: {}s", view.period_secs), x, speed.y as i32 - 28, 18, accent);
    draw_slider(d, speed, slider_fraction(view.period_secs, PERIOD_MIN, PERIOD_MAX), accent);

    let presentation_label = if view.requesting {
        "Requesting..."
    } else if view.active {
        "Leave always-on-top"
    } else {
        "Always on top"
    };
    draw_button(d, layout.presentation_button, presentation_label, accent, view.active);
    if view.active {
        draw_button(d, layout.hide_button, "Hide panel", accent, false);
    }

    let footer = if view.granted {
        "Fullscreen granted. Esc leaves, H hides the panel."
    } else {
        "F11 toggles fullscreen. Drop a file anywhere to load it."
    };
    d.draw_text(footer, x, layout.footer.y as i32, 16, MUTED);
}

fn draw_reopen(d: &mut RaylibDrawHandle, layout: &PanelLayout, accent: Accent) {
    let rect = layout.reopen;
    d.draw_rectangle_rec(rect, with_alpha(PANEL_BG, 0.8));
    d.draw_rectangle_lines_ex(rect, 2.0, accent.color());
    // Three-bar menu glyph
    for i in 0..3 {
        let y = rect.y + 13.0 + i as f32 * 8.0;
        d.draw_rectangle_rec(Rectangle::new(rect.x + 11.0, y, rect.width - 22.0, 3.0), accent.color());
    }
}

fn draw_toasts(d: &mut RaylibDrawHandle, toaster: &Toaster) {
    let screen_w = d.get_screen_width() as f32;
    let screen_h = d.get_screen_height() as f32;

    for (i, toast) in toaster.visible().enumerate() {
        let fade = (toast.remaining() * 4.0).min(1.0);
        let rect = Rectangle::new(
            screen_w - TOAST_WIDTH - 16.0,
            screen_h - (TOAST_HEIGHT + 10.0) * (i as f32 + 1.0) - 6.0,
            TOAST_WIDTH,
            TOAST_HEIGHT,
        );
        let edge = match toast.notice.level {
            Level::Success => Color::new(16, 185, 129, 255),
            Level::Info => Color::new(14, 165, 233, 255),
            Level::Error => Color::new(239, 68, 68, 255),
        };
        d.draw_rectangle_rec(rect, with_alpha(PANEL_BG, fade));
        d.draw_rectangle_rec(Rectangle::new(rect.x, rect.y, 4.0, rect.height), with_alpha(edge, fade));
        d.draw_text(&toast.notice.title, rect.x as i32 + 14, rect.y as i32 + 8, 18, with_alpha(TEXT, fade));
        if let Some(description) = &toast.notice.description {
            d.draw_text(description, rect.x as i32 + 14, rect.y as i32 + 32, 14, with_alpha(MUTED, fade));
        }
    }
}
