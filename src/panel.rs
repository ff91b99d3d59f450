use std::path::PathBuf;
use raylib::prelude::{KeyboardKey, Rectangle, Vector2};
use crate::constants::OPACITY_STEP;
use crate::scene::PanelView;
use crate::settings::{Accent, OPACITY_MAX, PERIOD_MAX, PERIOD_MIN};

pub const PANEL_WIDTH: f32 = 520.0;
pub const PANEL_HEIGHT: f32 = 520.0;
const PADDING: f32 = 32.0;
const BUTTON_HEIGHT: f32 = 44.0;
const SLIDER_HEIGHT: f32 = 16.0;
const SWATCH_SIZE: f32 = 56.0;
const SWATCH_GAP: f32 = 12.0;
const REOPEN_SIZE: f32 = 44.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slider {
    Opacity,
    Speed,
}

impl Slider {
    fn range(self) -> (u8, u8) {
        match self {
            Slider::Opacity => (0, OPACITY_MAX),
            Slider::Speed => (PERIOD_MIN, PERIOD_MAX),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    MediaButton,
    Slider(Slider),
    Swatch(Accent),
    PresentationButton,
    HidePanelButton,
    Reopen,
}

/// What the user asked for this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ChooseMedia,
    Open(PathBuf),
    SetOpacity(u8),
    SetAccent(Accent),
    SetSpeed(u8),
    TogglePresentation,
    TogglePanel,
}

/// Widget rectangles for a given window size. The panel is centred.
#[derive(Debug, Clone, Copy)]
pub struct PanelLayout {
    pub frame: Rectangle,
    pub title: Vector2,
    pub media_button: Rectangle,
    pub opacity_slider: Rectangle,
    pub swatches: [Rectangle; 5],
    pub speed_slider: Rectangle,
    pub presentation_button: Rectangle,
    pub hide_button: Rectangle,
    pub footer: Vector2,
    pub reopen: Rectangle,
}

fn contains(rect: &Rectangle, point: Vector2) -> bool {
    point.x >= rect.x
        && point.x <= rect.x + rect.width
        && point.y >= rect.y
        && point.y <= rect.y + rect.height
}

impl PanelLayout {
    pub fn new(screen_w: f32, screen_h: f32) -> Self {
        let x = ((screen_w - PANEL_WIDTH) * 0.5).max(0.0);
        let y = ((screen_h - PANEL_HEIGHT) * 0.5).max(0.0);
        let inner_x = x + PADDING;
        let inner_w = PANEL_WIDTH - PADDING * 2.0;

        let mut swatches = [Rectangle::new(0.0, 0.0, SWATCH_SIZE, SWATCH_SIZE); 5];
        for (i, swatch) in swatches.iter_mut().enumerate() {
            swatch.x = inner_x + i as f32 * (SWATCH_SIZE + SWATCH_GAP);
            swatch.y = y + 250.0;
        }

        let half = (inner_w - SWATCH_GAP) * 0.5;

        Self {
            frame: Rectangle::new(x, y, PANEL_WIDTH, PANEL_HEIGHT),
            title: Vector2::new(inner_x, y + PADDING),
            media_button: Rectangle::new(inner_x, y + 100.0, inner_w, BUTTON_HEIGHT),
            opacity_slider: Rectangle::new(inner_x, y + 190.0, inner_w, SLIDER_HEIGHT),
            swatches,
            speed_slider: Rectangle::new(inner_x, y + 360.0, inner_w, SLIDER_HEIGHT),
            presentation_button: Rectangle::new(inner_x, y + 400.0, half, BUTTON_HEIGHT),
            hide_button: Rectangle::new(inner_x + half + SWATCH_GAP, y + 400.0, half, BUTTON_HEIGHT),
            footer: Vector2::new(inner_x, y + 468.0),
            reopen: Rectangle::new(screen_w - REOPEN_SIZE - 16.0, 16.0, REOPEN_SIZE, REOPEN_SIZE),
        }
    }

    pub fn slider_rect(&self, slider: Slider) -> Rectangle {
        match slider {
            Slider::Opacity => self.opacity_slider,
            Slider::Speed => self.speed_slider,
        }
    }

    /// Widget under `point`. While the panel is hidden nothing but the reopen
    /// affordance is targetable.
    pub fn hit_test(&self, view: &PanelView, point: Vector2) -> Option<Widget> {
        if view.hidden {
            return contains(&self.reopen, point).then_some(Widget::Reopen);
        }

        if contains(&self.media_button, point) {
            return Some(Widget::MediaButton);
        }
        for slider in [Slider::Opacity, Slider::Speed] {
            if contains(&self.slider_rect(slider), point) {
                return Some(Widget::Slider(slider));
            }
        }
        for (swatch, accent) in self.swatches.iter().zip(Accent::ALL) {
            if contains(swatch, point) {
                return Some(Widget::Swatch(accent));
            }
        }
        if contains(&self.presentation_button, point) {
            return Some(Widget::PresentationButton);
        }
        if view.active && contains(&self.hide_button, point) {
            return Some(Widget::HidePanelButton);
        }
        None
    }
}

/// Slider value at horizontal position `x`, rounded to the nearest step.
pub fn slider_value(rect: &Rectangle, x: f32, min: u8, max: u8) -> u8 {
    let t = if rect.width > 0.0 { ((x - rect.x) / rect.width).clamp(0.0, 1.0) } else { 0.0 };
    let span = (max - min) as f32;
    min + (t * span).round() as u8
}

/// Knob position of `value` as a fraction of the track.
pub fn slider_fraction(value: u8, min: u8, max: u8) -> f32 {
    if max <= min {
        return 0.0;
    }
    (value.clamp(min, max) - min) as f32 / (max - min) as f32
}

/// Pointer state carried between frames for slider drags.
#[derive(Debug, Default)]
pub struct PanelInput {
    dragging: Option<Slider>,
}

impl PanelInput {
    pub fn pointer(
        &mut self,
        layout: &PanelLayout,
        view: &PanelView,
        point: Vector2,
        pressed: bool,
        down: bool,
    ) -> Option<Command> {
        if !down || view.hidden {
            self.dragging = None;
        }

        if pressed {
            match layout.hit_test(view, point)? {
                Widget::MediaButton => return Some(Command::ChooseMedia),
                Widget::Swatch(accent) => return Some(Command::SetAccent(accent)),
                Widget::PresentationButton => return Some(Command::TogglePresentation),
                Widget::HidePanelButton | Widget::Reopen => return Some(Command::TogglePanel),
                Widget::Slider(slider) => self.dragging = Some(slider),
            }
        }

        let slider = self.dragging?;
        let (min, max) = slider.range();
        let value = slider_value(&layout.slider_rect(slider), point.x, min, max);
        Some(match slider {
            Slider::Opacity => Command::SetOpacity(value),
            Slider::Speed => Command::SetSpeed(value),
        })
    }
}

/// Keyboard shortcuts. While the panel is hidden only the reopen key works.
pub fn key_command(key: KeyboardKey, view: &PanelView) -> Option<Command> {
    use KeyboardKey::*;

    if view.hidden {
        return (key == KEY_H).then_some(Command::TogglePanel);
    }

    match key {
        KEY_O => Some(Command::ChooseMedia),
        KEY_F11 | KEY_F => Some(Command::TogglePresentation),
        KEY_H if view.active => Some(Command::TogglePanel),
        KEY_RIGHT | KEY_UP => Some(Command::SetOpacity(
            view.opacity_percent.saturating_add(OPACITY_STEP).min(OPACITY_MAX),
        )),
        KEY_LEFT | KEY_DOWN => Some(Command::SetOpacity(view.opacity_percent.saturating_sub(OPACITY_STEP))),
        KEY_LEFT_BRACKET => Some(Command::SetSpeed(view.period_secs.saturating_sub(1).max(PERIOD_MIN))),
        KEY_RIGHT_BRACKET => Some(Command::SetSpeed((view.period_secs + 1).min(PERIOD_MAX))),
        KEY_ONE => Accent::from_index(1).map(Command::SetAccent),
        KEY_TWO => Accent::from_index(2).map(Command::SetAccent),
        KEY_THREE => Accent::from_index(3).map(Command::SetAccent),
        KEY_FOUR => Accent::from_index(4).map(Command::SetAccent),
        KEY_FIVE => Accent::from_index(5).map(Command::SetAccent),
        _ => None,
    }
}
