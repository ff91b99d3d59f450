pub const DECODE_WIDTH: i32 = 1280;           // Width of decoded video frames
pub const DECODE_HEIGHT: i32 = 720;           // Height of decoded video frames
pub const FPS: u32 = 60;                      // Frames per second

pub const DRIFT_AMPLITUDE: f32 = 24.0;        // Peak floating offset (pixels)
pub const TOAST_TTL: f32 = 4.0;               // Lifetime of a toast (seconds)
pub const MAX_TOASTS: usize = 4;              // Toasts drawn at once

pub const OPACITY_STEP: u8 = 5;               // Keyboard nudge for opacity (percent)
