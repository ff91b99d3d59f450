use std::process::{Child, Command, Stdio};
use raylib::prelude::*;
use tracing::{debug, info, warn};
use crate::error::{OverlayError, OverlayResult};
use crate::presentation::PresentationGateway;

/// Keeps the display awake by holding a platform idle inhibitor process.
pub struct WakeLock {
    process: Child,
}

impl WakeLock {
    fn inhibitor() -> Option<Command> {
        if cfg!(target_os = "linux") {
            let mut command = Command::new("systemd-inhibit");
            command.args([
                "--what=idle",
                "--who=screenfloat",
                "--why=Overlay is on screen",
                "sleep",
                "infinity",
            ]);
            Some(command)
        } else if cfg!(target_os = "macos") {
            let mut command = Command::new("caffeinate");
            command.arg("-d");
            Some(command)
        } else {
            None
        }
    }

    pub fn acquire() -> OverlayResult<WakeLock> {
        let mut command = Self::inhibitor()
            .ok_or_else(|| OverlayError::PermissionDenied("wake lock is not supported on this platform".into()))?;
        let process = command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| OverlayError::PermissionDenied(format!("wake lock: {}", e)))?;
        info!(pid = process.id(), "wake lock acquired");
        Ok(WakeLock { process })
    }
}

impl Drop for WakeLock {
    fn drop(&mut self) {
        if let Err(e) = self.process.kill() {
            debug!("idle inhibitor already exited: {}", e);
        }
        if let Err(e) = self.process.wait() {
            warn!("failed to wait for idle inhibitor: {}", e);
        }
        info!("wake lock released");
    }
}

/// Presentation bookkeeping that outlives a single frame.
#[derive(Default)]
pub struct DesktopSession {
    engaged: bool,
    wake_lock: Option<WakeLock>,
}

impl DesktopSession {
    fn release(&mut self) {
        self.engaged = false;
        self.wake_lock = None;
    }
}

/// Whether presentation mode was left from outside the panel: Escape, the
/// window being minimised (fullscreen windows iconify when focus moves away),
/// or the fullscreen flag dropping. raylib owns that flag, so a window manager
/// resizing the window without minimising it goes unnoticed.
pub fn external_exit(engaged: bool, fullscreen: bool, escaped: bool, minimized: bool) -> bool {
    engaged && (escaped || minimized || !fullscreen)
}

/// Gateway backed by the raylib window. Borrowed for the input step of a frame.
pub struct RaylibGateway<'a> {
    rl: &'a mut RaylibHandle,
    session: &'a mut DesktopSession,
}

impl<'a> RaylibGateway<'a> {
    pub fn new(rl: &'a mut RaylibHandle, session: &'a mut DesktopSession) -> Self {
        Self { rl, session }
    }

    fn set_topmost(&mut self, enabled: bool) {
        let state = WindowState::default().set_window_topmost(true);
        if enabled {
            self.rl.set_window_state(state);
        } else {
            self.rl.clear_window_state(state);
        }
    }

    fn leave_fullscreen(&mut self) {
        if self.rl.is_window_fullscreen() {
            self.rl.toggle_fullscreen();
        }
        self.set_topmost(false);
    }
}

impl PresentationGateway for RaylibGateway<'_> {
    fn enter_presentation_mode(&mut self) -> OverlayResult<()> {
        if !self.rl.is_window_fullscreen() {
            self.rl.toggle_fullscreen();
        }
        if !self.rl.is_window_fullscreen() {
            return Err(OverlayError::FullscreenRequestFailed(
                "the window manager kept the window windowed".into(),
            ));
        }
        self.set_topmost(true);
        self.session.engaged = true;
        Ok(())
    }

    fn exit_presentation_mode(&mut self) -> OverlayResult<()> {
        self.leave_fullscreen();
        self.session.release();
        if self.rl.is_window_fullscreen() {
            return Err(OverlayError::FullscreenRequestFailed("window is still fullscreen".into()));
        }
        Ok(())
    }

    fn request_wake_lock(&mut self) -> OverlayResult<()> {
        if self.session.wake_lock.is_none() {
            self.session.wake_lock = Some(WakeLock::acquire()?);
        }
        Ok(())
    }

    fn request_notifications(&mut self) -> OverlayResult<()> {
        // In-window toasts need no grant
        Ok(())
    }

    fn take_external_exit(&mut self) -> bool {
        if !self.session.engaged {
            return false;
        }
        let fullscreen = self.rl.is_window_fullscreen();
        let escaped = self.rl.is_key_pressed(KeyboardKey::KEY_ESCAPE);
        let minimized = self.rl.is_window_minimized();
        if !external_exit(self.session.engaged, fullscreen, escaped, minimized) {
            return false;
        }
        debug!(fullscreen, escaped, minimized, "fullscreen left outside the panel");
        self.leave_fullscreen();
        self.session.release();
        true
    }
}
