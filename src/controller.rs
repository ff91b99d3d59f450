use std::path::Path;
use tracing::{debug, info, warn};
use crate::error::{OverlayError, OverlayResult};
use crate::media::{Accept, MediaAsset, MediaHandle, MediaIntake, MediaKind};
use crate::notice::{Notice, Notifier};
use crate::presentation::{PresentationGateway, PresentationPolicy};
use crate::settings::{Accent, DisplaySettings};
use crate::state::{reduce, Action, OverlayState, PresentationPhase};

/// Result of an accepted selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intake {
    pub handle: MediaHandle,
    pub kind: MediaKind,
    /// Asset superseded by this one; its resources are released on the next
    /// render sync.
    pub replaced: Option<MediaHandle>,
}

/// Owns the overlay state and runs user actions through the reducer,
/// performing gateway calls around the presentation transitions.
pub struct OverlayController {
    state: OverlayState,
    policy: PresentationPolicy,
    intake: MediaIntake,
}

impl OverlayController {
    pub fn new(settings: DisplaySettings, policy: PresentationPolicy, accept: Accept) -> Self {
        Self {
            state: OverlayState::new(settings),
            policy,
            intake: MediaIntake::new(accept),
        }
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn media(&self) -> Option<&MediaAsset> {
        self.state.media.as_ref()
    }

    pub fn accept(&self) -> Accept {
        self.intake.accept()
    }

    fn dispatch(&mut self, action: Action) {
        debug!(?action, "reduce");
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
    }

    pub fn select_media(&mut self, path: &Path, notifier: &mut impl Notifier) -> OverlayResult<Intake> {
        let asset = match self.intake.admit(path) {
            Ok(asset) => asset,
            Err(e) => {
                let title = match &e {
                    OverlayError::UnsupportedMediaType { .. } => match self.intake.accept() {
                        Accept::VideoOnly => "Choose a video file",
                        Accept::VideoAndImage => "Choose a video or image file",
                    },
                    _ => "Could not open file",
                };
                notifier.notify(Notice::error(title).with_description(e.to_string()));
                return Err(e);
            }
        };

        let replaced = self.state.media.as_ref().map(|old| old.handle);
        if let Some(old) = replaced {
            info!(?old, "releasing previous media");
        }

        let intake = Intake { handle: asset.handle, kind: asset.kind, replaced };
        let title = match asset.kind {
            MediaKind::Video => "Video loaded!",
            MediaKind::Image => "Image loaded!",
        };
        self.dispatch(Action::MediaAccepted(asset));
        notifier.notify(Notice::success(title).with_description("It now floats across the screen"));

        Ok(intake)
    }

    pub fn set_opacity(&mut self, percent: u8) {
        self.dispatch(Action::SetOpacity(percent));
    }

    pub fn set_accent(&mut self, accent: Accent) {
        self.dispatch(Action::SetAccent(accent));
    }

    pub fn set_animation_period(&mut self, secs: u8) {
        self.dispatch(Action::SetAnimationPeriod(secs));
    }

    /// Inactive -> Active. Ignored while a request is in flight or overlay
    /// mode is already on.
    pub fn activate(&mut self, gateway: &mut impl PresentationGateway, notifier: &mut impl Notifier) {
        if self.state.presentation.phase != PresentationPhase::Inactive {
            debug!(phase = ?self.state.presentation.phase, "activation ignored");
            return;
        }
        self.dispatch(Action::PresentationRequested);

        if self.policy.is_optimistic() {
            if let Err(e) = gateway.request_notifications() {
                warn!("notification permission not granted: {}", e);
            }
            if let Err(e) = gateway.request_wake_lock() {
                warn!("wake lock not granted: {}", e);
            }
        }

        match gateway.enter_presentation_mode() {
            Ok(()) => {
                self.dispatch(Action::PresentationGranted);
                info!("overlay mode on");
                notifier.notify(
                    Notice::success("Always-on-top enabled")
                        .with_description("Press Esc or the button again to leave"),
                );
            }
            Err(e) => {
                warn!("fullscreen refused: {}", e);
                let optimistic = self.policy.is_optimistic();
                self.dispatch(Action::PresentationRefused { optimistic });
                let notice = Notice::info("Fullscreen unavailable").with_description(
                    "Maximise the window or use your window manager's fullscreen shortcut",
                );
                notifier.notify(notice);
            }
        }
    }

    /// Active -> Inactive on user request.
    pub fn deactivate(&mut self, gateway: &mut impl PresentationGateway, notifier: &mut impl Notifier) {
        if !self.state.presentation.is_overlay_active() {
            return;
        }
        if let Err(e) = gateway.exit_presentation_mode() {
            warn!("leaving fullscreen failed: {}", e);
        }
        self.dispatch(Action::PresentationEnded { external: false });
        info!("overlay mode off");
        notifier.notify(Notice::info("Always-on-top disabled"));
    }

    pub fn toggle_presentation(&mut self, gateway: &mut impl PresentationGateway, notifier: &mut impl Notifier) {
        if self.state.presentation.is_overlay_active() {
            self.deactivate(gateway, notifier);
        } else {
            self.activate(gateway, notifier);
        }
    }

    pub fn toggle_panel(&mut self) {
        self.dispatch(Action::TogglePanel);
    }

    /// Picks up a fullscreen exit the user or window manager caused. Returns
    /// true when the overlay was switched off because of it.
    pub fn poll_external_exit(&mut self, gateway: &mut impl PresentationGateway, notifier: &mut impl Notifier) -> bool {
        if !gateway.take_external_exit() || !self.state.presentation.is_overlay_active() {
            return false;
        }
        self.dispatch(Action::PresentationEnded { external: true });
        info!("overlay mode ended externally");
        notifier.notify(Notice::info("Left fullscreen").with_description("Always-on-top disabled"));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::path::PathBuf;
    use crate::notice::Level;

    #[derive(Default)]
    struct FakeGateway {
        refuse_fullscreen: bool,
        refuse_wake_lock: bool,
        fullscreen: bool,
        external_exit: bool,
        calls: Vec<&'static str>,
    }

    impl PresentationGateway for FakeGateway {
        fn enter_presentation_mode(&mut self) -> OverlayResult<()> {
            self.calls.push("enter");
            if self.refuse_fullscreen {
                return Err(OverlayError::FullscreenRequestFailed("denied".into()));
            }
            self.fullscreen = true;
            Ok(())
        }

        fn exit_presentation_mode(&mut self) -> OverlayResult<()> {
            self.calls.push("exit");
            self.fullscreen = false;
            Ok(())
        }

        fn request_wake_lock(&mut self) -> OverlayResult<()> {
            self.calls.push("wake_lock");
            if self.refuse_wake_lock {
                return Err(OverlayError::PermissionDenied("wake lock".into()));
            }
            Ok(())
        }

        fn request_notifications(&mut self) -> OverlayResult<()> {
            self.calls.push("notifications");
            Ok(())
        }

        fn take_external_exit(&mut self) -> bool {
            std::mem::take(&mut self.external_exit)
        }
    }

    #[derive(Default)]
    struct Recorder(Vec<Notice>);

    impl Notifier for Recorder {
        fn notify(&mut self, notice: Notice) {
            self.0.push(notice);
        }
    }

    impl Recorder {
        fn last_level(&self) -> Option<Level> {
            self.0.last().map(|n| n.level)
        }
    }

    fn controller(policy: PresentationPolicy) -> OverlayController {
        OverlayController::new(DisplaySettings::default(), policy, Accept::VideoAndImage)
    }

    fn touch(dir: &tempfile::TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        File::create(&path).unwrap();
        path
    }

    #[test]
    fn rejected_file_leaves_media_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let video = touch(&dir, "clip.mp4");
        let text = touch(&dir, "notes.txt");
        let mut notes = Recorder::default();
        let mut c = controller(PresentationPolicy::Minimal);

        c.select_media(&video, &mut notes).unwrap();
        let before = c.media().cloned();

        assert!(c.select_media(&text, &mut notes).is_err());
        assert_eq!(c.media().cloned(), before);
        assert_eq!(notes.last_level(), Some(Level::Error));
    }

    #[test]
    fn accepted_files_set_kind_and_handle() {
        let dir = tempfile::tempdir().unwrap();
        let mut notes = Recorder::default();
        let mut c = controller(PresentationPolicy::Minimal);

        let video = c.select_media(&touch(&dir, "clip.webm"), &mut notes).unwrap();
        assert_eq!(c.media().map(|m| m.kind), Some(MediaKind::Video));
        assert_eq!(c.media().map(|m| m.handle), Some(video.handle));
        assert_eq!(notes.0.last().unwrap().title, "Video loaded!");

        let image = c.select_media(&touch(&dir, "still.png"), &mut notes).unwrap();
        assert_eq!(c.media().map(|m| m.kind), Some(MediaKind::Image));
        assert_eq!(image.replaced, Some(video.handle));
        assert_eq!(notes.0.last().unwrap().title, "Image loaded!");
    }

    #[test]
    fn activation_success_grants_permission() {
        let mut gateway = FakeGateway::default();
        let mut notes = Recorder::default();
        let mut c = controller(PresentationPolicy::Minimal);

        c.activate(&mut gateway, &mut notes);
        assert!(c.state().presentation.is_overlay_active());
        assert!(c.state().permission.granted);
        assert_eq!(gateway.calls, vec!["enter"]);
        assert_eq!(notes.last_level(), Some(Level::Success));
    }

    #[test]
    fn minimal_policy_stays_inactive_on_refusal() {
        let mut gateway = FakeGateway { refuse_fullscreen: true, ..Default::default() };
        let mut notes = Recorder::default();
        let mut c = controller(PresentationPolicy::Minimal);

        c.activate(&mut gateway, &mut notes);
        assert!(!c.state().presentation.is_overlay_active());
        assert!(!c.state().permission.granted);
        assert_eq!(notes.last_level(), Some(Level::Info));
    }

    #[test]
    fn optimistic_policy_proceeds_without_granting() {
        let mut gateway = FakeGateway {
            refuse_fullscreen: true,
            refuse_wake_lock: true,
            ..Default::default()
        };
        let mut notes = Recorder::default();
        let mut c = controller(PresentationPolicy::Optimistic);

        c.activate(&mut gateway, &mut notes);
        assert!(c.state().presentation.is_overlay_active());
        assert!(!c.state().permission.granted);
        assert_eq!(gateway.calls, vec!["notifications", "wake_lock", "enter"]);
    }

    #[test]
    fn optional_permission_failure_does_not_block() {
        let mut gateway = FakeGateway { refuse_wake_lock: true, ..Default::default() };
        let mut notes = Recorder::default();
        let mut c = controller(PresentationPolicy::Optimistic);

        c.activate(&mut gateway, &mut notes);
        assert!(c.state().presentation.is_overlay_active());
        assert!(c.state().permission.granted);
        assert!(gateway.fullscreen);
    }

    #[test]
    fn repeated_activation_is_ignored() {
        let mut gateway = FakeGateway::default();
        let mut notes = Recorder::default();
        let mut c = controller(PresentationPolicy::Minimal);

        c.activate(&mut gateway, &mut notes);
        c.activate(&mut gateway, &mut notes);
        assert_eq!(gateway.calls, vec!["enter"]);
    }

    #[test]
    fn toggling_off_resets_panel_hidden() {
        let mut gateway = FakeGateway::default();
        let mut notes = Recorder::default();
        let mut c = controller(PresentationPolicy::Minimal);

        c.toggle_presentation(&mut gateway, &mut notes);
        c.toggle_panel();
        assert!(c.state().presentation.is_panel_hidden());

        c.toggle_presentation(&mut gateway, &mut notes);
        assert!(!c.state().presentation.is_overlay_active());
        assert!(!c.state().presentation.is_panel_hidden());
        assert!(!gateway.fullscreen);
    }

    #[test]
    fn external_exit_resets_every_flag() {
        let mut gateway = FakeGateway::default();
        let mut notes = Recorder::default();
        let mut c = controller(PresentationPolicy::Optimistic);

        c.activate(&mut gateway, &mut notes);
        c.toggle_panel();
        assert!(!c.poll_external_exit(&mut gateway, &mut notes));

        gateway.external_exit = true;
        assert!(c.poll_external_exit(&mut gateway, &mut notes));
        assert!(!c.state().presentation.is_overlay_active());
        assert!(!c.state().presentation.is_panel_hidden());
        assert!(!c.state().permission.granted);
    }

    #[test]
    fn external_exit_while_inactive_is_dropped() {
        let mut gateway = FakeGateway { external_exit: true, ..Default::default() };
        let mut notes = Recorder::default();
        let mut c = controller(PresentationPolicy::Minimal);

        assert!(!c.poll_external_exit(&mut gateway, &mut notes));
        assert!(notes.0.is_empty());
        assert!(!gateway.external_exit);
    }

    #[test]
    fn settings_setters_are_direct() {
        let mut c = controller(PresentationPolicy::Minimal);
        c.set_opacity(75);
        c.set_animation_period(10);
        c.set_accent(Accent::Green);

        let settings = c.state().settings;
        assert!((settings.opacity_fraction() - 0.75).abs() < f32::EPSILON);
        assert_eq!(settings.animation_period_secs(), 10);
        assert_eq!(settings.accent(), Accent::Green);
    }
}
