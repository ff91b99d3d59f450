use crate::media::MediaAsset;
use crate::settings::{Accent, DisplaySettings};

#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub enum PresentationPhase {
    #[default]
    Inactive,              // Windowed, overlay mode off
    RequestingPermission,  // Fullscreen/permission request in flight
    Active { panel_hidden: bool },
}

#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct PresentationState {
    pub phase: PresentationPhase,
}

impl PresentationState {
    pub fn is_overlay_active(&self) -> bool {
        matches!(self.phase, PresentationPhase::Active { .. })
    }

    pub fn is_panel_hidden(&self) -> bool {
        matches!(self.phase, PresentationPhase::Active { panel_hidden: true })
    }

    pub fn is_requesting(&self) -> bool {
        self.phase == PresentationPhase::RequestingPermission
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct PermissionState {
    pub granted: bool,
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct OverlayState {
    pub media: Option<MediaAsset>,
    pub settings: DisplaySettings,
    pub presentation: PresentationState,
    pub permission: PermissionState,
}

impl OverlayState {
    pub fn new(settings: DisplaySettings) -> Self {
        Self { settings, ..Self::default() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    MediaAccepted(MediaAsset),
    SetOpacity(u8),
    SetAccent(Accent),
    SetAnimationPeriod(u8),
    PresentationRequested,
    PresentationGranted,
    /// Fullscreen was refused. `optimistic` keeps the overlay active anyway.
    PresentationRefused { optimistic: bool },
    /// Left overlay mode, either on request or because the window left
    /// fullscreen behind our back.
    PresentationEnded { external: bool },
    TogglePanel,
}

/// Maps `(state, action)` to the next state. No side effects.
pub fn reduce(mut state: OverlayState, action: Action) -> OverlayState {
    use PresentationPhase::*;

    match action {
        Action::MediaAccepted(asset) => {
            state.media = Some(asset);
        }
        Action::SetOpacity(percent) => state.settings.set_opacity(percent),
        Action::SetAccent(accent) => state.settings.set_accent(accent),
        Action::SetAnimationPeriod(secs) => state.settings.set_animation_period(secs),
        Action::PresentationRequested => {
            if state.presentation.phase == Inactive {
                state.presentation.phase = RequestingPermission;
            }
        }
        Action::PresentationGranted => {
            if state.presentation.phase == RequestingPermission {
                state.presentation.phase = Active { panel_hidden: false };
                state.permission.granted = true;
            }
        }
        Action::PresentationRefused { optimistic } => {
            if state.presentation.phase == RequestingPermission {
                state.presentation.phase = if optimistic {
                    Active { panel_hidden: false }
                } else {
                    Inactive
                };
            }
        }
        Action::PresentationEnded { external } => {
            state.presentation.phase = Inactive;
            if external {
                state.permission.granted = false;
            }
        }
        Action::TogglePanel => {
            if let Active { panel_hidden } = state.presentation.phase {
                state.presentation.phase = Active { panel_hidden: !panel_hidden };
            }
        }
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use crate::media::{MediaHandle, MediaKind};

    fn active(panel_hidden: bool) -> OverlayState {
        let mut state = OverlayState::default();
        state.presentation.phase = PresentationPhase::Active { panel_hidden };
        state
    }

    fn run(actions: Vec<Action>) -> OverlayState {
        actions.into_iter().fold(OverlayState::default(), reduce)
    }

    #[test]
    fn request_then_grant_activates_and_records_permission() {
        let state = run(vec![Action::PresentationRequested, Action::PresentationGranted]);
        assert!(state.presentation.is_overlay_active());
        assert!(!state.presentation.is_panel_hidden());
        assert!(state.permission.granted);
    }

    #[test]
    fn refusal_depends_on_policy() {
        let minimal = run(vec![
            Action::PresentationRequested,
            Action::PresentationRefused { optimistic: false },
        ]);
        assert_eq!(minimal.presentation.phase, PresentationPhase::Inactive);

        let optimistic = run(vec![
            Action::PresentationRequested,
            Action::PresentationRefused { optimistic: true },
        ]);
        assert!(optimistic.presentation.is_overlay_active());
        assert!(!optimistic.permission.granted);
    }

    #[test]
    fn grant_without_request_is_ignored() {
        let state = run(vec![Action::PresentationGranted]);
        assert_eq!(state, OverlayState::default());
    }

    #[test]
    fn second_request_while_active_is_ignored() {
        let before = active(true);
        let after = reduce(before.clone(), Action::PresentationRequested);
        assert_eq!(before, after);
    }

    #[test]
    fn ending_always_clears_panel_hidden() {
        for hidden in [false, true] {
            for external in [false, true] {
                let state = reduce(active(hidden), Action::PresentationEnded { external });
                assert!(!state.presentation.is_overlay_active());
                assert!(!state.presentation.is_panel_hidden());
            }
        }
    }

    #[test]
    fn only_external_exit_revokes_permission() {
        let mut state = active(false);
        state.permission.granted = true;

        let explicit = reduce(state.clone(), Action::PresentationEnded { external: false });
        assert!(explicit.permission.granted);

        let external = reduce(state, Action::PresentationEnded { external: true });
        assert!(!external.permission.granted);
    }

    #[test]
    fn panel_toggles_only_while_active() {
        let inactive = reduce(OverlayState::default(), Action::TogglePanel);
        assert!(!inactive.presentation.is_panel_hidden());

        let hidden = reduce(active(false), Action::TogglePanel);
        assert!(hidden.presentation.is_panel_hidden());
        let shown = reduce(hidden, Action::TogglePanel);
        assert!(shown.presentation.is_overlay_active());
        assert!(!shown.presentation.is_panel_hidden());
    }

    #[test]
    fn settings_actions_write_through() {
        let state = run(vec![
            Action::SetOpacity(75),
            Action::SetAnimationPeriod(10),
            Action::SetAccent(Accent::Green),
        ]);
        assert_eq!(state.settings.opacity_percent(), 75);
        assert_eq!(state.settings.animation_period_secs(), 10);
        assert_eq!(state.settings.accent(), Accent::Green);
    }

    #[test]
    fn media_replaces_previous_asset() {
        let first = MediaAsset { handle: MediaHandle(1), kind: MediaKind::Video, path: PathBuf::from("a.mp4") };
        let second = MediaAsset { handle: MediaHandle(2), kind: MediaKind::Image, path: PathBuf::from("b.png") };
        let state = run(vec![Action::MediaAccepted(first), Action::MediaAccepted(second.clone())]);
        assert_eq!(state.media, Some(second));
    }
}
