use std::collections::VecDeque;
use tracing::{error, info};
use crate::constants::{MAX_TOASTS, TOAST_TTL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub title: String,
    pub description: Option<String>,
}

impl Notice {
    fn new(level: Level, title: impl Into<String>) -> Self {
        Self { level, title: title.into(), description: None }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(Level::Success, title)
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(Level::Info, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(Level::Error, title)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Where user-facing messages go.
pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

#[derive(Debug)]
pub struct Toast {
    pub notice: Notice,
    age: f32,
}

impl Toast {
    /// Remaining life as a fraction, used to fade the toast out.
    pub fn remaining(&self) -> f32 {
        (1.0 - self.age / TOAST_TTL).clamp(0.0, 1.0)
    }
}

/// Transient toast stack drawn in the window corner. Every notice is also
/// mirrored to the log.
#[derive(Debug, Default)]
pub struct Toaster {
    toasts: VecDeque<Toast>,
}

impl Toaster {
    pub fn update(&mut self, dt: f32) {
        for toast in self.toasts.iter_mut() {
            toast.age += dt;
        }
        self.toasts.retain(|toast| toast.age < TOAST_TTL);
    }

    /// Newest toasts, newest first.
    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter().rev().take(MAX_TOASTS)
    }
}

impl Notifier for Toaster {
    fn notify(&mut self, notice: Notice) {
        let description = notice.description.as_deref().unwrap_or("");
        match notice.level {
            Level::Error => error!(title = %notice.title, description, "notice"),
            _ => info!(title = %notice.title, description, "notice"),
        }
        self.toasts.push_back(Toast { notice, age: 0.0 });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_expire_after_ttl() {
        let mut toaster = Toaster::default();
        toaster.notify(Notice::success("Video loaded"));
        toaster.update(TOAST_TTL * 0.5);
        assert_eq!(toaster.visible().count(), 1);

        toaster.notify(Notice::info("Later"));
        toaster.update(TOAST_TTL * 0.6);
        assert_eq!(toaster.visible().count(), 1);
        assert_eq!(toaster.visible().next().unwrap().notice.title, "Later");
    }

    #[test]
    fn visible_caps_and_orders_newest_first() {
        let mut toaster = Toaster::default();
        for i in 0..MAX_TOASTS + 2 {
            toaster.notify(Notice::error(format!("error {}", i)));
        }
        let titles: Vec<_> = toaster.visible().map(|t| t.notice.title.clone()).collect();
        assert_eq!(titles.len(), MAX_TOASTS);
        assert_eq!(titles[0], format!("error {}", MAX_TOASTS + 1));
    }

    #[test]
    fn description_is_optional() {
        let notice = Notice::info("Fullscreen").with_description("Press Esc to leave");
        assert_eq!(notice.level, Level::Info);
        assert_eq!(notice.description.as_deref(), Some("Press Esc to leave"));
        assert!(Notice::success("ok").description.is_none());
    }
}
