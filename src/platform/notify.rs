//! Floating text notifications
//!
//! A notification rises from the middle of the canvas and fades out over its
//! lifetime. Only the latest one is shown.

use crate::consts::{CANVAS_HEIGHT, NOTIFICATION_FRAMES, REFERENCE_FRAME_MS};
use crate::frame_multiplier;
use crate::i18n::{Lang, notice_color, notice_text};
use crate::sim::Notice;

/// Default notification colour
pub const DEFAULT_COLOR: &str = "#22c55e";

/// A message to show the player
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub text: String,
    pub color: &'static str,
    pub duration_ms: f32,
}

impl Notification {
    pub fn new(text: impl Into<String>, color: &'static str) -> Self {
        Self {
            text: text.into(),
            color,
            duration_ms: NOTIFICATION_FRAMES * REFERENCE_FRAME_MS,
        }
    }

    /// Localized notification for a simulation notice
    pub fn from_notice(notice: Notice, lang: Lang) -> Self {
        Self::new(notice_text(notice, lang), notice_color(notice))
    }
}

/// Receives notifications
pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}

/// A notification currently on screen
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveNotification {
    pub notification: Notification,
    pub remaining_ms: f32,
    pub y: f32,
}

impl ActiveNotification {
    /// 1.0 when fresh, 0.0 when expired
    pub fn opacity(&self) -> f32 {
        (self.remaining_ms / self.notification.duration_ms).clamp(0.0, 1.0)
    }
}

/// Keeps the most recent notification and animates it
#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    current: Option<ActiveNotification>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&ActiveNotification> {
        self.current.as_ref()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Rise one unit per reference frame and expire
    pub fn advance(&mut self, dt_ms: f32) {
        let Some(active) = self.current.as_mut() else {
            return;
        };
        active.y -= frame_multiplier(dt_ms);
        active.remaining_ms -= dt_ms;
        if active.remaining_ms <= 0.0 {
            self.current = None;
        }
    }
}

impl NotificationSink for NotificationQueue {
    fn notify(&mut self, notification: Notification) {
        self.current = Some(ActiveNotification {
            remaining_ms: notification.duration_ms,
            y: CANVAS_HEIGHT / 2.0,
            notification,
        });
    }
}
