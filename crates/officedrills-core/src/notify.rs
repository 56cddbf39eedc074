//! Desktop notification port.

use std::sync::Mutex;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    /// Volume in `0.0..=1.0` when a sound should accompany the message.
    pub sound: Option<f64>,
}

impl Notification {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            sound: None,
        }
    }

    pub fn with_sound(mut self, volume: Option<f64>) -> Self {
        self.sound = volume;
        self
    }

    /// True when a sound was requested at a non-zero volume.
    pub fn audible(&self) -> bool {
        self.sound.is_some_and(|volume| volume > 0.0)
    }
}

pub trait Notifier {
    fn notify(&self, notification: &Notification);
}

/// Writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: &Notification) {
        info!(
            title = %notification.title,
            body = %notification.body,
            sound = ?notification.sound,
            "notification"
        );
    }
}

/// Drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _notification: &Notification) {}
}

/// Keeps every notification it receives, for inspection.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) {
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notification.clone());
    }
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, notification: &Notification) {
        (**self).notify(notification)
    }
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&self, notification: &Notification) {
        (**self).notify(notification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_notifier_sees_calls_through_indirection() {
        let recorder = RecordingNotifier::new();
        let boxed: Box<dyn Notifier + '_> = Box::new(&recorder);
        boxed.notify(&Notification::new("Time for a break!", "now"));
        NullNotifier.notify(&Notification::new("ignored", "ignored"));
        LogNotifier.notify(&Notification::new("logged", "only"));
        assert_eq!(
            recorder.sent(),
            vec![Notification::new("Time for a break!", "now")]
        );
    }

    #[test]
    fn audible_needs_sound_and_volume() {
        let silent = Notification::new("t", "b");
        assert!(!silent.audible());
        assert!(!silent.clone().with_sound(Some(0.0)).audible());
        assert!(silent.with_sound(Some(0.4)).audible());
    }
}
