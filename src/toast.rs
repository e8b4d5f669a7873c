/// How long a toast stays on screen, in seconds
pub const TOAST_SECONDS: f64 = 3.0;

#[derive(Debug, Clone, PartialEq)]
struct Toast {
    text: String,
    expires_at: f64,
}

/// A single transient notification; a new one replaces the old.
///
/// Times are egui input time in seconds.
#[derive(Debug, Default)]
pub struct Toasts {
    current: Option<Toast>,
}

impl Toasts {
    pub fn show(&mut self, text: impl Into<String>, now: f64) {
        self.current = Some(Toast {
            text: text.into(),
            expires_at: now + TOAST_SECONDS,
        });
    }

    /// The visible message, dropping it once expired
    pub fn current(&mut self, now: f64) -> Option<&str> {
        if self.current.as_ref().is_some_and(|toast| now >= toast.expires_at) {
            self.current = None;
        }
        self.current.as_ref().map(|toast| toast.text.as_str())
    }

    /// Seconds until the visible toast expires
    pub fn remaining(&self, now: f64) -> Option<f64> {
        self.current.as_ref().map(|toast| (toast.expires_at - now).max(0.0))
    }
}
