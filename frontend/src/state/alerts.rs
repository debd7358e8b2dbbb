//! Alert banners, newest first.

/// Banner severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Danger,
    Info,
}

impl Severity {
    pub fn css_class(&self) -> &'static str {
        match self {
            Severity::Success => "alert alert-success",
            Severity::Warning => "alert alert-warning",
            Severity::Danger => "alert alert-danger",
            Severity::Info => "alert alert-info",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Alert {
    pub id: u64,
    pub severity: Severity,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AlertQueue {
    alerts: Vec<Alert>,
    next_id: u64,
}

impl AlertQueue {
    /// Insert a banner at the top, returning its id for the dismiss timer.
    pub fn push(&mut self, severity: Severity, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.alerts.insert(0, Alert { id, severity, message: message.into() });
        id
    }

    /// Remove a banner. Dismissing twice is a no-op returning `false`.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.alerts.len();
        self.alerts.retain(|alert| alert.id != id);
        self.alerts.len() != before
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}
