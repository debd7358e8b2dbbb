//! Upload widget configuration and state machine.
//!
//! ```text
//! Idle ──queue──▶ Queued ──submit──▶ Submitting ──Success──▶ Redirected
//!   ▲                                     │
//!   └──────────────── Failure ────────────┘
//! ```

/// What the widget accepts and how it blocks the page.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadConfig {
    /// `accept` attribute of the file input.
    pub accept: &'static str,
    /// Full-page overlay while submitting.
    pub overlay: bool,
    pub prompt: &'static str,
}

impl UploadConfig {
    /// Audit reports, used on the home page.
    pub fn documents() -> Self {
        Self {
            accept: ".txt,.pdf",
            overlay: true,
            prompt: "Drop a .txt or .pdf audit report here",
        }
    }

    /// Receipt images, without the blocking overlay.
    ///
    /// Library preset: no page mounts it, since the backend extracts text
    /// and PDF reports only and answers images with `UnsupportedType`.
    pub fn images() -> Self {
        Self {
            accept: "image/*",
            overlay: false,
            prompt: "Drop an image here",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadPhase {
    Idle,
    Queued,
    Submitting,
    Redirected,
}

/// Result of an awaited upload call.
#[derive(Clone, Debug, PartialEq)]
pub enum UploadOutcome {
    Success,
    Failure { message: String },
}

/// What the view does after a transition.
#[derive(Clone, Debug, PartialEq)]
pub enum UploadEffect {
    /// Warn, nothing was queued.
    WarnEmpty,
    Redirect,
    ShowError(String),
    /// Call ignored in the current phase.
    None,
}

/// Single-file upload queue. `F` is the browser file handle.
#[derive(Clone, Debug)]
pub struct UploadMachine<F> {
    phase: UploadPhase,
    queued: Option<F>,
}

impl<F> Default for UploadMachine<F> {
    fn default() -> Self {
        Self { phase: UploadPhase::Idle, queued: None }
    }
}

impl<F: Clone> UploadMachine<F> {
    pub fn phase(&self) -> UploadPhase {
        self.phase
    }

    pub fn queued(&self) -> Option<&F> {
        self.queued.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == UploadPhase::Submitting
    }

    /// Queue a file, replacing any earlier one.
    pub fn queue(&mut self, file: F) {
        if matches!(self.phase, UploadPhase::Idle | UploadPhase::Queued) {
            self.queued = Some(file);
            self.phase = UploadPhase::Queued;
        }
    }

    /// Start submitting, yielding the file to send.
    pub fn submit(&mut self) -> Result<F, UploadEffect> {
        match self.phase {
            UploadPhase::Queued => match self.queued.clone() {
                Some(file) => {
                    self.phase = UploadPhase::Submitting;
                    Ok(file)
                }
                None => {
                    self.phase = UploadPhase::Idle;
                    Err(UploadEffect::WarnEmpty)
                }
            },
            UploadPhase::Idle => Err(UploadEffect::WarnEmpty),
            UploadPhase::Submitting | UploadPhase::Redirected => Err(UploadEffect::None),
        }
    }

    /// Apply the upload result.
    pub fn finish(&mut self, outcome: UploadOutcome) -> UploadEffect {
        if self.phase != UploadPhase::Submitting {
            return UploadEffect::None;
        }
        match outcome {
            UploadOutcome::Success => {
                self.phase = UploadPhase::Redirected;
                UploadEffect::Redirect
            }
            UploadOutcome::Failure { message } => {
                self.phase = UploadPhase::Idle;
                self.queued = None;
                UploadEffect::ShowError(message)
            }
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() {
            "Processing..."
        } else {
            "Process File"
        }
    }

    pub fn overlay_visible(&self, config: &UploadConfig) -> bool {
        config.overlay && self.is_submitting()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_queue_warns() {
        let mut machine = UploadMachine::<&str>::default();
        assert_eq!(machine.submit(), Err(UploadEffect::WarnEmpty));
        assert_eq!(machine.phase(), UploadPhase::Idle);
    }

    #[test]
    fn test_second_file_replaces_first() {
        let mut machine = UploadMachine::default();
        machine.queue("a.txt");
        machine.queue("b.pdf");
        assert_eq!(machine.queued(), Some(&"b.pdf"));
        assert_eq!(machine.submit(), Ok("b.pdf"));
    }

    #[test]
    fn test_success_redirects() {
        let mut machine = UploadMachine::default();
        machine.queue("a.txt");
        machine.submit().unwrap();

        assert_eq!(machine.submit_label(), "Processing...");
        assert!(machine.overlay_visible(&UploadConfig::documents()));
        assert!(!machine.overlay_visible(&UploadConfig::images()));
        assert_eq!(machine.submit(), Err(UploadEffect::None));

        assert_eq!(machine.finish(UploadOutcome::Success), UploadEffect::Redirect);
        assert_eq!(machine.phase(), UploadPhase::Redirected);
    }

    #[test]
    fn test_failure_returns_to_idle() {
        let mut machine = UploadMachine::default();
        machine.queue("a.png");
        machine.submit().unwrap();

        let effect = machine.finish(UploadOutcome::Failure { message: "File type not allowed".into() });
        assert_eq!(effect, UploadEffect::ShowError("File type not allowed".into()));
        assert_eq!(machine.phase(), UploadPhase::Idle);
        assert_eq!(machine.submit_label(), "Process File");
        assert!(!machine.overlay_visible(&UploadConfig::documents()));
    }

    #[test]
    fn test_presets() {
        assert_eq!(UploadConfig::documents().accept, ".txt,.pdf");
        assert_eq!(UploadConfig::images().accept, "image/*");
    }
}
