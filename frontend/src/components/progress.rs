//! Blocking overlay shown while a request is in flight.

use leptos::*;

use super::logs::LogsPanel;
use crate::LogEntry;

#[component]
pub fn ProgressOverlay(
    /// Progress text
    #[prop(into)]
    message: MaybeSignal<String>,
    /// Live backend logs, when the caller wants them shown
    logs: Option<RwSignal<Vec<LogEntry>>>,
) -> impl IntoView {
    view! {
        <div class="progress-overlay">
            <div class="progress-modal">
                <div class="spinner"></div>
                <div class="progress-message">{move || message.get()}</div>
                {logs.map(|logs| view! { <LogsPanel logs=logs/> })}
            </div>
        </div>
    }
}
