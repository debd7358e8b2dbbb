//! Single-file upload widget with drag & drop support.
//!
//! Selecting or dropping a file only queues it; the process button sends it.

use leptos::*;
use leptos_router::use_navigate;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Event, File, HtmlInputElement};

use super::alert::{show_alert, use_alerts};
use super::progress::ProgressOverlay;
use crate::services::upload_file;
use crate::state::{Severity, UploadConfig, UploadEffect, UploadMachine};
use crate::LogEntry;

#[component]
pub fn UploadWidget(
    config: UploadConfig,
    /// Live logs for the overlay
    logs: Option<RwSignal<Vec<LogEntry>>>,
) -> impl IntoView {
    let alerts = use_alerts();
    let navigate = use_navigate();
    let machine = create_rw_signal(UploadMachine::<File>::default());
    let (dragging, set_dragging) = create_signal(false);

    let input_id = if config.overlay { "documentInput" } else { "imageInput" };
    let overlay_config = config.clone();

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            log::info!("📎 Queued {}", file.name());
            machine.update(|m| m.queue(file));
        }
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_dragging.set(false);
        if let Some(file) = ev.data_transfer().and_then(|dt| dt.files()).and_then(|files| files.get(0)) {
            log::info!("📎 Queued {}", file.name());
            machine.update(|m| m.queue(file));
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_dragging.set(true);
    };

    let trigger_file_input = move |_| {
        let input = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(input_id));
        if let Some(input) = input.as_ref().and_then(|i| i.dyn_ref::<HtmlInputElement>()) {
            input.click();
        }
    };

    let on_submit = move |_| {
        let mut started = None;
        let mut blocked = UploadEffect::None;
        machine.update(|m| match m.submit() {
            Ok(file) => started = Some(file),
            Err(effect) => blocked = effect,
        });

        let Some(file) = started else {
            if blocked == UploadEffect::WarnEmpty {
                show_alert(alerts, Severity::Warning, "Please select a file first.");
            }
            return;
        };

        log::info!("📤 Uploading {}", file.name());
        let navigate = navigate.clone();
        spawn_local(async move {
            let outcome = upload_file(&file).await;
            let mut effect = UploadEffect::None;
            machine.update(|m| effect = m.finish(outcome));

            match effect {
                UploadEffect::Redirect => navigate("/results", Default::default()),
                UploadEffect::ShowError(message) => show_alert(alerts, Severity::Danger, message),
                UploadEffect::WarnEmpty | UploadEffect::None => {}
            }
        });
    };

    view! {
        <div
            class="upload-section"
            class:dragging=move || dragging.get()
            on:click=trigger_file_input
            on:dragover=on_dragover
            on:dragleave=move |_| set_dragging.set(false)
            on:drop=on_drop
        >
            <div class="upload-icon">"📤"</div>
            <div class="upload-text">{config.prompt}</div>
            <div class="upload-hint">"or click to browse"</div>

            <div class="upload-queued">
                {move || machine.with(|m| m.queued().map(|f| format!("Selected: {}", f.name())))}
            </div>

            <input
                type="file"
                id=input_id
                accept=config.accept
                style="display:none"
                on:change=on_file_change
                on:click=|ev| ev.stop_propagation()
            />
        </div>

        <button
            class="upload-button"
            prop:disabled=move || machine.with(|m| m.is_submitting())
            on:click=on_submit
        >
            {move || machine.with(|m| m.submit_label())}
        </button>

        <Show when=move || machine.with(|m| m.overlay_visible(&overlay_config))>
            <ProgressOverlay message="Processing your file..." logs=logs/>
        </Show>
    }
}
