//! Export controls for the results page.

use leptos::*;

use super::alert::{show_alert, use_alerts};
use super::progress::ProgressOverlay;
use crate::config::{BACKEND_URL, EXPORT_ERROR_FALLBACK};
use crate::services::export;
use crate::state::{interpret, progress_message, ExportOutcome, Severity};
use crate::types::ExportType;

/// Navigate or open a tab for a successful outcome.
fn follow(outcome: &ExportOutcome) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let result = match outcome {
        ExportOutcome::Navigate(url) => window.location().set_href(url),
        ExportOutcome::OpenTab(url) => window.open_with_url_and_target(url, "_blank").map(|_| ()),
        ExportOutcome::Failed(_) => Ok(()),
    };
    if let Err(e) = result {
        log::error!("Could not open export: {:?}", e);
    }
}

fn notify_recorded(outcome: &ExportOutcome, on_exported: Option<Callback<()>>) {
    if let Some(callback) = on_exported.filter(|_| outcome.recorded()) {
        callback.call(());
    }
}

async fn run_export(export_type: ExportType) -> ExportOutcome {
    log::info!("📊 Exporting to {}", export_type.label());
    let result = export(export_type, EXPORT_ERROR_FALLBACK).await;
    interpret(export_type, result, BACKEND_URL)
}

/// Export buttons with a blocking progress modal and a persistent link.
#[component]
pub fn ExportPanel(
    /// Called after a successful export
    #[prop(optional)]
    on_exported: Option<Callback<()>>,
) -> impl IntoView {
    let alerts = use_alerts();
    let progress = create_rw_signal(None::<&'static str>);
    let last_link = create_rw_signal(None::<(ExportType, String)>);

    let start = move |export_type: ExportType| {
        progress.set(Some(progress_message(export_type)));
        spawn_local(async move {
            let outcome = run_export(export_type).await;
            progress.set(None);

            match &outcome {
                ExportOutcome::Failed(message) => show_alert(alerts, Severity::Danger, message.clone()),
                ok => {
                    if let Some(url) = ok.link() {
                        last_link.set(Some((export_type, url.to_string())));
                    }
                    follow(ok);
                }
            }
            notify_recorded(&outcome, on_exported);
        });
    };

    view! {
        <div class="export-panel">
            <button
                class="btn btn-success"
                prop:disabled=move || progress.get().is_some()
                on:click=move |_| start(ExportType::Excel)
            >
                "Export to Excel"
            </button>
            <button
                class="btn btn-primary"
                prop:disabled=move || progress.get().is_some()
                on:click=move |_| start(ExportType::Google)
            >
                "Export to Google Sheets"
            </button>

            {move || last_link.get().map(|(export_type, url)| {
                let label = match export_type {
                    ExportType::Excel => "Download Excel file",
                    ExportType::Google => "Open Google Sheet",
                };
                view! {
                    <div class="export-link">
                        <a href=url target="_blank">{label}</a>
                    </div>
                }
            })}

            {move || progress.get().map(|message| view! { <ProgressOverlay message=message logs=None/> })}
        </div>
    }
}

/// Toolbar export: same request, no modal, plain failure alert.
#[component]
pub fn QuickExport(
    /// Called after a successful export
    #[prop(optional)]
    on_exported: Option<Callback<()>>,
) -> impl IntoView {
    let alerts = use_alerts();
    let (busy, set_busy) = create_signal(false);

    let start = move |export_type: ExportType| {
        set_busy.set(true);
        spawn_local(async move {
            let outcome = run_export(export_type).await;
            match &outcome {
                ExportOutcome::Failed(message) => show_alert(alerts, Severity::Danger, message.clone()),
                ok => follow(ok),
            }
            notify_recorded(&outcome, on_exported);
            set_busy.set(false);
        });
    };

    view! {
        <div class="btn-group quick-export">
            <button
                class="btn btn-outline-success btn-sm"
                prop:disabled=move || busy.get()
                on:click=move |_| start(ExportType::Excel)
            >
                "Excel"
            </button>
            <button
                class="btn btn-outline-primary btn-sm"
                prop:disabled=move || busy.get()
                on:click=move |_| start(ExportType::Google)
            >
                "Google Sheets"
            </button>
        </div>
    }
}
