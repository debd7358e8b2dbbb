//! Refund Audit Log - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend for uploading refund audit reports, editing the
//! extracted line items and exporting them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Header (navigation)                 AlertStack              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  /          HomePage    Hero + UploadWidget                  │
//! │  /results   ResultsPage QuickExport + RowEditorTable         │
//! │                         + ExportPanel + recent exports       │
//! │  /history   HistoryPage HistoryTable                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - Wire types (LineItem, ExportRecord, responses) and errors
//! - [`state`] - DOM-free page state (RowEditor, AlertQueue, UploadMachine)
//! - [`components`] - UI components
//! - [`services`] - Backend communication

use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod components;
pub mod config;
pub mod services;
pub mod state;
pub mod types;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Domain
    ExportRecord, ExportType, LineItem, Period,
    // Logs
    LogEntry, LogLevel,
    // API
    ApiResponse, ExportResponse,
    // Errors
    AppError, AppResult,
};

// Components
pub use components::*;

use state::{AlertQueue, RowEditor, Severity, UploadConfig};

// =============================================================================
// Application
// =============================================================================

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let alerts = create_rw_signal(AlertQueue::default());
    provide_context(alerts);

    let logs = create_rw_signal(Vec::<LogEntry>::new());
    provide_context(logs);

    // Initialize SSE connection ONCE at app startup
    init_sse_logs(logs);

    view! {
        <Router>
            <Header/>
            <AlertStack/>
            <main class="container">
                <Routes>
                    <Route path="/" view=HomePage/>
                    <Route path="/results" view=ResultsPage/>
                    <Route path="/history" view=HistoryPage/>
                </Routes>
            </main>
            <Footer/>
        </Router>
    }
}

#[component]
fn HomePage() -> impl IntoView {
    let logs = expect_context::<RwSignal<Vec<LogEntry>>>();

    view! {
        <Title text="Upload - Refund Audit Log"/>
        <Hero/>
        <UploadWidget config=UploadConfig::documents() logs=Some(logs)/>
    }
}

#[component]
fn ResultsPage() -> impl IntoView {
    let alerts = use_alerts();
    let editor = create_rw_signal(RowEditor::default());
    let history_version = create_rw_signal(0u32);

    let items = create_local_resource(|| (), |_| services::fetch_items());
    create_effect(move |_| match items.get() {
        Some(Ok(items)) => {
            log::info!("📋 Loaded {} items", items.len());
            editor.set(RowEditor::from_items(&items, now_ms()));
        }
        Some(Err(e)) => show_alert(alerts, Severity::Danger, e.user_message("Could not load items")),
        None => {}
    });

    let recent = create_local_resource(move || history_version.get(), |_| services::fetch_history());
    let on_exported = Callback::new(move |_| history_version.update(|v| *v += 1));

    view! {
        <Title text="Results - Refund Audit Log"/>
        <div class="results-header">
            <h2>"Extracted Items"</h2>
            <QuickExport on_exported=on_exported/>
        </div>

        <RowEditorTable editor=editor/>
        <ExportPanel on_exported=on_exported/>

        <section class="recent-exports">
            <h3>"Recent Exports"</h3>
            {move || match recent.get() {
                None => view! { <p>"Loading..."</p> }.into_view(),
                Some(Ok(records)) => {
                    let records: Vec<ExportRecord> = records.into_iter().take(RECENT_EXPORTS).collect();
                    view! { <HistoryTable records=records/> }.into_view()
                }
                Some(Err(e)) => view! { <p class="text-danger">{e.to_string()}</p> }.into_view(),
            }}
        </section>
    }
}

#[component]
fn HistoryPage() -> impl IntoView {
    let records = create_local_resource(|| (), |_| services::fetch_history());

    view! {
        <Title text="Export History - Refund Audit Log"/>
        <h2>"Export History"</h2>
        {move || match records.get() {
            None => view! { <p>"Loading..."</p> }.into_view(),
            Some(Ok(records)) => view! { <HistoryTable records=records/> }.into_view(),
            Some(Err(e)) => view! { <p class="text-danger">{e.to_string()}</p> }.into_view(),
        }}
    }
}
