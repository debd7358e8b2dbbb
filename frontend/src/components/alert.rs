//! Dismissible alert banners.

use gloo_timers::future::TimeoutFuture;
use leptos::*;

use crate::config::ALERT_DISMISS_MS;
use crate::state::{AlertQueue, Severity};

/// The app-wide alert queue, provided by `App`.
pub fn use_alerts() -> RwSignal<AlertQueue> {
    expect_context::<RwSignal<AlertQueue>>()
}

/// Show a banner and schedule its auto-dismiss.
pub fn show_alert(alerts: RwSignal<AlertQueue>, severity: Severity, message: impl Into<String>) {
    let message = message.into();
    match severity {
        Severity::Danger => log::error!("{}", message),
        Severity::Warning => log::warn!("{}", message),
        _ => log::info!("{}", message),
    }

    let mut id = 0;
    alerts.update(|queue| id = queue.push(severity, message));

    spawn_local(async move {
        TimeoutFuture::new(ALERT_DISMISS_MS).await;
        // no-op if already dismissed by hand
        alerts.update(|queue| {
            queue.dismiss(id);
        });
    });
}

#[component]
pub fn AlertStack() -> impl IntoView {
    let alerts = use_alerts();

    view! {
        <div class="alert-container">
            <For
                each=move || alerts.with(|q| q.alerts().to_vec())
                key=|alert| alert.id
                children=move |alert| {
                    let id = alert.id;
                    view! {
                        <div class=format!("{} alert-dismissible", alert.severity.css_class()) role="alert">
                            {alert.message}
                            <button
                                type="button"
                                class="btn-close"
                                aria-label="Close"
                                on:click=move |_| alerts.update(|q| {
                                    q.dismiss(id);
                                })
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
