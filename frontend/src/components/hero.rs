//! Landing copy for the upload page.

use leptos::*;

const STEPS: [(&str, &str); 3] = [
    ("1", "Upload an AS400 refund audit report (.txt or .pdf)"),
    ("2", "Review and correct the extracted item numbers"),
    ("3", "Export to Excel or Google Sheets"),
];

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <section class="hero">
            <h1>"Refund Audit Log"</h1>
            <ol class="hero-steps">
                {STEPS
                    .into_iter()
                    .map(|(n, text)| view! {
                        <li><span class="step-number">{n}</span>{text}</li>
                    })
                    .collect_view()}
            </ol>
        </section>
    }
}
