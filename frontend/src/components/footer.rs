use leptos::*;
use leptos_router::A;

#[component]
pub fn Footer() -> impl IntoView {
    let year = chrono::Local::now().format("%Y").to_string();

    view! {
        <footer class="site-footer">
            <span>"© " {year} " Refund Audit Log v" {env!("CARGO_PKG_VERSION")}</span>
            <A href="/history" class="footer-link">"Past exports"</A>
        </footer>
    }
}
