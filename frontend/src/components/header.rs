use leptos::*;
use leptos_router::A;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header>
            <div class="header-left">
                <A href="/" class="logo">"REFUND AUDIT LOG"</A>
            </div>
            <nav class="header-right">
                <A href="/" exact=true class="nav-link">"Upload"</A>
                <A href="/results" class="nav-link">"Results"</A>
                <A href="/history" class="nav-link">"Export History"</A>
            </nav>
        </header>
    }
}
