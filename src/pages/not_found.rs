//! Catch-all page for paths matching no declared route.

use leptos::prelude::*;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="not-found-page">
            <h1>"ページが見つかりません"</h1>
            <a href="/">"ホームへ戻る"</a>
        </div>
    }
}
