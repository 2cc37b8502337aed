//! Home page: the authenticated landing route for the acting member.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;

use crate::app::AppSession;
use crate::state::session::SessionState;

/// Greeting line for the acting member, falling back to the account name.
pub(crate) fn greeting(state: &SessionState) -> String {
    let name = state
        .current_member
        .as_ref()
        .map(|m| m.name.as_str())
        .or_else(|| state.user.as_ref().map(|u| u.name.as_str()));
    match name {
        Some(name) => format!("こんにちは、{name}さん"),
        None => "こんにちは".to_owned(),
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let store = expect_context::<AppSession>();
    let session = expect_context::<RwSignal<SessionState>>();

    let on_logout = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let store = store.clone();
            leptos::task::spawn_local(async move {
                // Navigation to login is driven by the LoggedOut event.
                let _ = store.logout().await;
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = &store;
        }
    };

    view! {
        <div class="home-page">
            <header class="home-page__header">
                <h1>{move || greeting(&session.get())}</h1>
                <a class="home-page__switch" href="/member-select">"メンバーを切り替える"</a>
                <button class="home-page__logout" on:click=on_logout>"ログアウト"</button>
            </header>
            <nav class="home-page__nav">
                <a href="/recipes">"レシピ"</a>
                <a href="/meal-plans">"献立"</a>
                <a href="/requests">"リクエスト"</a>
                <a href="/members">"メンバー"</a>
                <a href="/settings">"設定"</a>
            </nav>
        </div>
    }
}
