//! Login page: email + password sign-in.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

use crate::app::AppSession;
use crate::config::{ClientConfig, FallbackMessages};
use crate::state::session::SessionState;

/// Trim the email and require both fields.
pub(crate) fn validate_login_input(
    email: &str,
    password: &str,
    messages: &FallbackMessages,
) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(messages.missing_credentials);
    }
    Ok((email.to_owned(), password.to_owned()))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let store = expect_context::<AppSession>();
    let session = expect_context::<RwSignal<SessionState>>();
    let messages = expect_context::<ClientConfig>().messages;
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if session.get_untracked().loading {
            return;
        }
        let (email_value, password_value) = match validate_login_input(&email.get(), &password.get(), &messages) {
            Ok(values) => values,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        info.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            let store = store.clone();
            leptos::task::spawn_local(async move {
                // Navigation on success is driven by the Authenticated event.
                if let Err(e) = store.login(&email_value, &password_value).await {
                    info.set(e.to_string());
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&store, email_value, password_value);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"ログイン"</h1>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="パスワード"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || session.get().loading>
                        "ログイン"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <p class="login-card__subtitle">
                    <a href="/signup">"アカウントを作成"</a>
                </p>
            </div>
        </div>
    }
}
