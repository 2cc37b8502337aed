//! Signup page: account registration.

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

use leptos::prelude::*;

use crate::app::AppSession;
use crate::net::types::SignupProfile;
use crate::state::session::SessionState;

pub(crate) const MISSING_SIGNUP_FIELDS: &str = "すべての項目を入力してください";
pub(crate) const PASSWORD_MISMATCH: &str = "パスワードが一致しません";

/// Build a registration payload from raw form fields.
pub(crate) fn validate_signup_input(
    name: &str,
    email: &str,
    password: &str,
    confirmation: &str,
) -> Result<SignupProfile, &'static str> {
    let name = name.trim();
    let email = email.trim();
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(MISSING_SIGNUP_FIELDS);
    }
    if password != confirmation {
        return Err(PASSWORD_MISMATCH);
    }
    Ok(SignupProfile {
        email: email.to_owned(),
        password: password.to_owned(),
        password_confirmation: confirmation.to_owned(),
        name: name.to_owned(),
    })
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let store = expect_context::<AppSession>();
    let session = expect_context::<RwSignal<SessionState>>();
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirmation = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if session.get_untracked().loading {
            return;
        }
        let profile = match validate_signup_input(&name.get(), &email.get(), &password.get(), &confirmation.get()) {
            Ok(profile) => profile,
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
                if let Err(e) = store.signup(&profile).await {
                    info.set(e.to_string());
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&store, profile);
        }
    };

    let field = move |kind: &'static str, placeholder: &'static str, value: RwSignal<String>| {
        view! {
            <input
                class="login-input"
                type=kind
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"新規登録"</h1>
                <form class="login-form" on:submit=on_submit>
                    {field("text", "名前", name)}
                    {field("email", "you@example.com", email)}
                    {field("password", "パスワード", password)}
                    {field("password", "パスワード（確認）", confirmation)}
                    <button class="login-button" type="submit" disabled=move || session.get().loading>
                        "登録する"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <p class="login-card__subtitle">
                    <a href="/login">"ログインはこちら"</a>
                </p>
            </div>
        </div>
    }
}
