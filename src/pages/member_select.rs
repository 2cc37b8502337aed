//! Member selection: pick which family member is acting this session.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reached after login (or from a member-scoped route) while no member is
//! selected. A successful pick resumes the `redirect` query target.

#[cfg(test)]
#[path = "member_select_test.rs"]
mod member_select_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::app::AppSession;
use crate::config::ClientConfig;
use crate::net::types::Member;
use crate::state::session::SessionState;
use crate::util::guard::{landing_after_auth, redirect_param};

/// Avatar shown for members without an icon.
pub(crate) const DEFAULT_AVATAR: &str = "👤";

pub(crate) fn avatar_for(member: &Member) -> &str {
    member.avatar_icon.as_deref().filter(|icon| !icon.trim().is_empty()).unwrap_or(DEFAULT_AVATAR)
}

pub(crate) fn is_current(state: &SessionState, member_id: &str) -> bool {
    state.current_member.as_ref().is_some_and(|m| m.id == member_id)
}

#[component]
pub fn MemberSelectPage() -> impl IntoView {
    let store = expect_context::<AppSession>();
    let session = expect_context::<RwSignal<SessionState>>();
    let config = expect_context::<ClientConfig>();
    let location = use_location();
    let navigate = use_navigate();
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    {
        let store = store.clone();
        leptos::task::spawn_local(async move {
            let _ = store.refresh_members().await;
        });
    }

    let on_pick = StoredValue::new_local(move |member_id: String| {
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        info.set(String::new());
        let redirect = redirect_param(&location.search.get_untracked());
        let routes = config.routes.clone();
        let navigate = navigate.clone();

        #[cfg(feature = "hydrate")]
        {
            let store = store.clone();
            leptos::task::spawn_local(async move {
                match store.select_member(&member_id).await {
                    Ok(()) => {
                        let destination = landing_after_auth(&store.snapshot(), redirect.as_deref(), &routes);
                        navigate(&destination, NavigateOptions::default());
                    }
                    Err(e) => info.set(e.to_string()),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&store, member_id, redirect, routes, navigate);
            busy.set(false);
        }
    });

    view! {
        <div class="member-select-page">
            <h1>"だれが使いますか？"</h1>
            <Show
                when=move || !session.get().members.is_empty()
                fallback=|| view! { <p class="member-select__empty">"メンバーがいません"</p> }
            >
                <ul class="member-select__list">
                    <For
                        each=move || session.get().members
                        key=|member| member.id.clone()
                        children=move |member| {
                            let id = member.id.clone();
                            let selected_id = id.clone();
                            view! {
                                <li>
                                    <button
                                        class=move || {
                                            if is_current(&session.get(), &selected_id) {
                                                "member-select__item member-select__item--current"
                                            } else {
                                                "member-select__item"
                                            }
                                        }
                                        disabled=move || busy.get()
                                        on:click=move |_| on_pick.with_value(|pick| pick(id.clone()))
                                    >
                                        <span class="member-select__avatar">{avatar_for(&member).to_owned()}</span>
                                        <span class="member-select__name">{member.name.clone()}</span>
                                    </button>
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
            <Show when=move || !info.get().is_empty()>
                <p class="login-message">{move || info.get()}</p>
            </Show>
        </div>
    }
}
