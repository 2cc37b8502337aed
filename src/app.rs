//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
    hooks::{use_location, use_navigate},
};

use crate::config::ClientConfig;
use crate::net::api::HttpGateway;
use crate::pages::{
    home::HomePage, login::LoginPage, member_select::MemberSelectPage, not_found::NotFoundPage, signup::SignupPage,
};
use crate::state::session::SessionState;
use crate::state::storage::BrowserStorage;
use crate::state::store::{SessionEvent, SessionStore};
use crate::util::auth::{NavIntent, admits, current_target, install_route_guard};

/// Session store shared through context by every page.
pub type AppSession = Arc<SessionStore<HttpGateway, BrowserStorage>>;

/// Set once startup session validation has finished.
#[derive(Clone, Copy)]
pub struct SessionReady(pub RwSignal<bool>);

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="ja">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Builds the session store, mirrors its state into a signal, validates any
/// stored token, and only then mounts the routes.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::from_build_env();
    let store: AppSession =
        Arc::new(SessionStore::new(HttpGateway::new(config.clone()), BrowserStorage, config.messages.clone()));

    let session = RwSignal::new(store.snapshot());
    let ready = SessionReady(RwSignal::new(false));
    let intent = RwSignal::new(None::<NavIntent>);

    store.subscribe(Arc::new(move |event: &SessionEvent| {
        if let SessionEvent::Changed(state) = event {
            session.set(state.clone());
        }
        if let Some(next) = NavIntent::from_event(event) {
            intent.set(Some(next));
        }
    }));

    provide_context(config);
    provide_context(store.clone());
    provide_context(session);
    provide_context(ready);
    provide_context(intent);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let outcome = store.init_auth().await;
        leptos::logging::log!("session startup: {outcome:?}");
        ready.0.set(true);
    });
    // Startup validation is browser-only; the server renders the loading shell.
    #[cfg(not(feature = "hydrate"))]
    let _ = store;

    view! {
        <Stylesheet id="leptos" href="/pkg/family-kitchen.css"/>
        <Title text="Family Kitchen"/>

        <Router>
            <RouteGuard>
                <Routes fallback=NotFoundPage>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("signup") view=SignupPage/>
                    <Route path=StaticSegment("member-select") view=MemberSelectPage/>
                    <Route path=StaticSegment("") view=HomePage/>
                </Routes>
            </RouteGuard>
        </Router>
    }
}

/// Renders `children` only when the session is ready and the guard allows the
/// current location; must render inside the `Router`.
#[component]
fn RouteGuard(children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let ready = expect_context::<SessionReady>();
    let intent = expect_context::<RwSignal<Option<NavIntent>>>();
    let config = expect_context::<ClientConfig>();
    let location = use_location();
    let target = Memo::new(move |_| current_target(&location.pathname.get(), &location.search.get()));

    let routes = config.routes.clone();
    let allowed = Memo::new(move |_| ready.0.get() && session.with(|state| admits(&target.get(), state, &routes)));

    install_route_guard(session, ready.0, intent, target, config.routes, use_navigate());

    view! {
        <Show
            when=move || allowed.get()
            fallback=|| view! { <p class="app-loading">"読み込み中..."</p> }
        >
            {children()}
        </Show>
    }
}
