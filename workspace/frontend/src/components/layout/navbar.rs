use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::session::{self, use_session};
use crate::Route;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub title: String,
}

#[function_component(Navbar)]
pub fn navbar(props: &Props) -> Html {
    let session = use_session();
    let signing_out = use_state(|| false);

    // The navbar only renders inside guarded pages, so an identity is
    // present; the fallback covers the brief window around sign-out.
    let user_name = session
        .identity
        .as_ref()
        .map(|identity| identity.name.clone())
        .unwrap_or_default();

    let on_logout = {
        let session = session.clone();
        let signing_out = signing_out.clone();
        Callback::from(move |_| {
            if *signing_out {
                return;
            }
            signing_out.set(true);
            log::debug!("User requested sign-out");

            let session = session.clone();
            let signing_out = signing_out.clone();
            spawn_local(async move {
                // The SignedOut dispatch flips the guard, which redirects
                // to the login page on its own.
                session::logout(&session).await;
                signing_out.set(false);
            });
        })
    };

    html! {
        <div class="navbar bg-base-100 shadow-sm z-40 sticky top-0">
            <div class="flex-1 gap-2">
                <Link<Route> to={Route::Home} classes="btn btn-ghost text-xl">
                    <i class="fas fa-seedling text-success"></i>
                    {"AgriVerse"}
                </Link<Route>>
                <div class="hidden sm:flex gap-1">
                    <Link<Route> to={Route::Home} classes="btn btn-ghost btn-sm">{"Dashboard"}</Link<Route>>
                    <Link<Route> to={Route::Predict} classes="btn btn-ghost btn-sm">{"Predict"}</Link<Route>>
                </div>
                <h1 class="text-lg font-semibold hidden lg:block px-4" id="page-title">{ &props.title }</h1>
            </div>
            <div class="flex-none gap-2">
                <span class="text-sm hidden md:block">
                    <i class="fas fa-user-circle mr-1"></i>
                    { user_name }
                </span>
                <button
                    class="btn btn-ghost btn-sm"
                    onclick={on_logout}
                    disabled={*signing_out}
                >
                    <i class="fas fa-sign-out-alt"></i>
                    {" Sign out"}
                </button>
            </div>
        </div>
    }
}
