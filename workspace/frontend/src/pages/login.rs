use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api_client::ApiError;
use crate::components::common::use_toast;
use crate::components::onboarding::{needs_role_assignment, RoleModal};
use crate::session::{self, use_session};
use crate::storage;
use crate::Route;

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let session = use_session();
    let toast = use_toast();
    let navigator = use_navigator().expect("LoginPage rendered outside the router");
    let form_ref = use_node_ref();
    let is_submitting = use_state(|| false);
    let inline_error = use_state(|| None::<String>);
    // Accounts that never picked a role get the modal here as well.
    let pending_uid = use_state(|| None::<String>);

    let on_submit = {
        let session = session.clone();
        let toast = toast.clone();
        let navigator = navigator.clone();
        let form_ref = form_ref.clone();
        let is_submitting = is_submitting.clone();
        let inline_error = inline_error.clone();
        let pending_uid = pending_uid.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            if *is_submitting {
                return;
            }

            if let Some(form) = form_ref.cast::<web_sys::HtmlFormElement>() {
                let form_data = web_sys::FormData::new_with_form(&form).unwrap();
                let email = form_data.get("email").as_string().unwrap_or_default();
                let password = form_data.get("password").as_string().unwrap_or_default();

                if email.trim().is_empty() || password.is_empty() {
                    inline_error.set(Some("Enter your email and password.".to_string()));
                    return;
                }

                is_submitting.set(true);
                inline_error.set(None);

                let session = session.clone();
                let toast = toast.clone();
                let navigator = navigator.clone();
                let is_submitting = is_submitting.clone();
                let inline_error = inline_error.clone();
                let pending_uid = pending_uid.clone();

                spawn_local(async move {
                    match session::login(&session, email, password).await {
                        Ok(identity) => {
                            match storage::bearer_token() {
                                Some(token) => {
                                    match needs_role_assignment(&token, &identity).await {
                                        Ok(true) => pending_uid.set(Some(identity.uid)),
                                        Ok(false) => navigator.push(&Route::Home),
                                        Err(e) => {
                                            // Signed in either way; the check
                                            // reruns on the next sign-in.
                                            toast.warning(format!(
                                                "Could not check your profile: {}",
                                                e
                                            ));
                                            navigator.push(&Route::Home);
                                        }
                                    }
                                }
                                None => navigator.push(&Route::Home),
                            }
                            is_submitting.set(false);
                        }
                        Err(ApiError::Authentication) => {
                            inline_error.set(Some("Invalid email or password.".to_string()));
                            is_submitting.set(false);
                        }
                        Err(e) => {
                            toast.error(e.to_string());
                            is_submitting.set(false);
                        }
                    }
                });
            }
        })
    };

    let on_assigned = {
        let navigator = navigator.clone();
        let pending_uid = pending_uid.clone();
        Callback::from(move |_| {
            pending_uid.set(None);
            navigator.push(&Route::Home);
        })
    };

    html! {
        <div class="min-h-screen flex items-center justify-center bg-base-200 p-4">
            <div class="card bg-base-100 shadow-xl w-full max-w-md">
                <div class="card-body">
                    <div class="text-center mb-4">
                        <i class="fas fa-seedling text-success text-4xl"></i>
                        <h1 class="text-2xl font-bold mt-2">{"AgriVerse"}</h1>
                        <p class="text-sm text-gray-500">{"Sign in to your account"}</p>
                    </div>

                    {if let Some(error) = (*inline_error).as_ref() {
                        html! {
                            <div class="alert alert-error">
                                <i class="fas fa-exclamation-circle"></i>
                                <span>{error}</span>
                            </div>
                        }
                    } else {
                        html! {}
                    }}

                    <form ref={form_ref} onsubmit={on_submit} class="space-y-4">
                        <div class="form-control">
                            <label class="label"><span class="label-text">{"Email"}</span></label>
                            <input
                                type="email"
                                name="email"
                                class="input input-bordered w-full"
                                placeholder="you@example.lk"
                                required={true}
                                disabled={*is_submitting}
                            />
                        </div>
                        <div class="form-control">
                            <label class="label"><span class="label-text">{"Password"}</span></label>
                            <input
                                type="password"
                                name="password"
                                class="input input-bordered w-full"
                                required={true}
                                disabled={*is_submitting}
                            />
                        </div>
                        <button type="submit" class="btn btn-primary w-full" disabled={*is_submitting}>
                            {if *is_submitting {
                                html! { <span class="loading loading-spinner loading-sm"></span> }
                            } else {
                                html! { <i class="fas fa-sign-in-alt"></i> }
                            }}
                            {" Sign in"}
                        </button>
                    </form>

                    <p class="text-sm text-center mt-4">
                        {"Need an account? "}
                        <Link<Route> to={Route::Signup} classes="link link-primary">{"Sign up"}</Link<Route>>
                    </p>
                </div>
            </div>
            <RoleModal open={pending_uid.is_some()} {on_assigned} />
        </div>
    }
}
