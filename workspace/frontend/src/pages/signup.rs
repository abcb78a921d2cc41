use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api_client::ApiError;
use crate::components::common::use_toast;
use crate::components::onboarding::{needs_role_assignment, RoleModal};
use crate::session::{self, use_session};
use crate::storage;
use crate::Route;

/// Client-side mirror of the server's signup rules, so most mistakes
/// never leave the page.
fn validate_signup(name: &str, email: &str, password: &str, confirm: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Enter your name.".to_string());
    }
    if email.trim().is_empty() {
        return Err("Enter your email address.".to_string());
    }
    if password.chars().count() < 6 {
        return Err("Password must be at least 6 characters.".to_string());
    }
    if password != confirm {
        return Err("Passwords do not match.".to_string());
    }
    Ok(())
}

#[function_component(SignupPage)]
pub fn signup_page() -> Html {
    let session = use_session();
    let toast = use_toast();
    let navigator = use_navigator().expect("SignupPage rendered outside the router");
    let form_ref = use_node_ref();
    let is_submitting = use_state(|| false);
    let inline_error = use_state(|| None::<String>);
    // The role modal is open exactly while this holds the new uid.
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
                let name = form_data.get("name").as_string().unwrap_or_default();
                let email = form_data.get("email").as_string().unwrap_or_default();
                let password = form_data.get("password").as_string().unwrap_or_default();
                let confirm = form_data.get("confirm").as_string().unwrap_or_default();

                if let Err(message) = validate_signup(&name, &email, &password, &confirm) {
                    inline_error.set(Some(message));
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
                    match session::signup(&session, name, email, password).await {
                        Ok(identity) => {
                            match storage::bearer_token() {
                                Some(token) => {
                                    match needs_role_assignment(&token, &identity).await {
                                        Ok(true) => pending_uid.set(Some(identity.uid)),
                                        Ok(false) => navigator.push(&Route::Home),
                                        Err(e) => {
                                            toast.warning(format!(
                                                "Could not prepare your profile: {}",
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
                        Err(ApiError::RemoteService { status: 409 }) => {
                            inline_error.set(Some("That email is already registered.".to_string()));
                            is_submitting.set(false);
                        }
                        Err(ApiError::RemoteService { status: 400 }) => {
                            // Server-side mirror of the password rule.
                            inline_error
                                .set(Some("Password must be at least 6 characters.".to_string()));
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
                        <h1 class="text-2xl font-bold mt-2">{"Create your account"}</h1>
                        <p class="text-sm text-gray-500">{"Forecast paddy production across Sri Lanka"}</p>
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
                            <label class="label"><span class="label-text">{"Name"}</span></label>
                            <input
                                type="text"
                                name="name"
                                class="input input-bordered w-full"
                                placeholder="e.g. Amara Perera"
                                required={true}
                                disabled={*is_submitting}
                            />
                        </div>
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
                        <div class="grid grid-cols-2 gap-4">
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
                            <div class="form-control">
                                <label class="label"><span class="label-text">{"Confirm"}</span></label>
                                <input
                                    type="password"
                                    name="confirm"
                                    class="input input-bordered w-full"
                                    required={true}
                                    disabled={*is_submitting}
                                />
                            </div>
                        </div>
                        <button type="submit" class="btn btn-primary w-full" disabled={*is_submitting}>
                            {if *is_submitting {
                                html! { <span class="loading loading-spinner loading-sm"></span> }
                            } else {
                                html! { <i class="fas fa-user-plus"></i> }
                            }}
                            {" Sign up"}
                        </button>
                    </form>

                    <p class="text-sm text-center mt-4">
                        {"Already have an account? "}
                        <Link<Route> to={Route::Login} classes="link link-primary">{"Sign in"}</Link<Route>>
                    </p>
                </div>
            </div>
            <RoleModal open={pending_uid.is_some()} {on_assigned} />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_signup_passes() {
        assert_eq!(
            validate_signup("Amara", "amara@example.lk", "paddy-fields", "paddy-fields"),
            Ok(())
        );
    }

    #[test]
    fn test_blank_name_is_rejected() {
        assert_eq!(
            validate_signup("  ", "amara@example.lk", "paddy-fields", "paddy-fields"),
            Err("Enter your name.".to_string())
        );
    }

    #[test]
    fn test_short_password_is_rejected() {
        assert_eq!(
            validate_signup("Amara", "amara@example.lk", "short", "short"),
            Err("Password must be at least 6 characters.".to_string())
        );
    }

    #[test]
    fn test_password_length_counts_characters_not_bytes() {
        // Six multi-byte characters satisfy the rule, same as the server.
        assert_eq!(
            validate_signup("Amara", "amara@example.lk", "කකකකකක", "කකකකකක"),
            Ok(())
        );
    }

    #[test]
    fn test_mismatched_passwords_are_rejected() {
        assert_eq!(
            validate_signup("Amara", "amara@example.lk", "paddy-fields", "paddy-field"),
            Err("Passwords do not match.".to_string())
        );
    }
}
