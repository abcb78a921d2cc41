use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use common::Role;

use crate::api_client::{profile, ApiError};
use crate::storage;

fn role_description(role: Role) -> &'static str {
    match role {
        Role::Farmer => "Plan sowing and estimate the harvest for your own fields",
        Role::Researcher => "Study island-wide production trends across seasons",
        Role::Officer => "Support growers and planning in your district",
        Role::Admin => "Manage the platform and its users",
    }
}

#[derive(Properties, PartialEq)]
pub struct RoleModalProps {
    /// Driven by the owning page's `pending_uid`; the modal itself has
    /// no way to close without a confirmed role.
    pub open: bool,
    pub on_assigned: Callback<Role>,
}

#[function_component(RoleModal)]
pub fn role_modal(props: &RoleModalProps) -> Html {
    let selected = use_state(|| None::<Role>);
    let is_submitting = use_state(|| false);
    let error_message = use_state(|| None::<String>);

    let on_confirm = {
        let selected = selected.clone();
        let is_submitting = is_submitting.clone();
        let error_message = error_message.clone();
        let on_assigned = props.on_assigned.clone();

        Callback::from(move |_| {
            let Some(role) = *selected else {
                return;
            };
            if *is_submitting {
                return;
            }

            let Some(token) = storage::bearer_token() else {
                error_message.set(Some(ApiError::Authentication.to_string()));
                return;
            };

            is_submitting.set(true);
            error_message.set(None);

            let is_submitting = is_submitting.clone();
            let error_message = error_message.clone();
            let on_assigned = on_assigned.clone();

            spawn_local(async move {
                match profile::set_my_role(&token, role).await {
                    Ok(_) => {
                        is_submitting.set(false);
                        on_assigned.emit(role);
                    }
                    Err(ApiError::RemoteService { status: 409 }) => {
                        is_submitting.set(false);
                        error_message
                            .set(Some("A role has already been set for this account.".to_string()));
                    }
                    Err(e) => {
                        is_submitting.set(false);
                        error_message.set(Some(e.to_string()));
                    }
                }
            });
        })
    };

    html! {
        <dialog class={classes!("modal", props.open.then_some("modal-open"))} id="role_modal">
            <div class="modal-box w-11/12 max-w-lg">
                <h3 class="font-bold text-lg">{"How will you use AgriVerse?"}</h3>
                <p class="text-sm text-gray-500 mt-1">
                    {"Pick the role that fits you best. This is set once and shapes what you see."}
                </p>

                {if let Some(error) = (*error_message).as_ref() {
                    html! {
                        <div class="alert alert-error mt-4">
                            <i class="fas fa-exclamation-circle"></i>
                            <span>{error}</span>
                        </div>
                    }
                } else {
                    html! {}
                }}

                <div class="py-4 space-y-2">
                    {for Role::ALL.iter().map(|role| {
                        let role = *role;
                        let checked = *selected == Some(role);
                        let onchange = {
                            let selected = selected.clone();
                            Callback::from(move |_| selected.set(Some(role)))
                        };
                        html! {
                            <label
                                key={role.as_str()}
                                class={classes!(
                                    "flex", "items-start", "gap-3", "p-3", "rounded-lg", "border",
                                    "cursor-pointer",
                                    checked.then_some("border-primary").or(Some("border-base-300")),
                                )}
                            >
                                <input
                                    type="radio"
                                    name="role"
                                    class="radio radio-primary mt-1"
                                    value={role.as_str()}
                                    checked={checked}
                                    {onchange}
                                    disabled={*is_submitting}
                                />
                                <span class="flex flex-col">
                                    <span class="font-semibold">{role.label()}</span>
                                    <span class="text-sm text-gray-500">{role_description(role)}</span>
                                </span>
                            </label>
                        }
                    })}
                </div>

                <div class="modal-action">
                    <button
                        type="button"
                        class="btn btn-primary"
                        onclick={on_confirm}
                        disabled={*is_submitting || selected.is_none()}
                    >
                        {if *is_submitting {
                            html! { <span class="loading loading-spinner loading-sm"></span> }
                        } else {
                            html! {}
                        }}
                        {"Confirm role"}
                    </button>
                </div>
            </div>
        </dialog>
    }
}
