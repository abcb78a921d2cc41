use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use common::ActivityRecord;

use crate::api_client::activity::get_recent_activity;
use crate::api_client::ApiError;
use crate::components::common::{ErrorDisplay, LoadingSpinner};
use crate::hooks::FetchState;
use crate::storage;

#[function_component(RecentActivity)]
pub fn recent_activity() -> Html {
    let state = use_state(FetchState::<Vec<ActivityRecord>>::default);
    let attempt = use_state(|| 0u32);

    {
        let state = state.clone();
        use_effect_with(*attempt, move |_| {
            state.set(FetchState::Loading);
            spawn_local(async move {
                let Some(token) = storage::bearer_token() else {
                    state.set(FetchState::Error(ApiError::Authentication.to_string()));
                    return;
                };
                match get_recent_activity(&token).await {
                    Ok(records) => state.set(FetchState::Success(records)),
                    Err(e) => state.set(FetchState::Error(e.to_string())),
                }
            });
            || ()
        });
    }

    let on_retry = {
        let attempt = attempt.clone();
        Callback::from(move |_| attempt.set(*attempt + 1))
    };

    match &*state {
        FetchState::NotStarted | FetchState::Loading => html! { <LoadingSpinner /> },
        FetchState::Error(message) => html! {
            <ErrorDisplay message={message.clone()} on_retry={Some(on_retry)} />
        },
        FetchState::Success(records) if records.is_empty() => html! {
            <div class="alert alert-info">
                <i class="fas fa-info-circle"></i>
                <span>{"No predictions yet. Run your first forecast from the Predict page."}</span>
            </div>
        },
        FetchState::Success(records) => html! {
            <div class="overflow-x-auto">
                <table class="table table-sm">
                    <thead>
                        <tr>
                            <th>{"Date"}</th>
                            <th>{"Year"}</th>
                            <th>{"Season"}</th>
                            <th>{"District"}</th>
                            <th class="text-right">{"Predicted Production"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {for records.iter().map(|record| html! {
                            <tr key={record.id}>
                                <td>{record.created_at.format("%Y-%m-%d %H:%M").to_string()}</td>
                                <td>{record.year.to_string()}</td>
                                <td>{&record.season}</td>
                                <td>{&record.district}</td>
                                <td class="text-right text-success">
                                    {format!("{:.1} MT", record.predicted_production)}
                                </td>
                            </tr>
                        })}
                    </tbody>
                </table>
            </div>
        },
    }
}
