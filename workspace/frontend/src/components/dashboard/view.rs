use yew::prelude::*;
use yew_router::prelude::*;

use super::activity::RecentActivity;
use super::stats::Stats;
use crate::session::use_session;
use crate::Route;

#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    let session = use_session();
    let name = session
        .identity
        .as_ref()
        .map(|identity| identity.name.clone())
        .unwrap_or_default();

    html! {
        <>
            <div class="flex flex-wrap justify-between items-center mb-6 gap-4">
                <div>
                    <h2 class="text-2xl font-bold">{format!("Welcome back, {}", name)}</h2>
                    <p class="text-sm text-gray-500">
                        {"Paddy production forecasts for Sri Lanka's growing districts."}
                    </p>
                </div>
                <Link<Route> to={Route::Predict} classes="btn btn-primary">
                    <i class="fas fa-chart-line"></i>
                    {" Run a forecast"}
                </Link<Route>>
            </div>
            <Stats />
            <div class="card bg-base-100 shadow mt-6">
                <div class="card-body">
                    <h2 class="card-title">{"Recent Activity"}</h2>
                    <RecentActivity />
                </div>
            </div>
        </>
    }
}
