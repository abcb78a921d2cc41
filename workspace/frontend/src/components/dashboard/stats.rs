use yew::prelude::*;

use common::{District, Season};

use crate::components::predict::form::YEAR_RANGE;

#[function_component(Stats)]
pub fn stats() -> Html {
    let seasons = Season::ALL.map(|s| s.as_str()).join(" + ");
    let years = format!("{} to {}", YEAR_RANGE.start(), YEAR_RANGE.end());

    html! {
        <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
            <div class="stats shadow bg-base-100">
                <div class="stat">
                    <div class="stat-figure text-primary">
                        <i class="fas fa-map-marked-alt text-3xl"></i>
                    </div>
                    <div class="stat-title">{"Districts Covered"}</div>
                    <div class="stat-value text-primary">{District::ALL.len().to_string()}</div>
                    <div class="stat-desc">{"Island-wide paddy dataset"}</div>
                </div>
            </div>
            <div class="stats shadow bg-base-100">
                <div class="stat">
                    <div class="stat-figure text-success">
                        <i class="fas fa-cloud-sun-rain text-3xl"></i>
                    </div>
                    <div class="stat-title">{"Cultivation Seasons"}</div>
                    <div class="stat-value text-success">{seasons}</div>
                    <div class="stat-desc">{"Two forecasts per year"}</div>
                </div>
            </div>
            <div class="stats shadow bg-base-100">
                <div class="stat">
                    <div class="stat-figure text-secondary">
                        <i class="fas fa-calendar-alt text-3xl"></i>
                    </div>
                    <div class="stat-title">{"Forecast Years"}</div>
                    <div class="stat-value text-secondary text-2xl">{years}</div>
                    <div class="stat-desc">{"Season, district and field inputs"}</div>
                </div>
            </div>
        </div>
    }
}
