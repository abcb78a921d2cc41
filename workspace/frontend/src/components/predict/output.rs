use std::str::FromStr;

use yew::prelude::*;

use common::District;

use crate::api_client::prediction::Forecast;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub forecast: Forecast,
}

#[function_component(ForecastOutput)]
pub fn forecast_output(props: &Props) -> Html {
    let forecast = &props.forecast;

    // The echoed district is whatever the caller sent; prettify it when
    // it matches the known list and show it verbatim otherwise.
    let district = District::from_str(&forecast.district)
        .map(|d| d.label().to_string())
        .unwrap_or_else(|_| forecast.district.clone());

    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title">
                    {format!("Forecast: {} {}, {}", forecast.season, forecast.year, district)}
                </h2>
                <div class="stats stats-vertical shadow mt-2">
                    <div class="stat">
                        <div class="stat-figure text-primary">
                            <i class="fas fa-layer-group text-3xl"></i>
                        </div>
                        <div class="stat-title">{"Estimated Harvested Extent"}</div>
                        <div class="stat-value text-primary">
                            {format!("{:.1}", forecast.harvested_extent)}
                        </div>
                        <div class="stat-desc">{"hectares (ha)"}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-figure text-success">
                            <i class="fas fa-wheat-awn text-3xl"></i>
                        </div>
                        <div class="stat-title">{"Estimated Total Production"}</div>
                        <div class="stat-value text-success">
                            {format!("{:.1}", forecast.total_production)}
                        </div>
                        <div class="stat-desc">{"metric tons (MT)"}</div>
                    </div>
                </div>
                <p class="text-xs text-gray-500 mt-2">
                    {"Estimates come from season-specific models trained on historical district data."}
                </p>
            </div>
        </div>
    }
}
