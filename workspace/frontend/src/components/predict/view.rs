use yew::prelude::*;

use super::form::PredictForm;
use super::output::ForecastOutput;
use crate::api_client::prediction::Forecast;

#[function_component(Predict)]
pub fn predict() -> Html {
    let forecast = use_state(|| None::<Forecast>);

    let on_forecast = {
        let forecast = forecast.clone();
        Callback::from(move |result: Forecast| forecast.set(Some(result)))
    };

    html! {
        <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
            <PredictForm {on_forecast} />
            {if let Some(forecast) = (*forecast).as_ref() {
                html! { <ForecastOutput forecast={forecast.clone()} /> }
            } else {
                html! {
                    <div class="card bg-base-100 shadow">
                        <div class="card-body items-center justify-center text-center text-gray-500">
                            <i class="fas fa-chart-area text-4xl mb-2"></i>
                            <p>{"Fill in the season details to estimate the harvest."}</p>
                        </div>
                    </div>
                }
            }}
        </div>
    }
}
