use std::ops::RangeInclusive;

use chrono::{Datelike, Utc};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use common::{District, PredictionRequest, Season};

use crate::api_client::prediction::{predict_production, Forecast};
use crate::storage;

/// Years offered by the form: the span of the training data plus
/// headroom for forward planning.
pub const YEAR_RANGE: RangeInclusive<i32> = 2008..=2030;

/// Form control values exactly as the browser hands them over.
struct RawFormValues {
    year: String,
    season: String,
    district: String,
    sown_hect: String,
    previous_yield: String,
    previous_production: String,
}

fn read_form(form_data: &web_sys::FormData) -> RawFormValues {
    let field = |name: &str| form_data.get(name).as_string().unwrap_or_default();
    RawFormValues {
        year: field("year"),
        season: field("season"),
        district: field("district"),
        sown_hect: field("sown_hect"),
        previous_yield: field("previous_yield"),
        previous_production: field("previous_production"),
    }
}

/// Presence and non-negativity checks before the request goes out; the
/// endpoint owns every semantic check beyond that. Parsed numbers are
/// passed through untouched.
fn build_request(values: &RawFormValues) -> Result<PredictionRequest, String> {
    let year = values
        .year
        .trim()
        .parse::<i32>()
        .map_err(|_| "Select a year.".to_string())?;
    if values.season.is_empty() {
        return Err("Select a season.".to_string());
    }
    if values.district.is_empty() {
        return Err("Select a district.".to_string());
    }
    let sown_hect = parse_non_negative(&values.sown_hect, "sown extent")?;
    let previous_yield = parse_non_negative(&values.previous_yield, "previous yield")?;
    let previous_production = parse_non_negative(&values.previous_production, "previous production")?;

    Ok(PredictionRequest {
        year,
        season: values.season.clone(),
        district: values.district.clone(),
        sown_hect,
        previous_yield,
        previous_production,
    })
}

fn parse_non_negative(raw: &str, label: &str) -> Result<f64, String> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("Enter the {label}."))?;
    // "NaN" and "inf" parse successfully; keep them out of the request.
    if !value.is_finite() {
        return Err(format!("Enter the {label}."));
    }
    if value < 0.0 {
        return Err(format!("The {label} cannot be negative."));
    }
    Ok(value)
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub on_forecast: Callback<Forecast>,
}

#[function_component(PredictForm)]
pub fn predict_form(props: &Props) -> Html {
    let form_ref = use_node_ref();
    let is_submitting = use_state(|| false);
    let error_message = use_state(|| None::<String>);

    let default_year = Utc::now()
        .year()
        .clamp(*YEAR_RANGE.start(), *YEAR_RANGE.end());

    let on_submit = {
        let on_forecast = props.on_forecast.clone();
        let form_ref = form_ref.clone();
        let is_submitting = is_submitting.clone();
        let error_message = error_message.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            if *is_submitting {
                return;
            }

            if let Some(form) = form_ref.cast::<web_sys::HtmlFormElement>() {
                let form_data = web_sys::FormData::new_with_form(&form).unwrap();
                let request = match build_request(&read_form(&form_data)) {
                    Ok(request) => request,
                    Err(message) => {
                        error_message.set(Some(message));
                        return;
                    }
                };

                let on_forecast = on_forecast.clone();
                let is_submitting = is_submitting.clone();
                let error_message = error_message.clone();

                is_submitting.set(true);
                error_message.set(None);

                spawn_local(async move {
                    log::info!(
                        "Requesting forecast: {} {} in {}",
                        request.season,
                        request.year,
                        request.district
                    );
                    let token = storage::bearer_token();
                    match predict_production(&request, token.as_deref()).await {
                        Ok(forecast) => {
                            is_submitting.set(false);
                            on_forecast.emit(forecast);
                        }
                        Err(e) => {
                            log::error!("Forecast request failed: {}", e);
                            error_message.set(Some(e.to_string()));
                            is_submitting.set(false);
                        }
                    }
                });
            }
        })
    };

    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title">{"Production Forecast"}</h2>

                {if let Some(error) = (*error_message).as_ref() {
                    html! {
                        <div class="alert alert-error mt-2">
                            <i class="fas fa-exclamation-circle"></i>
                            <span>{error}</span>
                        </div>
                    }
                } else {
                    html! {}
                }}

                <form ref={form_ref} onsubmit={on_submit} class="py-2 space-y-4">
                    <div class="grid grid-cols-2 gap-4">
                        <div class="form-control">
                            <label class="label"><span class="label-text">{"Year"}</span></label>
                            <select name="year" class="select select-bordered w-full" disabled={*is_submitting}>
                                {for YEAR_RANGE.map(|year| html! {
                                    <option value={year.to_string()} selected={year == default_year}>
                                        {year.to_string()}
                                    </option>
                                })}
                            </select>
                        </div>
                        <div class="form-control">
                            <label class="label"><span class="label-text">{"Season"}</span></label>
                            <select name="season" class="select select-bordered w-full" disabled={*is_submitting}>
                                {for Season::ALL.iter().map(|season| html! {
                                    <option value={season.as_str()}>{season.as_str()}</option>
                                })}
                            </select>
                        </div>
                    </div>

                    <div class="form-control">
                        <label class="label"><span class="label-text">{"District"}</span></label>
                        <select name="district" class="select select-bordered w-full" disabled={*is_submitting}>
                            <option value="" disabled={true} selected={true}>{"Select district"}</option>
                            {for District::ALL.iter().map(|district| html! {
                                <option value={district.as_str()}>{district.label()}</option>
                            })}
                        </select>
                    </div>

                    <div class="form-control">
                        <label class="label"><span class="label-text">{"Sown extent (ha)"}</span></label>
                        <input
                            type="number"
                            name="sown_hect"
                            class="input input-bordered w-full"
                            placeholder="e.g. 120000"
                            step="any"
                            min="0"
                            required={true}
                            disabled={*is_submitting}
                        />
                    </div>

                    <div class="grid grid-cols-2 gap-4">
                        <div class="form-control">
                            <label class="label"><span class="label-text">{"Previous yield (MT/ha)"}</span></label>
                            <input
                                type="number"
                                name="previous_yield"
                                class="input input-bordered w-full"
                                placeholder="e.g. 4.2"
                                step="any"
                                min="0"
                                required={true}
                                disabled={*is_submitting}
                            />
                        </div>
                        <div class="form-control">
                            <label class="label"><span class="label-text">{"Previous production (MT)"}</span></label>
                            <input
                                type="number"
                                name="previous_production"
                                class="input input-bordered w-full"
                                placeholder="e.g. 470000"
                                step="any"
                                min="0"
                                required={true}
                                disabled={*is_submitting}
                            />
                        </div>
                    </div>

                    <div class="card-actions justify-end pt-2">
                        <button type="submit" class="btn btn-primary" disabled={*is_submitting}>
                            {if *is_submitting {
                                html! { <span class="loading loading-spinner loading-sm"></span> }
                            } else {
                                html! { <i class="fas fa-chart-line"></i> }
                            }}
                            {" Predict production"}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
