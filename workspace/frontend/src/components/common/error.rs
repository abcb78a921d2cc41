use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ErrorDisplayProps {
    /// User-facing text, already display-ready (`ApiError` renders
    /// through `Display` before it gets here).
    pub message: String,
    #[prop_or_default]
    pub on_retry: Option<Callback<()>>,
}

/// Inline failure panel for a card body. Callers that can re-run the
/// failed fetch pass `on_retry`; the button renders only then.
#[function_component(ErrorDisplay)]
pub fn error_display(props: &ErrorDisplayProps) -> Html {
    let retry_button = props.on_retry.as_ref().map(|on_retry| {
        let on_retry = on_retry.clone();
        let onclick = Callback::from(move |_: MouseEvent| on_retry.emit(()));
        html! {
            <button class="btn btn-outline btn-sm" {onclick}>
                <i class="fas fa-redo"></i>
                {" Try again"}
            </button>
        }
    });

    html! {
        <div class="alert alert-error items-start">
            <i class="fas fa-exclamation-circle mt-1"></i>
            <div class="flex flex-col gap-1">
                <span class="font-semibold">{"Could not load this section"}</span>
                <span class="text-sm">{&props.message}</span>
            </div>
            {retry_button.unwrap_or_default()}
        </div>
    }
}
