use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
    #[prop_or_default]
    pub on_retry: Option<Callback<()>>,
}

#[function_component(ErrorDisplay)]
pub fn error_display(props: &ErrorDisplayProps) -> Html {
    log::warn!("Displaying error to user: {}", props.message);

    let retry = props.on_retry.clone().map(|on_retry| {
        Callback::from(move |_: MouseEvent| {
            log::debug!("User clicked retry button");
            on_retry.emit(());
        })
    });

    html! {
        <div class="flex flex-col items-center justify-center py-12 gap-4">
            <div class="alert alert-error max-w-lg">
                <div class="flex flex-col gap-2">
                    <span class="font-semibold">{"Could not load the dashboard"}</span>
                    <span class="text-sm">{&props.message}</span>
                </div>
            </div>
            if let Some(retry) = retry {
                <button class="btn btn-primary btn-sm" onclick={retry}>{"Try again"}</button>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct EmptyStateProps {
    pub message: AttrValue,
}

/// Placeholder shown in place of a chart or table with no rows
#[function_component(EmptyState)]
pub fn empty_state(props: &EmptyStateProps) -> Html {
    html! {
        <div class="flex items-center justify-center h-48 text-sm text-gray-400 italic">
            {props.message.clone()}
        </div>
    }
}
