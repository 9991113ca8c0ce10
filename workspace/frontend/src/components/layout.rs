use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub children: Children,
    pub title: AttrValue,
    /// Filter controls shown on the left
    #[prop_or_default]
    pub sidebar: Html,
    #[prop_or_default]
    pub on_reload: Option<Callback<()>>,
}

/// Page shell: navbar, filter sidebar and main content.
#[function_component(Layout)]
pub fn layout(props: &Props) -> Html {
    let reload = props.on_reload.clone().map(|on_reload| {
        Callback::from(move |_: MouseEvent| {
            log::debug!("User requested a data reload");
            on_reload.emit(());
        })
    });

    html! {
        <div class="flex flex-col min-h-screen bg-base-200">
            <div class="navbar bg-base-100 border-b border-base-300 px-6">
                <div class="flex-1 gap-3">
                    <span class="text-2xl font-bold tracking-tight">{"Storedash"}</span>
                    <span class="text-gray-500">{props.title.clone()}</span>
                </div>
                if let Some(reload) = reload {
                    <button class="btn btn-ghost btn-sm" onclick={reload}>{"Reload data"}</button>
                }
            </div>
            <div class="flex flex-1">
                {props.sidebar.clone()}
                <main class="flex-1 p-6 overflow-y-auto">
                    { for props.children.iter() }
                </main>
            </div>
        </div>
    }
}
