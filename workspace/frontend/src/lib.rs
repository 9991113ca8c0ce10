use yew::prelude::*;
use yew_router::prelude::*;

pub mod api_client;
pub mod common;
mod components;
pub mod hooks;
pub mod settings;

use components::dashboard::Dashboard;
use components::layout::Layout;

#[derive(Debug, Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Dashboard,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    log::debug!("Routing to: {:?}", routes);
    match routes {
        Route::Dashboard => html! { <Dashboard /> },
        Route::NotFound => {
            log::warn!("404 - Route not found");
            html! {
                <Layout title="404">
                    <h1 class="text-xl">{"Page not found"}</h1>
                    <Link<Route> to={Route::Dashboard} classes="link">{"Back to the dashboard"}</Link<Route>>
                </Layout>
            }
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_app() {
    settings::init_settings();

    let settings = settings::get_settings();
    wasm_logger::init(wasm_logger::Config::new(settings.log_level));

    log::info!("=== Storedash Frontend Starting ===");
    log::debug!("Application settings: {:?}", settings);
    log::debug!("API base URL: {}", settings.api_base_url());

    yew::Renderer::<App>::new().render();
}
