use yew::prelude::*;
use yew_router::prelude::*;

pub mod api_client;
pub mod components;
pub mod hooks;
pub mod pages;
pub mod session;
pub mod settings;
pub mod storage;

use components::common::ToastProvider;
use components::dashboard::Dashboard;
use components::guard::RequireAuth;
use components::layout::Layout;
use components::predict::Predict;
use pages::{LoginPage, SignupPage};
use session::SessionProvider;

#[derive(Debug, Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/signup")]
    Signup,
    #[at("/predict")]
    Predict,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    log::debug!("Routing to: {:?}", routes);
    match routes {
        Route::Home => {
            log::trace!("Rendering Dashboard page");
            html! {
                <RequireAuth>
                    <Layout title="Dashboard"><Dashboard /></Layout>
                </RequireAuth>
            }
        }
        Route::Predict => {
            log::trace!("Rendering Predict page");
            html! {
                <RequireAuth>
                    <Layout title="Predict"><Predict /></Layout>
                </RequireAuth>
            }
        }
        Route::Login => {
            log::trace!("Rendering Login page");
            html! { <LoginPage /> }
        }
        Route::Signup => {
            log::trace!("Rendering Signup page");
            html! { <SignupPage /> }
        }
        Route::NotFound => {
            log::warn!("404 - Route not found");
            html! {
                <div class="min-h-screen flex flex-col items-center justify-center bg-base-200 gap-4">
                    <h1 class="text-4xl font-bold">{"404"}</h1>
                    <p class="text-gray-500">{"This page does not exist."}</p>
                    <Link<Route> to={Route::Home} classes="btn btn-primary btn-sm">
                        {"Back to the dashboard"}
                    </Link<Route>>
                </div>
            }
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <SessionProvider>
            <ToastProvider>
                <BrowserRouter>
                    <Switch<Route> render={switch} />
                </BrowserRouter>
            </ToastProvider>
        </SessionProvider>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_app() {
    // Initialize settings first
    settings::init_settings();

    // Initialize logger with settings
    let settings = settings::get_settings();
    wasm_logger::init(wasm_logger::Config::new(settings.log_level));

    log::info!("=== AgriVerse Frontend Application Starting ===");
    log::info!("Application settings: {:?}", settings);
    log::debug!("API base URL: {}", settings.api_base_url());

    log::trace!("Initializing Yew renderer");
    yew::Renderer::<App>::new().render();
    log::info!("Application initialized successfully");
}
