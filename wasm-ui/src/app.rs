//! Main application component.

use gloo::history::{BrowserHistory, History};
use hrnet::{AppConfig, Persistence, Route};
use yew::prelude::*;

use crate::components::{EmployeeFormPage, EmployeeListPage};
use crate::storage::RosterHandle;

/// Route for the current location. Unknown paths are rewritten to `/`.
fn current_route(history: &BrowserHistory) -> Route {
    let path = history.location().path().to_string();
    match Route::recognize(&path) {
        Some(route) => route,
        None => {
            history.replace(Route::Form.path());
            Route::Form
        }
    }
}

/// Main application component.
#[function_component(App)]
pub fn app() -> Html {
    let config = AppConfig::default();
    let startup_config = config.clone();
    let roster = use_state(move || RosterHandle::open(&startup_config));
    let route = use_state(|| current_route(&BrowserHistory::new()));

    // Follow back/forward buttons.
    {
        let route = route.clone();
        use_effect_with((), move |_| {
            let history = BrowserHistory::new();
            let listener = history.listen({
                let history = history.clone();
                move || route.set(current_route(&history))
            });
            move || drop(listener)
        });
    }

    let on_navigate = {
        let route = route.clone();
        Callback::from(move |target: Route| {
            BrowserHistory::new().push(target.path());
            route.set(target);
        })
    };

    let page = match *route {
        Route::Form => html! {
            <EmployeeFormPage
                roster={(*roster).clone()}
                dates_required={config.dates_required}
                on_navigate={on_navigate}
            />
        },
        Route::List => html! {
            <EmployeeListPage
                roster={(*roster).clone()}
                page_size={config.page_size}
                on_navigate={on_navigate}
            />
        },
    };

    let storage_note = match config.persistence {
        Persistence::Durable => format!(
            "Saved in this browser (localStorage \"{}\")",
            config.storage_key
        ),
        Persistence::Ephemeral => "Kept for this session only".to_string(),
    };

    html! {
        <div class="app">
            <header class="header">
                <div class="header-left">
                    <h1>{ "HRnet" }</h1>
                    <p class="subtitle">{ "Employee records" }</p>
                </div>
            </header>

            <main class="main">
                { page }
            </main>

            <footer class="footer">
                <div class="footer-row">
                    <span>{ storage_note }</span>
                </div>
                <div class="footer-row">
                    <span class="footer-build">
                        { format!("Build: {} {}", env!("BUILD_COMMIT"), env!("BUILD_TIMESTAMP")) }
                    </span>
                </div>
            </footer>
        </div>
    }
}
