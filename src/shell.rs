use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api;
use crate::notify::{self, use_notifier, Level};
use crate::session::{use_session, SessionAction, Theme};
use crate::Route;

struct NavItem {
    label: &'static str,
    route: Route,
}

fn nav_items() -> Vec<NavItem> {
    vec![
        NavItem {
            label: "Dashboard",
            route: Route::Dashboard,
        },
        NavItem {
            label: "Expenses",
            route: Route::Expenses,
        },
        NavItem {
            label: "Notes",
            route: Route::Notes,
        },
    ]
}

#[function_component(Navbar)]
pub fn navbar() -> Html {
    let session = use_session();
    let notifier = use_notifier();
    let navigator = use_navigator().expect("Navbar rendered inside the router");
    let active = use_route::<Route>();

    let on_logout = {
        let session = session.clone();
        let notifier = notifier.clone();
        let navigator = navigator.clone();
        Callback::from(move |_| {
            let session = session.clone();
            let notifier = notifier.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                // The local session is discarded regardless of whether the
                // backend call lands; the cookie is the server's problem.
                match api::logout().await {
                    Ok(()) => notify::notify(&notifier, Level::Success, "Logged out successfully"),
                    Err(err) => {
                        log::warn!("logout request failed: {err}");
                        notify::notify(&notifier, Level::Warning, "Logged out locally");
                    }
                }
                session.dispatch(SessionAction::Logout);
                navigator.push(&Route::Login);
            });
        })
    };

    let on_toggle_theme = {
        let session = session.clone();
        Callback::from(move |_| session.dispatch(SessionAction::ToggleTheme))
    };

    let theme_icon = if session.theme == Theme::Dark {
        icon_sun()
    } else {
        icon_moon()
    };

    html! {
        <nav class="fixed top-0 left-0 right-0 z-40 bg-white/95 dark:bg-gray-900/95 backdrop-blur-md shadow-sm border-b border-slate-200 dark:border-gray-700">
            <div class="max-w-7xl mx-auto px-4">
                <div class="flex justify-between items-center h-16">
                    <Link<Route> to={Route::Dashboard} classes="flex items-center space-x-3">
                        <div class="w-10 h-10 bg-gradient-to-br from-blue-600 to-purple-600 rounded-xl flex items-center justify-center">
                            <span class="text-white text-lg">{"💰"}</span>
                        </div>
                        <span class="font-bold text-xl text-blue-600 dark:text-blue-400">{"Expensive"}</span>
                    </Link<Route>>

                    <div class="flex items-center space-x-2">
                        <button
                            onclick={on_toggle_theme}
                            class="p-2 rounded-full text-slate-600 dark:text-gray-300 hover:bg-slate-100 dark:hover:bg-gray-800 transition-colors"
                            aria-label="Toggle theme"
                        >
                            { theme_icon }
                        </button>

                        {
                            if let Some(user) = &session.user {
                                html! {
                                    <>
                                        { for nav_items().iter().map(|item| {
                                            let is_active = active.as_ref() == Some(&item.route);
                                            let class_name = if is_active {
                                                "hidden md:block px-4 py-2 rounded-lg bg-blue-100 dark:bg-blue-900 text-blue-700 dark:text-blue-300 font-semibold"
                                            } else {
                                                "hidden md:block px-4 py-2 rounded-lg text-gray-600 dark:text-gray-300 hover:bg-blue-50 dark:hover:bg-gray-800"
                                            };
                                            html! {
                                                <Link<Route> to={item.route.clone()} classes={class_name}>
                                                    { item.label }
                                                </Link<Route>>
                                            }
                                        }) }

                                        <div class="flex items-center gap-2 pl-2">
                                            <div class="w-8 h-8 bg-blue-600 text-white rounded-full flex items-center justify-center font-semibold">
                                                { user.name.chars().next().map(|c| c.to_uppercase().to_string()).unwrap_or_default() }
                                            </div>
                                            <div class="hidden lg:block leading-tight">
                                                <p class="text-sm font-semibold text-slate-800 dark:text-white">{ &user.name }</p>
                                                <p class="text-xs text-gray-500 dark:text-gray-400 truncate">{ &user.email }</p>
                                            </div>
                                            <button
                                                onclick={on_logout}
                                                class="flex items-center gap-2 px-3 py-2 rounded-lg text-red-600 dark:text-red-400 hover:bg-red-50 dark:hover:bg-gray-800 text-sm font-medium"
                                            >
                                                { icon_log_out() }
                                                <span class="hidden sm:inline">{"Logout"}</span>
                                            </button>
                                        </div>
                                    </>
                                }
                            } else {
                                html! {
                                    <>
                                        <Link<Route> to={Route::Login} classes="px-4 py-2 text-gray-600 dark:text-gray-300 hover:text-blue-600">
                                            {"Login"}
                                        </Link<Route>>
                                        <Link<Route> to={Route::Signup} classes="px-4 py-2 bg-green-600 text-white rounded-lg hover:bg-green-700">
                                            {"Sign Up"}
                                        </Link<Route>>
                                    </>
                                }
                            }
                        }
                    </div>
                </div>
            </div>
        </nav>
    }
}

fn icon_base(path: &'static str) -> Html {
    html! {
        <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
            <path d={path}></path>
        </svg>
    }
}

fn icon_moon() -> Html {
    icon_base("M21 12.79A9 9 0 1111.21 3a7 7 0 109.79 9.79z")
}

fn icon_sun() -> Html {
    icon_base("M12 12m-4 0a4 4 0 108 0 4 4 0 10-8 0M12 1v3M12 20v3M4.2 4.2l2.1 2.1M17.7 17.7l2.1 2.1M1 12h3M20 12h3M4.2 19.8l2.1-2.1M17.7 6.3l2.1-2.1")
}

fn icon_log_out() -> Html {
    icon_base("M9 21H5a2 2 0 01-2-2V5a2 2 0 012-2h4M16 17l5-5-5-5M21 12H9")
}
