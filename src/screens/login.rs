use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api;
use crate::notify::{self, use_notifier, Level};
use crate::session::{use_session, SessionAction};
use crate::Route;

// Normalizes the email the same way the backend stores it.
fn validate_login(email: &str, password: &str) -> Result<(String, String), String> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || password.is_empty() {
        return Err("Please fill all fields".to_string());
    }
    Ok((email, password.to_string()))
}

#[function_component(LoginScreen)]
pub fn login_screen() -> Html {
    let email = use_state(String::new);
    let password = use_state(String::new);
    let show_password = use_state(|| false);
    let loading = use_state(|| false);

    let session = use_session();
    let notifier = use_notifier();
    let navigator = use_navigator().expect("LoginScreen rendered inside the router");

    let on_submit = {
        let email = email.clone();
        let password = password.clone();
        let loading = loading.clone();
        let session = session.clone();
        let notifier = notifier.clone();
        let navigator = navigator.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let (email_val, password_val) = match validate_login(&email, &password) {
                Ok(pair) => pair,
                Err(msg) => {
                    notify::notify(&notifier, Level::Warning, msg);
                    return;
                }
            };

            loading.set(true);

            let loading = loading.clone();
            let session = session.clone();
            let notifier = notifier.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                match api::login(&email_val, &password_val).await {
                    Ok(user) => {
                        log::info!("login succeeded for {}", user.email);
                        session.dispatch(SessionAction::SetUser(user));
                        notify::notify(&notifier, Level::Success, "Login successful");
                        navigator.push(&Route::Dashboard);
                    }
                    Err(err) => {
                        notify::notify(&notifier, Level::Error, err.to_string());
                    }
                }
                loading.set(false);
            });
        })
    };

    let toggle_password = {
        let show_password = show_password.clone();
        Callback::from(move |_| show_password.set(!*show_password))
    };

    html! {
        <div class="min-h-screen flex items-center justify-center bg-gradient-to-br from-blue-50 to-indigo-100 dark:from-slate-900 dark:to-slate-800 p-4">
            <div class="flex flex-col md:flex-row w-full max-w-4xl rounded-2xl overflow-hidden shadow-2xl bg-white dark:bg-slate-900">
                <div class="hidden md:flex md:w-1/2 bg-gradient-to-br from-indigo-600 to-purple-700 items-center justify-center p-8">
                    <div class="text-white text-center">
                        <div class="w-20 h-20 bg-white/20 rounded-full flex items-center justify-center mx-auto mb-6">
                            <span class="text-2xl">{"💰"}</span>
                        </div>
                        <h1 class="text-3xl font-bold mb-4">{"Expensive"}</h1>
                        <p class="text-indigo-100">{"Manage your finances securely"}</p>
                    </div>
                </div>

                <div class="w-full md:w-1/2 p-8 md:p-12">
                    <h2 class="text-3xl font-bold text-gray-800 dark:text-white text-center mb-2">{"Welcome Back"}</h2>
                    <p class="text-gray-600 dark:text-gray-400 text-center mb-8">{"Sign in to your account"}</p>

                    <form class="space-y-6" onsubmit={on_submit}>
                        <div class="space-y-1">
                            <label class="text-sm font-medium text-gray-700 dark:text-gray-300">{"Email Address"}</label>
                            <input
                                type="email"
                                value={(*email).clone()}
                                oninput={{
                                    let email = email.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let input: HtmlInputElement = e.target_unchecked_into();
                                        email.set(input.value());
                                    })
                                }}
                                class="w-full px-4 py-3 rounded-lg border bg-gray-50 dark:bg-slate-800 text-gray-900 dark:text-white border-gray-300 dark:border-slate-700 focus:ring-2 focus:ring-indigo-500 outline-none"
                            />
                        </div>

                        <div class="space-y-1 relative">
                            <label class="text-sm font-medium text-gray-700 dark:text-gray-300">{"Password"}</label>
                            <input
                                type={if *show_password { "text" } else { "password" }}
                                value={(*password).clone()}
                                oninput={{
                                    let password = password.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let input: HtmlInputElement = e.target_unchecked_into();
                                        password.set(input.value());
                                    })
                                }}
                                class="w-full px-4 py-3 rounded-lg border bg-gray-50 dark:bg-slate-800 text-gray-900 dark:text-white border-gray-300 dark:border-slate-700 focus:ring-2 focus:ring-indigo-500 outline-none pr-12"
                            />
                            <button
                                type="button"
                                onclick={toggle_password}
                                class="absolute right-3 bottom-3 text-gray-500"
                            >
                                { if *show_password { "🙈" } else { "👁️" } }
                            </button>
                        </div>

                        <button
                            type="submit"
                            disabled={*loading}
                            class="w-full bg-gradient-to-r from-indigo-600 to-purple-600 text-white py-3 rounded-lg font-semibold hover:opacity-90 disabled:opacity-50"
                        >
                            { if *loading { "Signing in..." } else { "Sign In" } }
                        </button>

                        <p class="text-center text-gray-600 dark:text-gray-400 text-sm">
                            {"Don't have an account? "}
                            <Link<Route> to={Route::Signup} classes="text-indigo-600 dark:text-indigo-400 font-semibold">
                                {"Sign up"}
                            </Link<Route>>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_normalizes_email() {
        let (email, password) = validate_login("  Asha@Example.COM ", "hunter22").unwrap();
        assert_eq!(email, "asha@example.com");
        assert_eq!(password, "hunter22");
    }

    #[test]
    fn login_requires_both_fields() {
        assert!(validate_login("", "secret").is_err());
        assert!(validate_login("a@b.c", "").is_err());
        assert!(validate_login("   ", "secret").is_err());
    }
}
