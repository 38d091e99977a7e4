use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api;
use crate::notify::{self, use_notifier, Level};
use crate::Route;

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strength {
    Weak,
    Medium,
    Strong,
}

/// Advisory only; submission is gated on the length check alone.
fn classify_password(password: &str) -> Option<Strength> {
    if password.is_empty() {
        return None;
    }
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| "@$!%*?&".contains(c));
    let has_letter = has_lower || has_upper;

    if password.len() >= 8 && has_lower && has_upper && has_digit && has_symbol {
        Some(Strength::Strong)
    } else if password.len() >= 6 && has_letter && has_digit {
        Some(Strength::Medium)
    } else {
        Some(Strength::Weak)
    }
}

fn validate_signup(
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<(String, String, String), String> {
    let name = name.trim().to_string();
    let email = email.trim().to_lowercase();
    if name.is_empty() || email.is_empty() || password.is_empty() || confirm.is_empty() {
        return Err("Please fill all required fields".to_string());
    }
    if password != confirm {
        return Err("Passwords don't match".to_string());
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 8 characters".to_string());
    }
    Ok((name, email, password.to_string()))
}

#[function_component(SignupScreen)]
pub fn signup_screen() -> Html {
    let name = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let confirm = use_state(String::new);
    let loading = use_state(|| false);

    let notifier = use_notifier();
    let navigator = use_navigator().expect("SignupScreen rendered inside the router");

    let on_submit = {
        let name = name.clone();
        let email = email.clone();
        let password = password.clone();
        let confirm = confirm.clone();
        let loading = loading.clone();
        let notifier = notifier.clone();
        let navigator = navigator.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let (name_val, email_val, password_val) =
                match validate_signup(&name, &email, &password, &confirm) {
                    Ok(fields) => fields,
                    Err(msg) => {
                        notify::notify(&notifier, Level::Warning, msg);
                        return;
                    }
                };

            loading.set(true);

            let loading = loading.clone();
            let notifier = notifier.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                match api::signup(&name_val, &email_val, &password_val).await {
                    Ok(()) => {
                        notify::notify(
                            &notifier,
                            Level::Success,
                            "Account created successfully! Please login.",
                        );
                        navigator.push(&Route::Login);
                    }
                    Err(err) => {
                        notify::notify(&notifier, Level::Error, err.to_string());
                    }
                }
                loading.set(false);
            });
        })
    };

    let strength = classify_password(&password);
    let (bar_class, bar_width) = match strength {
        Some(Strength::Strong) => ("bg-green-500", "w-full"),
        Some(Strength::Medium) => ("bg-yellow-500", "w-2/3"),
        Some(Strength::Weak) => ("bg-red-500", "w-1/3"),
        None => ("bg-gray-300 dark:bg-gray-600", "w-0"),
    };

    let field = |label: &'static str,
                 kind: &'static str,
                 handle: &UseStateHandle<String>|
     -> Html {
        let handle_for_input = handle.clone();
        html! {
            <div class="space-y-1">
                <label class="text-sm font-medium text-gray-700 dark:text-gray-300">{ label }</label>
                <input
                    type={kind}
                    value={(**handle).clone()}
                    oninput={Callback::from(move |e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        handle_for_input.set(input.value());
                    })}
                    class="w-full px-4 py-3 rounded-lg border bg-gray-50 dark:bg-slate-800 text-gray-900 dark:text-white border-gray-300 dark:border-slate-700 focus:ring-2 focus:ring-green-500 outline-none"
                />
            </div>
        }
    };

    html! {
        <div class="min-h-screen flex items-center justify-center p-4 bg-gradient-to-br from-blue-50 to-indigo-100 dark:from-slate-900 dark:to-slate-800">
            <div class="flex flex-col md:flex-row w-full max-w-4xl rounded-2xl overflow-hidden shadow-2xl bg-white dark:bg-slate-900">
                <div class="hidden md:flex md:w-1/2 bg-gradient-to-br from-green-600 to-emerald-700 items-center justify-center p-8">
                    <div class="text-white text-center">
                        <div class="w-20 h-20 bg-white/20 rounded-full flex items-center justify-center mx-auto mb-6">
                            <span class="text-2xl">{"🚀"}</span>
                        </div>
                        <h1 class="text-3xl font-bold mb-4">{"Join Expensive"}</h1>
                        <p class="text-green-100">{"Start managing your finances smarter"}</p>
                    </div>
                </div>

                <div class="w-full md:w-1/2 p-8 md:p-12">
                    <h2 class="text-3xl font-bold text-center text-gray-800 dark:text-white mb-2">{"Create Account"}</h2>
                    <p class="text-center text-gray-600 dark:text-gray-400 mb-8">{"It only takes a minute"}</p>

                    <form class="space-y-5" onsubmit={on_submit}>
                        { field("Full Name", "text", &name) }
                        { field("Email Address", "email", &email) }

                        <div>
                            { field("Password", "password", &password) }
                            {
                                if strength.is_some() {
                                    html! {
                                        <div class="mt-2 w-full bg-gray-200 dark:bg-gray-700 rounded-full h-1.5">
                                            <div class={format!("h-1.5 rounded-full transition-all {} {}", bar_class, bar_width)}></div>
                                        </div>
                                    }
                                } else {
                                    html! {}
                                }
                            }
                        </div>

                        { field("Confirm Password", "password", &confirm) }

                        <button
                            type="submit"
                            disabled={*loading}
                            class="w-full py-3 rounded-lg font-semibold text-white bg-gradient-to-r from-green-600 to-emerald-600 hover:from-green-700 hover:to-emerald-700 disabled:opacity-50 transition"
                        >
                            { if *loading { "Creating Account..." } else { "Create Account" } }
                        </button>

                        <p class="text-center text-gray-600 dark:text-gray-400 text-sm">
                            {"Already have an account? "}
                            <Link<Route> to={Route::Login} classes="text-green-600 dark:text-green-400 font-semibold">
                                {"Sign in"}
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
    fn signup_requires_every_field() {
        assert!(validate_signup("", "a@b.c", "longenough", "longenough").is_err());
        assert!(validate_signup("Asha", "", "longenough", "longenough").is_err());
        assert!(validate_signup("Asha", "a@b.c", "", "").is_err());
    }

    #[test]
    fn signup_rejects_mismatched_passwords() {
        let err = validate_signup("Asha", "a@b.c", "longenough", "different").unwrap_err();
        assert_eq!(err, "Passwords don't match");
    }

    #[test]
    fn signup_rejects_short_passwords() {
        let err = validate_signup("Asha", "a@b.c", "short1", "short1").unwrap_err();
        assert_eq!(err, "Password must be at least 8 characters");
    }

    #[test]
    fn signup_normalizes_name_and_email() {
        let (name, email, password) =
            validate_signup(" Asha ", " ASHA@Example.com", "longenough", "longenough").unwrap();
        assert_eq!(name, "Asha");
        assert_eq!(email, "asha@example.com");
        assert_eq!(password, "longenough");
    }

    #[test]
    fn strength_is_advisory_tiers() {
        assert_eq!(classify_password(""), None);
        assert_eq!(classify_password("abc"), Some(Strength::Weak));
        assert_eq!(classify_password("abcdef1"), Some(Strength::Medium));
        assert_eq!(classify_password("Abcdef1!"), Some(Strength::Strong));
        // long but single-class stays weak
        assert_eq!(classify_password("aaaaaaaaaa"), Some(Strength::Weak));
    }

    #[test]
    fn weak_but_long_password_still_passes_validation() {
        // the strength meter never blocks submission beyond the length check
        assert!(validate_signup("Asha", "a@b.c", "aaaaaaaaaa", "aaaaaaaaaa").is_ok());
        assert_eq!(classify_password("aaaaaaaaaa"), Some(Strength::Weak));
    }
}
