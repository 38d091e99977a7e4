use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::session::use_session;
use crate::Route;

// URL-safe identifier for a special context, e.g. "Goa Trip" -> "goa-trip".
fn slugify(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

#[function_component(DashboardScreen)]
pub fn dashboard_screen() -> Html {
    let session = use_session();
    let navigator = use_navigator().expect("DashboardScreen rendered inside the router");
    let special_name = use_state(String::new);

    let name = session
        .user
        .as_ref()
        .map(|user| user.name.clone())
        .unwrap_or_else(|| "User".to_string());

    let on_open_special = {
        let special_name = special_name.clone();
        let navigator = navigator.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let slug = slugify(&special_name);
            if slug.is_empty() {
                return;
            }
            special_name.set(String::new());
            navigator.push(&Route::SpecialExpenses { context_id: slug });
        })
    };

    let card = |emoji: &'static str,
                badge: &'static str,
                title: &'static str,
                blurb: &'static str,
                route: Route| {
        let navigator = navigator.clone();
        html! {
            <button
                onclick={Callback::from(move |_| navigator.push(&route))}
                class="text-left w-full bg-white dark:bg-gray-800 border border-slate-200 dark:border-gray-700 rounded-2xl p-6 shadow hover:shadow-xl transition-all duration-300 hover:-translate-y-1"
            >
                <div class="flex items-center gap-4">
                    <div class={format!("w-12 h-12 rounded-xl {} flex items-center justify-center text-2xl", badge)}>
                        { emoji }
                    </div>
                    <div>
                        <h3 class="text-lg font-semibold text-slate-800 dark:text-white">{ title }</h3>
                        <p class="text-sm text-slate-600 dark:text-gray-400">{ blurb }</p>
                    </div>
                </div>
            </button>
        }
    };

    html! {
        <div class="max-w-7xl mx-auto px-4 py-8">
            <div class="mb-8">
                <h1 class="text-2xl md:text-3xl font-bold text-slate-800 dark:text-white">
                    { format!("Welcome back, {} 👋", name) }
                </h1>
                <p class="text-slate-600 dark:text-gray-300 mt-1">{"Choose what you want to manage today"}</p>
            </div>

            <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                { card(
                    "💳",
                    "bg-slate-100 text-slate-600",
                    "All Transactions",
                    "Everything in one list, with totals",
                    Route::Expenses,
                ) }
                { card(
                    "📅",
                    "bg-blue-100 text-blue-600",
                    "General Expenses",
                    "Track daily, weekly & monthly expenses",
                    Route::GeneralYears,
                ) }
                { card(
                    "📝",
                    "bg-yellow-100 text-yellow-600",
                    "Notes",
                    "Save reminders & important thoughts",
                    Route::Notes,
                ) }
            </div>

            <div class="mt-6 bg-white dark:bg-gray-800 border border-slate-200 dark:border-gray-700 rounded-2xl p-6 shadow">
                <div class="flex items-center gap-4 mb-4">
                    <div class="w-12 h-12 rounded-xl bg-purple-100 text-purple-600 flex items-center justify-center text-2xl">
                        {"✈️"}
                    </div>
                    <div>
                        <h3 class="text-lg font-semibold text-slate-800 dark:text-white">{"Special Context"}</h3>
                        <p class="text-sm text-slate-600 dark:text-gray-400">{"Trips, events, projects & more"}</p>
                    </div>
                </div>
                <form class="flex gap-3" onsubmit={on_open_special}>
                    <input
                        placeholder="Name a trip or event, e.g. Goa Trip"
                        value={(*special_name).clone()}
                        oninput={{
                            let special_name = special_name.clone();
                            Callback::from(move |e: InputEvent| {
                                let input: HtmlInputElement = e.target_unchecked_into();
                                special_name.set(input.value());
                            })
                        }}
                        class="flex-1 px-3 py-2 rounded-lg border border-slate-300 dark:border-gray-600 bg-white dark:bg-gray-700 text-slate-900 dark:text-white"
                    />
                    <button
                        type="submit"
                        class="px-5 py-2 bg-purple-600 text-white rounded-lg font-semibold hover:bg-purple-700"
                    >
                        {"Open"}
                    </button>
                </form>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_makes_url_safe_ids() {
        assert_eq!(slugify("Goa Trip"), "goa-trip");
        assert_eq!(slugify("  Diwali   2024  "), "diwali-2024");
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("   "), "");
    }
}
