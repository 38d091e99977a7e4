use yew::prelude::*;
use yew_router::prelude::*;

use crate::format;
use crate::Route;

pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const WEEKS_PER_MONTH: u8 = 5;

pub fn week_label(week: u8) -> String {
    format!("Week {}", week)
}

fn tile(label: String, onclick: Callback<MouseEvent>) -> Html {
    html! {
        <button
            onclick={onclick}
            class="cursor-pointer bg-white dark:bg-gray-800 border border-slate-200 dark:border-gray-700 rounded-xl p-6 text-center shadow hover:scale-105 transition font-semibold text-slate-800 dark:text-white"
        >
            { label }
        </button>
    }
}

#[function_component(YearSelect)]
pub fn year_select() -> Html {
    let navigator = use_navigator().expect("YearSelect rendered inside the router");
    let current = format::current_year();
    let years = (0..5).map(|back| current - back);

    html! {
        <div class="max-w-4xl mx-auto px-4 py-6">
            <h2 class="text-2xl font-bold text-slate-800 dark:text-white mb-4">{"📅 Select Year"}</h2>
            <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                { for years.map(|year| {
                    let navigator = navigator.clone();
                    tile(
                        year.to_string(),
                        Callback::from(move |_| navigator.push(&Route::GeneralMonths { year })),
                    )
                }) }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct MonthSelectProps {
    pub year: i32,
}

#[function_component(MonthSelect)]
pub fn month_select(props: &MonthSelectProps) -> Html {
    let navigator = use_navigator().expect("MonthSelect rendered inside the router");
    let year = props.year;

    html! {
        <div class="max-w-4xl mx-auto px-4 py-6">
            <h2 class="text-2xl font-bold text-slate-800 dark:text-white mb-4">
                { format!("🗓️ {} — Select Month", year) }
            </h2>
            <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                { for MONTHS.iter().map(|month| {
                    let navigator = navigator.clone();
                    let month_str = month.to_string();
                    tile(
                        month_str.clone(),
                        Callback::from(move |_| {
                            navigator.push(&Route::GeneralWeeks {
                                year,
                                month: month_str.clone(),
                            })
                        }),
                    )
                }) }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct WeekSelectProps {
    pub year: i32,
    pub month: String,
}

#[function_component(WeekSelect)]
pub fn week_select(props: &WeekSelectProps) -> Html {
    let navigator = use_navigator().expect("WeekSelect rendered inside the router");
    let year = props.year;

    html! {
        <div class="max-w-4xl mx-auto px-4 py-6">
            <h2 class="text-2xl font-bold text-slate-800 dark:text-white mb-4">
                { format!("📆 {} {} — Select Week", props.month, year) }
            </h2>
            <div class="grid grid-cols-2 md:grid-cols-5 gap-4">
                { for (1..=WEEKS_PER_MONTH).map(|week| {
                    let navigator = navigator.clone();
                    let month = props.month.clone();
                    tile(
                        week_label(week),
                        Callback::from(move |_| {
                            navigator.push(&Route::GeneralExpenses {
                                year,
                                month: month.clone(),
                                week,
                            })
                        }),
                    )
                }) }
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn week_labels_match_backend_values() {
        assert_eq!(week_label(1), "Week 1");
        assert_eq!(week_label(WEEKS_PER_MONTH), "Week 5");
    }

    #[test]
    fn month_table_is_complete() {
        assert_eq!(MONTHS.len(), 12);
        assert_eq!(MONTHS[0], "January");
        assert_eq!(MONTHS[11], "December");
    }
}
