use yew::prelude::*;
use yew_router::prelude::*;

mod api;
mod format;
mod guard;
mod models;
mod notify;
mod screens;
mod session;
mod shell;

use guard::RequireAuth;
use models::ExpenseScope;
use notify::{NoticeHost, NoticeProvider};
use screens::dashboard::DashboardScreen;
use screens::expenses::ExpensesScreen;
use screens::login::LoginScreen;
use screens::notes::NotesScreen;
use screens::periods::{week_label, MonthSelect, WeekSelect, YearSelect};
use screens::signup::SignupScreen;
use session::SessionProvider;
use shell::Navbar;

#[derive(Clone, Debug, PartialEq, Routable)]
pub enum Route {
    #[at("/")]
    Dashboard,
    #[at("/login")]
    Login,
    #[at("/signup")]
    Signup,
    #[at("/expenses")]
    Expenses,
    #[at("/expenses/general")]
    GeneralYears,
    #[at("/expenses/general/:year")]
    GeneralMonths { year: i32 },
    #[at("/expenses/general/:year/:month")]
    GeneralWeeks { year: i32, month: String },
    #[at("/expenses/general/:year/:month/:week")]
    GeneralExpenses { year: i32, month: String, week: u8 },
    #[at("/expenses/special/:context_id")]
    SpecialExpenses { context_id: String },
    #[at("/notes")]
    Notes,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn guarded(inner: Html) -> Html {
    html! { <RequireAuth>{ inner }</RequireAuth> }
}

fn switch(route: Route) -> Html {
    match route {
        Route::Login => html! { <LoginScreen /> },
        Route::Signup => html! { <SignupScreen /> },
        Route::Dashboard => guarded(html! { <DashboardScreen /> }),
        Route::Expenses => guarded(html! { <ExpensesScreen /> }),
        Route::GeneralYears => guarded(html! { <YearSelect /> }),
        Route::GeneralMonths { year } => guarded(html! { <MonthSelect year={year} /> }),
        Route::GeneralWeeks { year, month } => {
            guarded(html! { <WeekSelect year={year} month={month} /> })
        }
        Route::GeneralExpenses { year, month, week } => {
            let scope = ExpenseScope::General {
                year,
                month: Some(month),
                week: Some(week_label(week)),
            };
            guarded(html! { <ExpensesScreen scope={scope} /> })
        }
        Route::SpecialExpenses { context_id } => {
            let scope = ExpenseScope::Special { context_id };
            guarded(html! { <ExpensesScreen scope={scope} /> })
        }
        Route::Notes => guarded(html! { <NotesScreen /> }),
        Route::NotFound => html! { <Redirect<Route> to={Route::Dashboard} /> },
    }
}

#[function_component(App)]
fn app() -> Html {
    html! {
        <SessionProvider>
            <NoticeProvider>
                <BrowserRouter>
                    <Navbar />
                    <NoticeHost />
                    <main class="pt-16 min-h-screen bg-gradient-to-br from-slate-50 to-slate-100 dark:from-gray-900 dark:to-gray-800">
                        <Switch<Route> render={switch} />
                    </main>
                </BrowserRouter>
            </NoticeProvider>
        </SessionProvider>
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("starting expense tracker frontend");
    yew::Renderer::<App>::new().render();
}
