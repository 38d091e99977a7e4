use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::{self, FetchSeq};
use crate::format;
use crate::guard::handle_api_error;
use crate::models::{
    category_label, sort_newest_first, ExpenseScope, NewTransaction, Period, Summary, Transaction,
    TxKind, CATEGORIES, DEFAULT_GROUP,
};
use crate::notify::{self, use_notifier, Level, Notifier};
use crate::session::{use_session, SessionHandle};

#[derive(Clone, Debug, PartialEq)]
struct ExpenseForm {
    amount: String,
    category: String,
    kind: TxKind,
    date: String,
    description: String,
    group: String,
}

impl ExpenseForm {
    fn with_today() -> Self {
        Self {
            amount: String::new(),
            category: String::new(),
            kind: TxKind::Spent,
            date: format::today(),
            description: String::new(),
            group: DEFAULT_GROUP.to_string(),
        }
    }

    // Client-side checks only; anything else is the backend's call.
    fn build(&self, scope: &ExpenseScope) -> Result<NewTransaction, String> {
        if self.amount.trim().is_empty()
            || self.category.trim().is_empty()
            || self.date.trim().is_empty()
        {
            return Err("Please fill all required fields".to_string());
        }
        let amount: f64 = self
            .amount
            .trim()
            .parse()
            .map_err(|_| "Amount must be a positive number".to_string())?;
        if !(amount > 0.0) {
            return Err("Amount must be a positive number".to_string());
        }
        let group = self.group.trim();
        Ok(NewTransaction {
            amount,
            category: self.category.trim().to_string(),
            kind: self.kind,
            date: self.date.trim().to_string(),
            description: self.description.trim().to_string(),
            group: if group.is_empty() {
                DEFAULT_GROUP.to_string()
            } else {
                group.to_string()
            },
            context: scope.tag(),
        })
    }
}

#[derive(Properties, PartialEq)]
pub struct ExpensesScreenProps {
    #[prop_or(ExpenseScope::All)]
    pub scope: ExpenseScope,
}

#[allow(clippy::too_many_arguments)]
fn refresh(
    scope: ExpenseScope,
    period: Period,
    seq: FetchSeq,
    expenses: UseStateHandle<Vec<Transaction>>,
    loading: UseStateHandle<bool>,
    session: SessionHandle,
    navigator: Navigator,
    notifier: Notifier,
) {
    let ticket = seq.begin();
    loading.set(true);
    spawn_local(async move {
        let result = api::list_expenses(&scope, period).await;
        // a newer fetch was issued while this one was in flight
        if !ticket.is_current() {
            log::info!("dropping stale transaction list response");
            return;
        }
        match result {
            Ok(mut list) => {
                sort_newest_first(&mut list);
                expenses.set(list);
            }
            Err(err) => handle_api_error(&err, &session, &navigator, &notifier),
        }
        loading.set(false);
    });
}

#[function_component(ExpensesScreen)]
pub fn expenses_screen(props: &ExpensesScreenProps) -> Html {
    let expenses = use_state(Vec::<Transaction>::new);
    let loading = use_state(|| true);
    let period = use_state(|| Period::All);
    let form = use_state(ExpenseForm::with_today);
    let saving = use_state(|| false);
    let seq = use_mut_ref(FetchSeq::default);

    let session = use_session();
    let notifier = use_notifier();
    let navigator = use_navigator().expect("ExpensesScreen rendered inside the router");

    // initial fetch, re-fired whenever the scope or the period filter changes
    {
        let expenses = expenses.clone();
        let loading = loading.clone();
        let seq = seq.clone();
        let session = session.clone();
        let navigator = navigator.clone();
        let notifier = notifier.clone();
        use_effect_with_deps(
            move |(scope, period): &(ExpenseScope, Period)| {
                refresh(
                    scope.clone(),
                    *period,
                    seq.borrow().clone(),
                    expenses,
                    loading,
                    session,
                    navigator,
                    notifier,
                );
                || ()
            },
            (props.scope.clone(), *period),
        );
    }

    let on_submit = {
        let form = form.clone();
        let saving = saving.clone();
        let scope = props.scope.clone();
        let period = period.clone();
        let expenses = expenses.clone();
        let loading = loading.clone();
        let seq = seq.clone();
        let session = session.clone();
        let navigator = navigator.clone();
        let notifier = notifier.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let payload = match form.build(&scope) {
                Ok(payload) => payload,
                Err(msg) => {
                    notify::notify(&notifier, Level::Warning, msg);
                    return;
                }
            };

            saving.set(true);

            let form = form.clone();
            let saving = saving.clone();
            let scope = scope.clone();
            let period = period.clone();
            let expenses = expenses.clone();
            let loading = loading.clone();
            let seq = seq.clone();
            let session = session.clone();
            let navigator = navigator.clone();
            let notifier = notifier.clone();
            spawn_local(async move {
                match api::insert_expense(&payload).await {
                    Ok(()) => {
                        notify::notify(&notifier, Level::Success, "Transaction added successfully");
                        form.set(ExpenseForm::with_today());
                        // no optimistic insert, the list is re-fetched whole
                        refresh(
                            scope,
                            *period,
                            seq.borrow().clone(),
                            expenses,
                            loading,
                            session,
                            navigator,
                            notifier,
                        );
                    }
                    Err(err) => handle_api_error(&err, &session, &navigator, &notifier),
                }
                saving.set(false);
            });
        })
    };

    let on_delete = {
        let scope = props.scope.clone();
        let period = period.clone();
        let expenses = expenses.clone();
        let loading = loading.clone();
        let seq = seq.clone();
        let session = session.clone();
        let navigator = navigator.clone();
        let notifier = notifier.clone();
        Callback::from(move |id: String| {
            let confirmed = web_sys::window()
                .map(|w| {
                    w.confirm_with_message("Are you sure you want to delete this transaction?")
                        .unwrap_or(false)
                })
                .unwrap_or(false);
            if !confirmed {
                return;
            }

            let scope = scope.clone();
            let period = period.clone();
            let expenses = expenses.clone();
            let loading = loading.clone();
            let seq = seq.clone();
            let session = session.clone();
            let navigator = navigator.clone();
            let notifier = notifier.clone();
            spawn_local(async move {
                match api::delete_expense(&id).await {
                    Ok(()) => {
                        notify::notify(&notifier, Level::Success, "Transaction deleted");
                        refresh(
                            scope,
                            *period,
                            seq.borrow().clone(),
                            expenses,
                            loading,
                            session,
                            navigator,
                            notifier,
                        );
                    }
                    Err(err) => handle_api_error(&err, &session, &navigator, &notifier),
                }
            });
        })
    };

    let summary = Summary::of(&expenses);

    let set_field = |apply: fn(&mut ExpenseForm, String)| {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut next = (*form).clone();
            apply(&mut next, value);
            form.set(next);
        })
    };
    let on_amount = set_field(|f, v| f.amount = v);
    let on_category = set_field(|f, v| f.category = v);
    let on_kind = set_field(|f, v| {
        f.kind = if v == "received" {
            TxKind::Received
        } else {
            TxKind::Spent
        }
    });
    let on_date = set_field(|f, v| f.date = v);
    let on_description = set_field(|f, v| f.description = v);
    let on_group = set_field(|f, v| f.group = v);

    html! {
        <div class="max-w-7xl mx-auto px-4 py-6 space-y-6">
            <div class="flex flex-col sm:flex-row sm:items-center sm:justify-between gap-4">
                <h1 class="text-2xl font-bold text-slate-800 dark:text-white">{ props.scope.title() }</h1>
                <nav class="flex gap-2">
                    { for Period::CHOICES.iter().map(|choice| {
                        let is_active = *period == *choice;
                        let class_name = if is_active {
                            "px-3 py-2 rounded-lg text-sm bg-blue-100 dark:bg-blue-900 text-blue-700 dark:text-blue-300 border border-blue-200 dark:border-blue-800"
                        } else {
                            "px-3 py-2 rounded-lg text-sm text-slate-600 dark:text-gray-300 hover:bg-slate-100 dark:hover:bg-gray-800"
                        };
                        let period = period.clone();
                        let choice = *choice;
                        html! {
                            <button class={class_name} onclick={Callback::from(move |_| period.set(choice))}>
                                { choice.label() }
                            </button>
                        }
                    }) }
                </nav>
            </div>

            <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-4">
                <SummaryCard title="Total Spent" value={summary.total_spent} accent="from-red-500 to-pink-600" emoji="💸" />
                <SummaryCard title="Total Received" value={summary.total_received} accent="from-green-500 to-emerald-600" emoji="💰" />
                <SummaryCard
                    title="Balance"
                    value={summary.balance}
                    accent={if summary.balance >= 0.0 { "from-blue-500 to-cyan-600" } else { "from-orange-500 to-red-600" }}
                    emoji={if summary.balance >= 0.0 { "📈" } else { "📉" }}
                />
            </div>

            <div class="grid grid-cols-1 xl:grid-cols-2 gap-6">
                <div class="bg-white dark:bg-gray-800 rounded-2xl shadow-lg border border-slate-200 dark:border-gray-700 p-6">
                    <h2 class="text-xl font-bold text-slate-800 dark:text-white mb-5">{"➕ Add New Transaction"}</h2>

                    <form onsubmit={on_submit} class="space-y-4">
                        <div class="grid grid-cols-1 sm:grid-cols-2 gap-4">
                            <div>
                                <label class="block text-sm font-medium text-slate-700 dark:text-gray-300 mb-1">{"Amount"}</label>
                                <input
                                    type="number"
                                    step="0.01"
                                    min="0"
                                    placeholder="0.00"
                                    value={form.amount.clone()}
                                    oninput={{
                                        let on_amount = on_amount.clone();
                                        Callback::from(move |e: InputEvent| {
                                            let input: HtmlInputElement = e.target_unchecked_into();
                                            on_amount.emit(input.value());
                                        })
                                    }}
                                    class="w-full px-3 py-2 rounded-lg border border-slate-300 dark:border-gray-600 bg-white dark:bg-gray-700 text-slate-900 dark:text-white"
                                />
                            </div>
                            <div>
                                <label class="block text-sm font-medium text-slate-700 dark:text-gray-300 mb-1">{"Category"}</label>
                                <select
                                    value={form.category.clone()}
                                    onchange={{
                                        let on_category = on_category.clone();
                                        Callback::from(move |e: Event| {
                                            let select: HtmlSelectElement = e.target_unchecked_into();
                                            on_category.emit(select.value());
                                        })
                                    }}
                                    class="w-full px-3 py-2 rounded-lg border border-slate-300 dark:border-gray-600 bg-white dark:bg-gray-700 text-slate-900 dark:text-white"
                                >
                                    <option value="" selected={form.category.is_empty()}>{"Select category"}</option>
                                    { for CATEGORIES.iter().map(|(value, label)| html! {
                                        <option value={*value} selected={form.category == *value}>{ *label }</option>
                                    }) }
                                </select>
                            </div>
                            <div>
                                <label class="block text-sm font-medium text-slate-700 dark:text-gray-300 mb-1">{"Type"}</label>
                                <select
                                    onchange={{
                                        let on_kind = on_kind.clone();
                                        Callback::from(move |e: Event| {
                                            let select: HtmlSelectElement = e.target_unchecked_into();
                                            on_kind.emit(select.value());
                                        })
                                    }}
                                    class="w-full px-3 py-2 rounded-lg border border-slate-300 dark:border-gray-600 bg-white dark:bg-gray-700 text-slate-900 dark:text-white"
                                >
                                    <option value="spent" selected={form.kind == TxKind::Spent}>{"💸 Spent"}</option>
                                    <option value="received" selected={form.kind == TxKind::Received}>{"💰 Received"}</option>
                                </select>
                            </div>
                            <div>
                                <label class="block text-sm font-medium text-slate-700 dark:text-gray-300 mb-1">{"Date"}</label>
                                <input
                                    type="date"
                                    value={form.date.clone()}
                                    oninput={{
                                        let on_date = on_date.clone();
                                        Callback::from(move |e: InputEvent| {
                                            let input: HtmlInputElement = e.target_unchecked_into();
                                            on_date.emit(input.value());
                                        })
                                    }}
                                    class="w-full px-3 py-2 rounded-lg border border-slate-300 dark:border-gray-600 bg-white dark:bg-gray-700 text-slate-900 dark:text-white"
                                />
                            </div>
                            <div>
                                <label class="block text-sm font-medium text-slate-700 dark:text-gray-300 mb-1">{"Group"}</label>
                                <input
                                    type="text"
                                    placeholder={DEFAULT_GROUP}
                                    value={form.group.clone()}
                                    oninput={{
                                        let on_group = on_group.clone();
                                        Callback::from(move |e: InputEvent| {
                                            let input: HtmlInputElement = e.target_unchecked_into();
                                            on_group.emit(input.value());
                                        })
                                    }}
                                    class="w-full px-3 py-2 rounded-lg border border-slate-300 dark:border-gray-600 bg-white dark:bg-gray-700 text-slate-900 dark:text-white"
                                />
                            </div>
                        </div>

                        <div>
                            <label class="block text-sm font-medium text-slate-700 dark:text-gray-300 mb-1">{"Description"}</label>
                            <textarea
                                rows="2"
                                placeholder="Optional note"
                                value={form.description.clone()}
                                oninput={{
                                    let on_description = on_description.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let area: HtmlTextAreaElement = e.target_unchecked_into();
                                        on_description.emit(area.value());
                                    })
                                }}
                                class="w-full px-3 py-2 rounded-lg border border-slate-300 dark:border-gray-600 bg-white dark:bg-gray-700 text-slate-900 dark:text-white resize-none"
                            />
                        </div>

                        <button
                            type="submit"
                            disabled={*saving}
                            class="w-full bg-gradient-to-r from-blue-600 to-purple-600 text-white py-3 rounded-lg font-semibold hover:from-blue-700 hover:to-purple-700 disabled:opacity-50"
                        >
                            { if *saving { "Saving..." } else { "Add Transaction" } }
                        </button>
                    </form>
                </div>

                <div class="bg-white dark:bg-gray-800 rounded-2xl shadow-lg border border-slate-200 dark:border-gray-700 overflow-hidden">
                    <div class="p-6 border-b border-slate-200 dark:border-gray-700">
                        <h2 class="text-xl font-bold text-slate-800 dark:text-white">{"Recent Transactions"}</h2>
                    </div>
                    {
                        if *loading {
                            html! { <p class="p-6 text-slate-500 dark:text-gray-400">{"Loading..."}</p> }
                        } else if expenses.is_empty() {
                            html! { <p class="p-6 text-slate-500 dark:text-gray-400 text-center">{"No transactions yet"}</p> }
                        } else {
                            html! {
                                <div class="divide-y divide-slate-100 dark:divide-gray-700">
                                    { for expenses.iter().map(|tx| {
                                        let on_delete = on_delete.clone();
                                        let id = tx.id.clone();
                                        html! {
                                            <ExpenseRow
                                                key={tx.id.clone()}
                                                transaction={tx.clone()}
                                                on_delete={Callback::from(move |_| on_delete.emit(id.clone()))}
                                            />
                                        }
                                    }) }
                                </div>
                            }
                        }
                    }
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct SummaryCardProps {
    title: &'static str,
    value: f64,
    accent: &'static str,
    emoji: &'static str,
}

#[function_component(SummaryCard)]
fn summary_card(props: &SummaryCardProps) -> Html {
    html! {
        <div class={format!("bg-gradient-to-br {} rounded-2xl p-5 text-white shadow-lg", props.accent)}>
            <div class="flex items-center justify-between">
                <div>
                    <p class="text-white/80 text-xs font-medium uppercase tracking-wide">{ props.title }</p>
                    <p class="text-3xl font-bold mt-2">{ format::amount(props.value) }</p>
                </div>
                <div class="text-3xl">{ props.emoji }</div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ExpenseRowProps {
    transaction: Transaction,
    on_delete: Callback<()>,
}

#[function_component(ExpenseRow)]
fn expense_row(props: &ExpenseRowProps) -> Html {
    let tx = &props.transaction;
    let spent = tx.kind == TxKind::Spent;
    let amount_class = if spent {
        "font-semibold text-red-600 dark:text-red-400"
    } else {
        "font-semibold text-green-600 dark:text-green-400"
    };

    let on_delete = props.on_delete.clone();

    html! {
        <div class="flex justify-between items-center p-4 hover:bg-slate-50 dark:hover:bg-gray-700/50 transition-colors">
            <div class="min-w-0">
                <p class={amount_class}>{ format::signed_amount(tx.amount, spent) }</p>
                <p class="text-sm text-slate-500 dark:text-gray-400">
                    <span class="bg-slate-100 dark:bg-gray-700 px-2 py-0.5 rounded-full text-xs mr-2">{ category_label(&tx.category) }</span>
                    { format::calendar_date(&tx.date) }
                    { if tx.group != DEFAULT_GROUP { format!(" • {}", tx.group) } else { String::new() } }
                </p>
                {
                    if !tx.description.is_empty() {
                        html! { <p class="text-sm text-slate-600 dark:text-gray-300 mt-1 truncate">{ &tx.description }</p> }
                    } else {
                        html! {}
                    }
                }
            </div>
            <button
                onclick={Callback::from(move |_| on_delete.emit(()))}
                class="text-red-400 hover:text-red-600 hover:bg-red-50 dark:hover:bg-gray-700 p-2 rounded-lg ml-3"
                title="Delete"
            >
                {"🗑️"}
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContextKind;

    fn filled_form() -> ExpenseForm {
        ExpenseForm {
            amount: "250".to_string(),
            category: "food".to_string(),
            kind: TxKind::Spent,
            date: "2024-03-01".to_string(),
            description: "  lunch  ".to_string(),
            group: String::new(),
        }
    }

    #[test]
    fn build_rejects_missing_required_fields() {
        let mut form = filled_form();
        form.amount = String::new();
        assert_eq!(
            form.build(&ExpenseScope::All).unwrap_err(),
            "Please fill all required fields"
        );

        let mut form = filled_form();
        form.category = "  ".to_string();
        assert!(form.build(&ExpenseScope::All).is_err());

        let mut form = filled_form();
        form.date = String::new();
        assert!(form.build(&ExpenseScope::All).is_err());
    }

    #[test]
    fn build_rejects_non_positive_amounts() {
        for bad in ["0", "-5", "abc", "NaN"] {
            let mut form = filled_form();
            form.amount = bad.to_string();
            assert_eq!(
                form.build(&ExpenseScope::All).unwrap_err(),
                "Amount must be a positive number",
                "amount {bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn build_trims_and_defaults_group() {
        let payload = filled_form().build(&ExpenseScope::All).unwrap();
        assert_eq!(payload.amount, 250.0);
        assert_eq!(payload.description, "lunch");
        assert_eq!(payload.group, DEFAULT_GROUP);
        assert_eq!(payload.context.context_type, None);
    }

    #[test]
    fn build_attaches_scope_context() {
        let scope = ExpenseScope::Special {
            context_id: "goa-trip".to_string(),
        };
        let payload = filled_form().build(&scope).unwrap();
        assert_eq!(payload.context.context_type, Some(ContextKind::Special));
        assert_eq!(payload.context.special_context_id.as_deref(), Some("goa-trip"));
    }

    #[test]
    fn fresh_form_defaults_to_spent_personal() {
        let form = ExpenseForm::with_today();
        assert_eq!(form.kind, TxKind::Spent);
        assert_eq!(form.group, DEFAULT_GROUP);
        assert!(form.amount.is_empty());
    }
}
