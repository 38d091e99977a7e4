use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::{self, FetchSeq};
use crate::format;
use crate::guard::handle_api_error;
use crate::models::{ContextKind, Direction, NewNote, Note};
use crate::notify::{self, use_notifier, Level, Notifier};
use crate::session::{use_session, SessionHandle};

// `None` means "all": the filter parameter is omitted from the request.
type NoteFilter = Option<ContextKind>;

const FILTER_CHOICES: [(NoteFilter, &str); 3] = [
    (None, "All"),
    (Some(ContextKind::General), "General"),
    (Some(ContextKind::Special), "Special"),
];

#[derive(Clone, Debug, Default, PartialEq)]
struct NoteForm {
    text: String,
    amount: String,
    direction: Direction,
    person: String,
    context_type: ContextKind,
    special_title: String,
}

impl NoteForm {
    fn build(&self) -> Result<NewNote, String> {
        let text = self.text.trim();
        if text.is_empty() {
            return Err("Note text is required".to_string());
        }
        if self.context_type == ContextKind::Special && self.special_title.trim().is_empty() {
            return Err("Special title is required".to_string());
        }
        // blank amount is omitted entirely, never sent as zero or null
        let amount = match self.amount.trim() {
            "" => None,
            raw => Some(
                raw.parse::<f64>()
                    .map_err(|_| "Amount must be a number".to_string())?,
            ),
        };
        let person = match self.person.trim() {
            "" => None,
            name => Some(name.to_string()),
        };
        let special_title = if self.context_type == ContextKind::Special {
            Some(self.special_title.trim().to_string())
        } else {
            None
        };
        Ok(NewNote {
            text: text.to_string(),
            amount,
            direction: self.direction,
            person,
            context_type: self.context_type,
            special_title,
        })
    }
}

fn refresh(
    filter: NoteFilter,
    seq: FetchSeq,
    notes: UseStateHandle<Vec<Note>>,
    session: SessionHandle,
    navigator: Navigator,
    notifier: Notifier,
) {
    let ticket = seq.begin();
    spawn_local(async move {
        let result = api::list_notes(filter.map(|kind| kind.as_str())).await;
        if !ticket.is_current() {
            log::info!("dropping stale note list response");
            return;
        }
        match result {
            Ok(list) => notes.set(list),
            Err(err) => handle_api_error(&err, &session, &navigator, &notifier),
        }
    });
}

#[function_component(NotesScreen)]
pub fn notes_screen() -> Html {
    let notes = use_state(Vec::<Note>::new);
    let filter = use_state(|| NoteFilter::None);
    let show_dialog = use_state(|| false);
    let seq = use_mut_ref(FetchSeq::default);

    let session = use_session();
    let notifier = use_notifier();
    let navigator = use_navigator().expect("NotesScreen rendered inside the router");

    {
        let notes = notes.clone();
        let seq = seq.clone();
        let session = session.clone();
        let navigator = navigator.clone();
        let notifier = notifier.clone();
        use_effect_with_deps(
            move |filter: &NoteFilter| {
                refresh(*filter, seq.borrow().clone(), notes, session, navigator, notifier);
                || ()
            },
            *filter,
        );
    }

    let on_created = {
        let filter = filter.clone();
        let notes = notes.clone();
        let show_dialog = show_dialog.clone();
        let seq = seq.clone();
        let session = session.clone();
        let navigator = navigator.clone();
        let notifier = notifier.clone();
        Callback::from(move |_| {
            show_dialog.set(false);
            refresh(
                *filter,
                seq.borrow().clone(),
                notes.clone(),
                session.clone(),
                navigator.clone(),
                notifier.clone(),
            );
        })
    };

    let on_delete = {
        let filter = filter.clone();
        let notes = notes.clone();
        let seq = seq.clone();
        let session = session.clone();
        let navigator = navigator.clone();
        let notifier = notifier.clone();
        Callback::from(move |id: String| {
            let confirmed = web_sys::window()
                .map(|w| w.confirm_with_message("Delete this note?").unwrap_or(false))
                .unwrap_or(false);
            if !confirmed {
                return;
            }

            let filter = filter.clone();
            let notes = notes.clone();
            let seq = seq.clone();
            let session = session.clone();
            let navigator = navigator.clone();
            let notifier = notifier.clone();
            spawn_local(async move {
                match api::delete_note(&id).await {
                    Ok(()) => {
                        notify::notify(&notifier, Level::Success, "Note deleted");
                        refresh(
                            *filter,
                            seq.borrow().clone(),
                            notes,
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

    let open_dialog = {
        let show_dialog = show_dialog.clone();
        Callback::from(move |_| show_dialog.set(true))
    };
    let close_dialog = {
        let show_dialog = show_dialog.clone();
        Callback::from(move |_| show_dialog.set(false))
    };

    html! {
        <div class="max-w-4xl mx-auto px-4 py-6">
            <div class="flex justify-between items-center mb-6">
                <h2 class="text-2xl sm:text-3xl font-bold text-slate-800 dark:text-white">{"📝 Notes"}</h2>
                <button
                    onclick={open_dialog.clone()}
                    class="bg-gradient-to-r from-blue-600 to-purple-600 text-white px-4 py-2 rounded-lg hover:from-blue-700 hover:to-purple-700 shadow-lg"
                >
                    {"+ Add Note"}
                </button>
            </div>

            <div class="flex gap-2 mb-6">
                { for FILTER_CHOICES.iter().map(|(choice, label)| {
                    let is_active = *filter == *choice;
                    let class_name = if is_active {
                        "px-4 py-2 rounded-lg text-sm font-medium bg-blue-100 dark:bg-blue-900 text-blue-700 dark:text-blue-300"
                    } else {
                        "px-4 py-2 rounded-lg text-sm font-medium bg-slate-100 dark:bg-gray-700 text-slate-700 dark:text-gray-300 hover:bg-slate-200 dark:hover:bg-gray-600"
                    };
                    let filter = filter.clone();
                    let choice = *choice;
                    html! {
                        <button class={class_name} onclick={Callback::from(move |_| filter.set(choice))}>
                            { *label }
                        </button>
                    }
                }) }
            </div>

            {
                if notes.is_empty() {
                    html! {
                        <div class="text-center py-12">
                            <div class="text-6xl mb-4">{"📋"}</div>
                            <p class="text-slate-500 dark:text-gray-400 text-lg">{"No notes found"}</p>
                            <p class="text-slate-400 dark:text-gray-500 text-sm mt-1">{"Add your first note to get started!"}</p>
                            <button
                                onclick={open_dialog}
                                class="mt-4 bg-gradient-to-r from-blue-600 to-purple-600 text-white px-6 py-3 rounded-lg font-semibold hover:from-blue-700 hover:to-purple-700"
                            >
                                {"+ Add First Note"}
                            </button>
                        </div>
                    }
                } else {
                    html! {
                        <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                            { for notes.iter().map(|note| {
                                let on_delete = on_delete.clone();
                                let id = note.id.clone();
                                html! {
                                    <NoteCard
                                        key={note.id.clone()}
                                        note={note.clone()}
                                        on_delete={Callback::from(move |_| on_delete.emit(id.clone()))}
                                    />
                                }
                            }) }
                        </div>
                    }
                }
            }

            {
                if *show_dialog {
                    html! { <AddNoteDialog on_close={close_dialog} on_created={on_created} /> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct NoteCardProps {
    note: Note,
    on_delete: Callback<()>,
}

#[function_component(NoteCard)]
fn note_card(props: &NoteCardProps) -> Html {
    let note = &props.note;
    let on_delete = props.on_delete.clone();

    html! {
        <div class="bg-white dark:bg-gray-800 border border-slate-200 dark:border-gray-700 rounded-xl p-4 shadow-sm hover:shadow-md transition-shadow">
            <div class="flex justify-between items-start">
                <div class="flex-1 min-w-0">
                    <p class="text-slate-800 dark:text-white font-medium mb-2">{ &note.text }</p>

                    <div class="flex flex-wrap gap-2 mb-2">
                        {
                            if let Some(amount) = note.amount {
                                let chip = match note.direction {
                                    Direction::Given => "px-2 py-1 rounded text-sm font-semibold bg-red-100 dark:bg-red-900 text-red-600 dark:text-red-300",
                                    Direction::Taken => "px-2 py-1 rounded text-sm font-semibold bg-green-100 dark:bg-green-900 text-green-600 dark:text-green-300",
                                };
                                let label = match note.direction {
                                    Direction::Given => "➖ Given",
                                    Direction::Taken => "➕ Taken",
                                };
                                html! { <span class={chip}>{ format!("{} {}", label, format::amount(amount)) }</span> }
                            } else {
                                html! {}
                            }
                        }
                        {
                            if let Some(person) = &note.person {
                                html! {
                                    <span class="px-2 py-1 bg-slate-100 dark:bg-gray-700 text-slate-600 dark:text-gray-300 rounded text-sm">
                                        { format!("👤 {}", person) }
                                    </span>
                                }
                            } else {
                                html! {}
                            }
                        }
                        {
                            if note.context_type == ContextKind::Special {
                                if let Some(title) = &note.special_title {
                                    html! {
                                        <span class="px-2 py-1 bg-purple-100 dark:bg-purple-900 text-purple-700 dark:text-purple-300 rounded text-sm">
                                            { format!("🎯 {}", title) }
                                        </span>
                                    }
                                } else {
                                    html! {}
                                }
                            } else {
                                html! {}
                            }
                        }
                    </div>

                    <p class="text-xs text-slate-500 dark:text-gray-400">
                        { format!("📅 {}", format::calendar_date(&note.created_at)) }
                    </p>
                </div>

                <button
                    onclick={Callback::from(move |_| on_delete.emit(()))}
                    class="text-red-400 hover:text-red-600 hover:bg-red-50 dark:hover:bg-gray-700 p-2 rounded-lg ml-2"
                    title="Delete"
                >
                    {"🗑️"}
                </button>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct AddNoteDialogProps {
    on_close: Callback<()>,
    on_created: Callback<()>,
}

#[function_component(AddNoteDialog)]
fn add_note_dialog(props: &AddNoteDialogProps) -> Html {
    let form = use_state(NoteForm::default);
    let saving = use_state(|| false);

    let session = use_session();
    let notifier = use_notifier();
    let navigator = use_navigator().expect("AddNoteDialog rendered inside the router");

    let on_submit = {
        let form = form.clone();
        let saving = saving.clone();
        let session = session.clone();
        let notifier = notifier.clone();
        let navigator = navigator.clone();
        let on_created = props.on_created.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let payload = match form.build() {
                Ok(payload) => payload,
                Err(msg) => {
                    notify::notify(&notifier, Level::Warning, msg);
                    return;
                }
            };

            saving.set(true);

            let saving = saving.clone();
            let session = session.clone();
            let notifier = notifier.clone();
            let navigator = navigator.clone();
            let on_created = on_created.clone();
            spawn_local(async move {
                match api::create_note(&payload).await {
                    Ok(()) => {
                        notify::notify(&notifier, Level::Success, "Note added");
                        on_created.emit(());
                    }
                    Err(err) => handle_api_error(&err, &session, &navigator, &notifier),
                }
                saving.set(false);
            });
        })
    };

    let set_field = |apply: fn(&mut NoteForm, String)| {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut next = (*form).clone();
            apply(&mut next, value);
            form.set(next);
        })
    };
    let on_text = set_field(|f, v| f.text = v);
    let on_amount = set_field(|f, v| f.amount = v);
    let on_person = set_field(|f, v| f.person = v);
    let on_special_title = set_field(|f, v| f.special_title = v);
    let on_direction = set_field(|f, v| {
        f.direction = if v == "taken" {
            Direction::Taken
        } else {
            Direction::Given
        }
    });
    let on_context = set_field(|f, v| {
        f.context_type = if v == "special" {
            ContextKind::Special
        } else {
            ContextKind::General
        }
    });

    let on_backdrop = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div class="fixed inset-0 bg-black/40 flex items-center justify-center z-50" onclick={on_backdrop}>
            <div
                class="bg-white dark:bg-gray-800 rounded-xl p-6 w-full max-w-md shadow-xl"
                onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}
            >
                <h3 class="text-xl font-bold text-slate-800 dark:text-white mb-4">{"Add Note"}</h3>

                <form class="space-y-3" onsubmit={on_submit}>
                    <textarea
                        rows="3"
                        placeholder="Note..."
                        value={form.text.clone()}
                        oninput={{
                            let on_text = on_text.clone();
                            Callback::from(move |e: InputEvent| {
                                let area: HtmlTextAreaElement = e.target_unchecked_into();
                                on_text.emit(area.value());
                            })
                        }}
                        class="w-full border border-slate-300 dark:border-gray-600 bg-white dark:bg-gray-700 text-slate-900 dark:text-white rounded p-2 resize-none"
                    />

                    <input
                        type="number"
                        step="0.01"
                        placeholder="Amount (optional)"
                        value={form.amount.clone()}
                        oninput={{
                            let on_amount = on_amount.clone();
                            Callback::from(move |e: InputEvent| {
                                let input: HtmlInputElement = e.target_unchecked_into();
                                on_amount.emit(input.value());
                            })
                        }}
                        class="w-full border border-slate-300 dark:border-gray-600 bg-white dark:bg-gray-700 text-slate-900 dark:text-white rounded p-2"
                    />

                    <select
                        onchange={{
                            let on_direction = on_direction.clone();
                            Callback::from(move |e: Event| {
                                let select: HtmlSelectElement = e.target_unchecked_into();
                                on_direction.emit(select.value());
                            })
                        }}
                        class="w-full border border-slate-300 dark:border-gray-600 bg-white dark:bg-gray-700 text-slate-900 dark:text-white rounded p-2"
                    >
                        <option value="given" selected={form.direction == Direction::Given}>{"Given"}</option>
                        <option value="taken" selected={form.direction == Direction::Taken}>{"Taken"}</option>
                    </select>

                    <input
                        placeholder="Person (optional)"
                        value={form.person.clone()}
                        oninput={{
                            let on_person = on_person.clone();
                            Callback::from(move |e: InputEvent| {
                                let input: HtmlInputElement = e.target_unchecked_into();
                                on_person.emit(input.value());
                            })
                        }}
                        class="w-full border border-slate-300 dark:border-gray-600 bg-white dark:bg-gray-700 text-slate-900 dark:text-white rounded p-2"
                    />

                    <select
                        onchange={{
                            let on_context = on_context.clone();
                            Callback::from(move |e: Event| {
                                let select: HtmlSelectElement = e.target_unchecked_into();
                                on_context.emit(select.value());
                            })
                        }}
                        class="w-full border border-slate-300 dark:border-gray-600 bg-white dark:bg-gray-700 text-slate-900 dark:text-white rounded p-2"
                    >
                        <option value="general" selected={form.context_type == ContextKind::General}>{"General"}</option>
                        <option value="special" selected={form.context_type == ContextKind::Special}>{"Special"}</option>
                    </select>

                    {
                        if form.context_type == ContextKind::Special {
                            html! {
                                <input
                                    placeholder="Special title (Trip / Event)"
                                    value={form.special_title.clone()}
                                    oninput={{
                                        let on_special_title = on_special_title.clone();
                                        Callback::from(move |e: InputEvent| {
                                            let input: HtmlInputElement = e.target_unchecked_into();
                                            on_special_title.emit(input.value());
                                        })
                                    }}
                                    class="w-full border border-slate-300 dark:border-gray-600 bg-white dark:bg-gray-700 text-slate-900 dark:text-white rounded p-2"
                                />
                            }
                        } else {
                            html! {}
                        }
                    }

                    <div class="flex justify-end gap-2 pt-3">
                        <button
                            type="button"
                            onclick={on_cancel}
                            class="px-4 py-2 bg-gray-200 dark:bg-gray-600 text-slate-800 dark:text-white rounded"
                        >
                            {"Cancel"}
                        </button>
                        <button
                            type="submit"
                            disabled={*saving}
                            class="px-4 py-2 bg-blue-600 text-white rounded hover:bg-blue-700 disabled:opacity-50"
                        >
                            { if *saving { "Saving..." } else { "Save" } }
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn general_form() -> NoteForm {
        NoteForm {
            text: "lent cash to a friend".to_string(),
            ..NoteForm::default()
        }
    }

    #[test]
    fn note_text_is_required() {
        let mut form = general_form();
        form.text = "   ".to_string();
        assert_eq!(form.build().unwrap_err(), "Note text is required");
    }

    #[test]
    fn special_note_requires_title_before_any_network_call() {
        let mut form = general_form();
        form.context_type = ContextKind::Special;
        form.special_title = "  ".to_string();
        assert_eq!(form.build().unwrap_err(), "Special title is required");

        form.special_title = "Goa Trip".to_string();
        let payload = form.build().unwrap();
        assert_eq!(payload.special_title.as_deref(), Some("Goa Trip"));
    }

    #[test]
    fn blank_amount_is_omitted_not_zero() {
        let payload = general_form().build().unwrap();
        assert_eq!(payload.amount, None);

        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("amount").is_none());
    }

    #[test]
    fn amount_is_coerced_to_number() {
        let mut form = general_form();
        form.amount = " 120.50 ".to_string();
        assert_eq!(form.build().unwrap().amount, Some(120.5));

        form.amount = "12x".to_string();
        assert_eq!(form.build().unwrap_err(), "Amount must be a number");
    }

    #[test]
    fn general_note_never_carries_a_special_title() {
        let mut form = general_form();
        form.special_title = "left over from a previous selection".to_string();
        let payload = form.build().unwrap();
        assert_eq!(payload.context_type, ContextKind::General);
        assert_eq!(payload.special_title, None);
    }

    #[test]
    fn blank_person_is_omitted() {
        let mut form = general_form();
        form.person = "  ".to_string();
        assert_eq!(form.build().unwrap().person, None);

        form.person = "Ravi".to_string();
        assert_eq!(form.build().unwrap().person.as_deref(), Some("Ravi"));
    }
}
