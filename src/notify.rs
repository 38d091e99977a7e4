use std::rc::Rc;

use gloo_timers::callback::Timeout;
use yew::prelude::*;

const DISMISS_AFTER_MS: u32 = 4_000;
// Old notices fall off rather than stacking without bound.
const MAX_VISIBLE: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    fn class(self) -> &'static str {
        match self {
            Self::Info => "bg-blue-600",
            Self::Success => "bg-green-600",
            Self::Warning => "bg-amber-500",
            Self::Error => "bg-red-600",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub level: Level,
    pub text: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NoticeBoard {
    notices: Vec<Notice>,
    next_id: u64,
}

impl NoticeBoard {
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }
}

pub enum NoticeAction {
    Push(Level, String),
    Dismiss(u64),
}

impl Reducible for NoticeBoard {
    type Action = NoticeAction;

    fn reduce(self: Rc<Self>, action: NoticeAction) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            NoticeAction::Push(level, text) => {
                next.next_id += 1;
                next.notices.push(Notice {
                    id: next.next_id,
                    level,
                    text,
                });
                if next.notices.len() > MAX_VISIBLE {
                    let overflow = next.notices.len() - MAX_VISIBLE;
                    next.notices.drain(..overflow);
                }
            }
            NoticeAction::Dismiss(id) => next.notices.retain(|n| n.id != id),
        }
        Rc::new(next)
    }
}

pub type Notifier = UseReducerHandle<NoticeBoard>;

#[hook]
pub fn use_notifier() -> Notifier {
    use_context::<Notifier>().expect("NoticeProvider is mounted above every screen")
}

pub fn notify(notifier: &Notifier, level: Level, text: impl Into<String>) {
    notifier.dispatch(NoticeAction::Push(level, text.into()));
}

#[derive(Properties, PartialEq)]
pub struct NoticeProviderProps {
    pub children: Children,
}

#[function_component(NoticeProvider)]
pub fn notice_provider(props: &NoticeProviderProps) -> Html {
    let board = use_reducer(NoticeBoard::default);
    html! {
        <ContextProvider<Notifier> context={board}>
            { for props.children.iter() }
        </ContextProvider<Notifier>>
    }
}

#[derive(Properties, PartialEq)]
struct NoticeViewProps {
    notice: Notice,
    on_dismiss: Callback<u64>,
}

#[function_component(NoticeView)]
fn notice_view(props: &NoticeViewProps) -> Html {
    let id = props.notice.id;

    {
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with_deps(
            move |_| {
                let timeout = Timeout::new(DISMISS_AFTER_MS, move || on_dismiss.emit(id));
                move || drop(timeout)
            },
            (),
        );
    }

    let onclick = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_| on_dismiss.emit(id))
    };

    html! {
        <div
            class={format!("{} text-white text-sm font-medium rounded-lg shadow-lg px-4 py-3 cursor-pointer", props.notice.level.class())}
            onclick={onclick}
        >
            { &props.notice.text }
        </div>
    }
}

#[function_component(NoticeHost)]
pub fn notice_host() -> Html {
    let board = use_notifier();

    let on_dismiss = {
        let board = board.clone();
        Callback::from(move |id: u64| board.dispatch(NoticeAction::Dismiss(id)))
    };

    html! {
        <div class="fixed top-20 right-4 z-50 flex flex-col gap-2 w-80 max-w-full">
            { for board.notices().iter().map(|notice| html! {
                <NoticeView key={notice.id} notice={notice.clone()} on_dismiss={on_dismiss.clone()} />
            }) }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reduce(board: NoticeBoard, action: NoticeAction) -> NoticeBoard {
        (*Rc::new(board).reduce(action)).clone()
    }

    #[test]
    fn push_assigns_increasing_ids() {
        let board = reduce(
            NoticeBoard::default(),
            NoticeAction::Push(Level::Info, "a".to_string()),
        );
        let board = reduce(board, NoticeAction::Push(Level::Error, "b".to_string()));
        let ids: Vec<u64> = board.notices().iter().map(|n| n.id).collect();
        assert_eq!(ids, [1, 2]);
    }

    #[test]
    fn dismiss_removes_only_the_target() {
        let board = reduce(
            NoticeBoard::default(),
            NoticeAction::Push(Level::Info, "a".to_string()),
        );
        let board = reduce(board, NoticeAction::Push(Level::Info, "b".to_string()));
        let board = reduce(board, NoticeAction::Dismiss(1));
        assert_eq!(board.notices().len(), 1);
        assert_eq!(board.notices()[0].text, "b");
    }

    #[test]
    fn overflow_drops_oldest_notices() {
        let mut board = NoticeBoard::default();
        for i in 0..6 {
            board = reduce(board, NoticeAction::Push(Level::Info, format!("n{i}")));
        }
        assert_eq!(board.notices().len(), MAX_VISIBLE);
        assert_eq!(board.notices()[0].text, "n2");
        assert_eq!(board.notices()[MAX_VISIBLE - 1].text, "n5");
    }
}
