use std::rc::Rc;

use serde::{Deserialize, Serialize};
use yew::prelude::*;

use crate::models::User;

const STORAGE_KEY: &str = "expensive.session.v1";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Default for Theme {
    fn default() -> Self {
        Self::Light
    }
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}

/// The only cross-component mutable state: who is logged in (advisory cache,
/// the session cookie stays authoritative) and the UI theme.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: Option<User>,
    #[serde(default)]
    pub theme: Theme,
}

pub enum SessionAction {
    SetUser(User),
    Logout,
    ToggleTheme,
}

impl Reducible for Session {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: SessionAction) -> Rc<Self> {
        let next = match action {
            SessionAction::SetUser(user) => Session {
                user: Some(user),
                theme: self.theme,
            },
            SessionAction::Logout => Session {
                user: None,
                theme: self.theme,
            },
            SessionAction::ToggleTheme => Session {
                user: self.user.clone(),
                theme: self.theme.toggled(),
            },
        };
        Rc::new(next)
    }
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn restore() -> Session {
        if let Some(window) = web_sys::window() {
            if let Ok(Some(storage)) = window.local_storage() {
                if let Ok(Some(raw)) = storage.get_item(STORAGE_KEY) {
                    if let Ok(session) = serde_json::from_str::<Session>(&raw) {
                        return session;
                    }
                    log::warn!("discarding unreadable session snapshot");
                }
            }
        }
        Session::default()
    }

    pub fn persist(&self) {
        if let Some(window) = web_sys::window() {
            if let Ok(Some(storage)) = window.local_storage() {
                if let Ok(raw) = serde_json::to_string(self) {
                    let _ = storage.set_item(STORAGE_KEY, &raw);
                }
            }
        }
    }
}

fn apply_theme(theme: Theme) {
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        if let Some(root) = document.document_element() {
            let _ = root.class_list().toggle_with_force("dark", theme.is_dark());
        }
    }
}

pub type SessionHandle = UseReducerHandle<Session>;

#[hook]
pub fn use_session() -> SessionHandle {
    use_context::<SessionHandle>().expect("SessionProvider is mounted above every screen")
}

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    pub children: Children,
}

#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let session = use_reducer(Session::restore);

    // Mutations are serialized on the event loop; persisting from an effect
    // keeps the snapshot in step with every dispatch.
    use_effect_with_deps(
        |session: &Session| {
            session.persist();
            apply_theme(session.theme);
            || ()
        },
        (*session).clone(),
    );

    html! {
        <ContextProvider<SessionHandle> context={session}>
            { for props.children.iter() }
        </ContextProvider<SessionHandle>>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "u1".to_string(),
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
        }
    }

    fn reduce(session: Session, action: SessionAction) -> Session {
        (*Rc::new(session).reduce(action)).clone()
    }

    #[test]
    fn default_session_is_anonymous_light() {
        let session = Session::default();
        assert!(!session.is_authenticated());
        assert_eq!(session.theme, Theme::Light);
    }

    #[test]
    fn set_user_transitions_to_authenticated() {
        let session = reduce(Session::default(), SessionAction::SetUser(user()));
        assert!(session.is_authenticated());
        assert_eq!(session.user.unwrap().name, "Asha");
    }

    #[test]
    fn set_user_replaces_prior_cached_user() {
        let first = reduce(Session::default(), SessionAction::SetUser(user()));
        let replacement = User {
            id: "u2".to_string(),
            name: "Ravi".to_string(),
            email: "ravi@example.com".to_string(),
        };
        let second = reduce(first, SessionAction::SetUser(replacement));
        assert_eq!(second.user.unwrap().id, "u2");
    }

    #[test]
    fn logout_is_unconditional() {
        let authenticated = reduce(Session::default(), SessionAction::SetUser(user()));
        let out = reduce(authenticated, SessionAction::Logout);
        assert!(!out.is_authenticated());

        // logging out twice stays anonymous
        let again = reduce(out, SessionAction::Logout);
        assert!(!again.is_authenticated());
    }

    #[test]
    fn toggle_theme_flips_without_touching_auth() {
        let authenticated = reduce(Session::default(), SessionAction::SetUser(user()));
        let dark = reduce(authenticated, SessionAction::ToggleTheme);
        assert_eq!(dark.theme, Theme::Dark);
        assert!(dark.is_authenticated());

        let light = reduce(dark, SessionAction::ToggleTheme);
        assert_eq!(light.theme, Theme::Light);
        assert!(light.is_authenticated());
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let session = Session {
            user: Some(user()),
            theme: Theme::Dark,
        };
        let raw = serde_json::to_string(&session).unwrap();
        let back: Session = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, session);
    }

    #[test]
    fn corrupt_snapshot_falls_back_to_default() {
        let parsed = serde_json::from_str::<Session>("{not json");
        assert!(parsed.is_err());
        // restore() maps this to Session::default(); covered directly here
        // because localStorage is unavailable under native tests.
        assert_eq!(
            serde_json::from_str::<Session>("{}").unwrap(),
            Session::default()
        );
    }
}
