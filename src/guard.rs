use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::{self, ApiError};
use crate::notify::{self, use_notifier, Level, Notifier};
use crate::session::{use_session, SessionAction, SessionHandle};
use crate::Route;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GuardState {
    Checking,
    Authorized,
    Unauthorized,
}

// Any verification failure, 401 included, denies access; there is no third
// outcome once the round-trip has finished.
fn decide(verified: &Result<crate::models::User, ApiError>) -> GuardState {
    match verified {
        Ok(_) => GuardState::Authorized,
        Err(_) => GuardState::Unauthorized,
    }
}

#[derive(Properties, PartialEq)]
pub struct RequireAuthProps {
    pub children: Children,
}

/// Wraps a protected screen. The session is verified against the backend
/// before the screen renders; the cached user is only ever advisory display
/// data.
#[function_component(RequireAuth)]
pub fn require_auth(props: &RequireAuthProps) -> Html {
    let state = use_state(|| GuardState::Checking);
    let session = use_session();
    let notifier = use_notifier();
    let route = use_route::<Route>();

    // Re-verify on every navigation, not just the first mount. While a
    // re-check is in flight the previously authorized view stays up.
    {
        let state = state.clone();
        let session = session.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    let verified = api::me().await;
                    match &verified {
                        Ok(user) => {
                            session.dispatch(SessionAction::SetUser(user.clone()));
                        }
                        Err(err) => {
                            log::warn!("session verification failed: {err}");
                            if session.is_authenticated() {
                                notify::notify(
                                    &notifier,
                                    Level::Warning,
                                    ApiError::Unauthorized.to_string(),
                                );
                                session.dispatch(SessionAction::Logout);
                            }
                        }
                    }
                    state.set(decide(&verified));
                });
                || ()
            },
            route,
        );
    }

    match *state {
        GuardState::Checking => html! {
            <div class="min-h-screen flex items-center justify-center text-slate-500 dark:text-gray-400">
                {"Checking session..."}
            </div>
        },
        GuardState::Authorized => html! { { for props.children.iter() } },
        GuardState::Unauthorized => html! { <Redirect<Route> to={Route::Login} /> },
    }
}

/// The one failure policy every data-fetching call site shares: 401 forces a
/// logout and a redirect to the login screen, anything else surfaces a single
/// notice and leaves existing state alone.
pub fn handle_api_error(
    err: &ApiError,
    session: &SessionHandle,
    navigator: &Navigator,
    notifier: &Notifier,
) {
    match err {
        ApiError::Unauthorized => {
            log::warn!("backend rejected the session cookie, forcing logout");
            notify::notify(notifier, Level::Warning, err.to_string());
            session.dispatch(SessionAction::Logout);
            navigator.push(&Route::Login);
        }
        other => {
            log::error!("request failed: {other}");
            notify::notify(notifier, Level::Error, other.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn user() -> User {
        User {
            id: "u1".to_string(),
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
        }
    }

    #[test]
    fn verified_user_is_authorized() {
        assert_eq!(decide(&Ok(user())), GuardState::Authorized);
    }

    #[test]
    fn expired_session_is_unauthorized() {
        assert_eq!(decide(&Err(ApiError::Unauthorized)), GuardState::Unauthorized);
    }

    #[test]
    fn any_other_failure_is_also_unauthorized() {
        assert_eq!(decide(&Err(ApiError::Network)), GuardState::Unauthorized);
        assert_eq!(decide(&Err(ApiError::Server)), GuardState::Unauthorized);
        assert_eq!(
            decide(&Err(ApiError::Rejected("bad request".to_string()))),
            GuardState::Unauthorized
        );
    }
}
