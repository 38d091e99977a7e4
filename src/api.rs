use std::cell::Cell;
use std::rc::Rc;

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use web_sys::RequestCredentials;

use crate::models::{
    ExpenseScope, NewNote, NewTransaction, Note, Period, Transaction, User,
};

const API_BASE_URL: &str = "http://localhost:5000";

/// Everything a caller needs to know about a failed request. Raw status codes
/// never leave this module.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Session expired. Please login again.")]
    Unauthorized,
    #[error("{0}")]
    Rejected(String),
    #[error("The server ran into a problem. Please try again.")]
    Server,
    #[error("Could not reach the server. Check your connection.")]
    Network,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Deserialize)]
struct ListEnvelope<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

#[derive(Deserialize)]
struct AuthEnvelope {
    #[serde(default)]
    success: bool,
    user: Option<User>,
    message: Option<String>,
}

#[derive(Deserialize)]
struct MeEnvelope {
    user: Option<User>,
}

fn classify_status(status: u16, message: Option<String>) -> ApiError {
    match status {
        401 => ApiError::Unauthorized,
        400..=499 => {
            ApiError::Rejected(message.unwrap_or_else(|| "Request was rejected.".to_string()))
        }
        _ => ApiError::Server,
    }
}

async fn check(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message);
    log::warn!("request failed with status {status}");
    Err(classify_status(status, message))
}

async fn get_json<T: DeserializeOwned>(
    path: &str,
    query: &[(&'static str, String)],
) -> Result<T, ApiError> {
    let url = format!("{}{}", API_BASE_URL, path);
    let request = Request::get(&url)
        .query(query.iter().map(|(k, v)| (*k, v.as_str())))
        .credentials(RequestCredentials::Include);
    let response = request.send().await.map_err(|_| ApiError::Network)?;
    check(response)
        .await?
        .json::<T>()
        .await
        .map_err(|_| ApiError::Network)
}

async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let url = format!("{}{}", API_BASE_URL, path);
    let request = Request::post(&url)
        .credentials(RequestCredentials::Include)
        .json(body)
        .map_err(|_| ApiError::Network)?;
    let response = request.send().await.map_err(|_| ApiError::Network)?;
    check(response)
        .await?
        .json::<T>()
        .await
        .map_err(|_| ApiError::Network)
}

// For endpoints whose success body carries nothing the client needs.
async fn post_discard<B: Serialize>(path: &str, body: &B) -> Result<(), ApiError> {
    let url = format!("{}{}", API_BASE_URL, path);
    let request = Request::post(&url)
        .credentials(RequestCredentials::Include)
        .json(body)
        .map_err(|_| ApiError::Network)?;
    let response = request.send().await.map_err(|_| ApiError::Network)?;
    check(response).await.map(|_| ())
}

async fn post_empty(path: &str) -> Result<(), ApiError> {
    let url = format!("{}{}", API_BASE_URL, path);
    let response = Request::post(&url)
        .credentials(RequestCredentials::Include)
        .send()
        .await
        .map_err(|_| ApiError::Network)?;
    check(response).await.map(|_| ())
}

async fn delete(path: &str) -> Result<(), ApiError> {
    let url = format!("{}{}", API_BASE_URL, path);
    let response = Request::delete(&url)
        .credentials(RequestCredentials::Include)
        .send()
        .await
        .map_err(|_| ApiError::Network)?;
    check(response).await.map(|_| ())
}

pub async fn login(email: &str, password: &str) -> Result<User, ApiError> {
    let body = serde_json::json!({ "email": email, "password": password });
    let envelope: AuthEnvelope = post_json("/api/user/login", &body).await?;
    match envelope.user {
        Some(user) if envelope.success => Ok(user),
        _ => Err(ApiError::Rejected(
            envelope.message.unwrap_or_else(|| "Login failed".to_string()),
        )),
    }
}

pub async fn signup(name: &str, email: &str, password: &str) -> Result<(), ApiError> {
    let body = serde_json::json!({ "name": name, "email": email, "password": password });
    post_discard("/api/user/signup", &body).await
}

pub async fn logout() -> Result<(), ApiError> {
    post_empty("/api/user/logout").await
}

/// Verify the session cookie and fetch the current user. A 200 without a user
/// object is treated the same as a 401.
pub async fn me() -> Result<User, ApiError> {
    let envelope: MeEnvelope = get_json("/api/user/me", &[]).await?;
    envelope.user.ok_or(ApiError::Unauthorized)
}

/// Query pairs for the filter endpoint. Empty means "no filtering at all", in
/// which case the plain view endpoint is the right call.
pub fn filter_query(scope: &ExpenseScope, period: Period) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let Some(period) = period.as_param() {
        query.push(("period", period.to_string()));
    }
    let tag = scope.tag();
    if let Some(kind) = tag.context_type {
        query.push(("contextType", kind.as_str().to_string()));
    }
    if let Some(year) = tag.year {
        query.push(("year", year.to_string()));
    }
    if let Some(month) = tag.month {
        query.push(("month", month));
    }
    if let Some(week) = tag.week {
        query.push(("week", week));
    }
    if let Some(id) = tag.special_context_id {
        query.push(("specialContextId", id));
    }
    query
}

pub async fn list_expenses(
    scope: &ExpenseScope,
    period: Period,
) -> Result<Vec<Transaction>, ApiError> {
    let query = filter_query(scope, period);
    let envelope: ListEnvelope<Transaction> = if query.is_empty() {
        get_json("/api/expense/view", &[]).await?
    } else {
        get_json("/api/expense/filter", &query).await?
    };
    Ok(envelope.data)
}

pub async fn insert_expense(expense: &NewTransaction) -> Result<(), ApiError> {
    post_discard("/api/expense/insert", expense).await
}

pub async fn delete_expense(id: &str) -> Result<(), ApiError> {
    delete(&format!("/api/expense/delete/{}", id)).await
}

pub async fn list_notes(filter: Option<&str>) -> Result<Vec<Note>, ApiError> {
    let query: Vec<(&'static str, String)> = match filter {
        Some(kind) => vec![("contextType", kind.to_string())],
        None => Vec::new(),
    };
    let envelope: ListEnvelope<Note> = get_json("/api/expense/notes", &query).await?;
    Ok(envelope.data)
}

pub async fn create_note(note: &NewNote) -> Result<(), ApiError> {
    post_discard("/api/expense/notes", note).await
}

pub async fn delete_note(id: &str) -> Result<(), ApiError> {
    delete(&format!("/api/expense/notes/{}", id)).await
}

/// Hands out tickets for list fetches so that a stale response can never
/// overwrite fresher data: only the most recently issued ticket is current.
#[derive(Clone, Debug, Default)]
pub struct FetchSeq(Rc<Cell<u64>>);

impl FetchSeq {
    pub fn begin(&self) -> FetchTicket {
        let next = self.0.get() + 1;
        self.0.set(next);
        FetchTicket {
            seq: next,
            counter: self.0.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct FetchTicket {
    seq: u64,
    counter: Rc<Cell<u64>>,
}

impl FetchTicket {
    pub fn is_current(&self) -> bool {
        self.counter.get() == self.seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContextKind;

    #[test]
    fn status_mapping_matches_error_taxonomy() {
        assert_eq!(classify_status(401, None), ApiError::Unauthorized);
        assert_eq!(
            classify_status(422, Some("Amount required".to_string())),
            ApiError::Rejected("Amount required".to_string())
        );
        assert_eq!(
            classify_status(400, None),
            ApiError::Rejected("Request was rejected.".to_string())
        );
        assert_eq!(classify_status(500, None), ApiError::Server);
        assert_eq!(classify_status(503, Some("oops".to_string())), ApiError::Server);
    }

    #[test]
    fn rejected_error_surfaces_server_message() {
        let err = classify_status(409, Some("Email already registered".to_string()));
        assert_eq!(err.to_string(), "Email already registered");
    }

    #[test]
    fn all_scope_without_period_builds_no_query() {
        assert!(filter_query(&ExpenseScope::All, Period::All).is_empty());
    }

    #[test]
    fn period_filter_builds_single_pair() {
        let query = filter_query(&ExpenseScope::All, Period::Week);
        assert_eq!(query, vec![("period", "week".to_string())]);
    }

    #[test]
    fn general_scope_includes_context_fields() {
        let scope = ExpenseScope::General {
            year: 2024,
            month: Some("March".to_string()),
            week: Some("Week 2".to_string()),
        };
        let query = filter_query(&scope, Period::All);
        assert!(query.contains(&("contextType", ContextKind::General.as_str().to_string())));
        assert!(query.contains(&("year", "2024".to_string())));
        assert!(query.contains(&("month", "March".to_string())));
        assert!(query.contains(&("week", "Week 2".to_string())));
    }

    #[test]
    fn special_scope_includes_context_id() {
        let scope = ExpenseScope::Special {
            context_id: "goa-trip".to_string(),
        };
        let query = filter_query(&scope, Period::Month);
        assert!(query.contains(&("period", "month".to_string())));
        assert!(query.contains(&("specialContextId", "goa-trip".to_string())));
    }

    #[test]
    fn newer_ticket_invalidates_older_one() {
        let seq = FetchSeq::default();
        let first = seq.begin();
        assert!(first.is_current());
        let second = seq.begin();
        assert!(!first.is_current());
        assert!(second.is_current());
    }

    #[test]
    fn ticket_stays_current_until_superseded() {
        let seq = FetchSeq::default();
        let only = seq.begin();
        assert!(only.is_current());
        assert!(only.is_current());
    }

    #[test]
    fn list_envelope_defaults_missing_data() {
        let envelope: ListEnvelope<Transaction> = serde_json::from_str("{}").unwrap();
        assert!(envelope.data.is_empty());
    }

    #[test]
    fn auth_envelope_parses_login_response() {
        let raw = r#"{"success": true, "user": {"_id": "u1", "name": "Asha", "email": "a@b.c"}, "message": "Login successful"}"#;
        let envelope: AuthEnvelope = serde_json::from_str(raw).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.user.unwrap().name, "Asha");
        assert_eq!(envelope.message.as_deref(), Some("Login successful"));
    }
}
