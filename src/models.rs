use serde::{Deserialize, Serialize};

use crate::format;

/// Fixed category table, `(wire value, display label)`. Extend by adding rows.
pub const CATEGORIES: &[(&str, &str)] = &[
    ("food", "🍔 Food & Dining"),
    ("transport", "🚗 Transport"),
    ("shopping", "🛍️ Shopping"),
    ("entertainment", "🎬 Entertainment"),
    ("utilities", "💡 Utilities"),
    ("health", "🏥 Health"),
    ("other", "📌 Other"),
];

pub const DEFAULT_GROUP: &str = "Personal";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Spent,
    Received,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spent => "spent",
            Self::Received => "received",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Given,
    Taken,
}

impl Default for Direction {
    fn default() -> Self {
        Self::Given
    }
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Given => "given",
            Self::Taken => "taken",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextKind {
    General,
    Special,
}

impl Default for ContextKind {
    fn default() -> Self {
        Self::General
    }
}

impl ContextKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Special => "special",
        }
    }
}

/// Optional classification tag carried by transactions, flattened on the wire.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextTag {
    #[serde(rename = "contextType", skip_serializing_if = "Option::is_none")]
    pub context_type: Option<ContextKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week: Option<String>,
    #[serde(rename = "specialContextId", skip_serializing_if = "Option::is_none")]
    pub special_context_id: Option<String>,
}

/// Which slice of the transaction collection a screen is looking at.
#[derive(Clone, Debug, PartialEq)]
pub enum ExpenseScope {
    All,
    General {
        year: i32,
        month: Option<String>,
        week: Option<String>,
    },
    Special {
        context_id: String,
    },
}

impl ExpenseScope {
    pub fn tag(&self) -> ContextTag {
        match self {
            Self::All => ContextTag::default(),
            Self::General { year, month, week } => ContextTag {
                context_type: Some(ContextKind::General),
                year: Some(*year),
                month: month.clone(),
                week: week.clone(),
                special_context_id: None,
            },
            Self::Special { context_id } => ContextTag {
                context_type: Some(ContextKind::Special),
                special_context_id: Some(context_id.clone()),
                ..ContextTag::default()
            },
        }
    }

    pub fn title(&self) -> String {
        match self {
            Self::All => "All Transactions".to_string(),
            Self::General { year, month, week } => {
                let mut parts = vec![year.to_string()];
                if let Some(m) = month {
                    parts.push(m.clone());
                }
                if let Some(w) = week {
                    parts.push(w.clone());
                }
                parts.join(" · ")
            }
            Self::Special { context_id } => format!("🎯 {}", context_id),
        }
    }
}

/// Coarse server-side time window. `All` hits the unfiltered view endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Period {
    All,
    Day,
    Week,
    Month,
}

impl Period {
    pub const CHOICES: [Period; 4] = [Period::Day, Period::Week, Period::Month, Period::All];

    pub fn as_param(&self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Day => Some("day"),
            Self::Week => Some("week"),
            Self::Month => Some("month"),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Day => "📅 Today",
            Self::Week => "📆 Week",
            Self::Month => "🗓️ Month",
            Self::All => "🔄 All",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub amount: f64,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_group")]
    pub group: String,
    #[serde(flatten)]
    pub context: ContextTag,
}

fn default_group() -> String {
    DEFAULT_GROUP.to_string()
}

/// Insert payload; transactions are never edited in place.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewTransaction {
    pub amount: f64,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub date: String,
    pub description: String,
    pub group: String,
    #[serde(flatten)]
    pub context: ContextTag,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Note {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub text: String,
    pub amount: Option<f64>,
    #[serde(default)]
    pub direction: Direction,
    pub person: Option<String>,
    #[serde(rename = "contextType", default)]
    pub context_type: ContextKind,
    #[serde(rename = "specialTitle")]
    pub special_title: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
}

/// Create payload. A blank amount is omitted entirely, never sent as zero.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewNote {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    pub direction: Direction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person: Option<String>,
    #[serde(rename = "contextType")]
    pub context_type: ContextKind,
    #[serde(rename = "specialTitle", skip_serializing_if = "Option::is_none")]
    pub special_title: Option<String>,
}

/// Derived from the fetched list, never sent to the backend.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Summary {
    pub total_spent: f64,
    pub total_received: f64,
    pub balance: f64,
}

impl Summary {
    pub fn of(transactions: &[Transaction]) -> Self {
        let total_spent = transactions
            .iter()
            .filter(|t| t.kind == TxKind::Spent)
            .map(|t| t.amount)
            .sum::<f64>();
        let total_received = transactions
            .iter()
            .filter(|t| t.kind == TxKind::Received)
            .map(|t| t.amount)
            .sum::<f64>();
        Summary {
            total_spent,
            total_received,
            balance: total_received - total_spent,
        }
    }
}

/// Display order: newest calendar date first. The backend does not guarantee
/// any ordering, so this is applied after every fetch. Entries sharing a date
/// keep their fetched order (stable sort).
pub fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| {
        format::calendar_date(&b.date).cmp(format::calendar_date(&a.date))
    });
}

pub fn category_label(value: &str) -> &str {
    CATEGORIES
        .iter()
        .find(|(v, _)| *v == value)
        .map(|(_, label)| *label)
        .unwrap_or("📌 Other")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(id: &str, amount: f64, kind: TxKind, date: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            amount,
            category: "food".to_string(),
            kind,
            date: date.to_string(),
            description: String::new(),
            group: DEFAULT_GROUP.to_string(),
            context: ContextTag::default(),
        }
    }

    #[test]
    fn summary_of_empty_list_is_zero() {
        assert_eq!(Summary::of(&[]), Summary::default());
    }

    #[test]
    fn summary_balance_is_received_minus_spent() {
        let list = vec![
            tx("a", 250.0, TxKind::Spent, "2024-03-01"),
            tx("b", 1000.0, TxKind::Received, "2024-03-02"),
            tx("c", 100.0, TxKind::Spent, "2024-03-03"),
        ];
        let summary = Summary::of(&list);
        assert_eq!(summary.total_spent, 350.0);
        assert_eq!(summary.total_received, 1000.0);
        assert_eq!(summary.balance, summary.total_received - summary.total_spent);
        assert!(summary.total_spent >= 0.0 && summary.total_received >= 0.0);
    }

    #[test]
    fn adding_a_spent_transaction_raises_total_spent_by_its_amount() {
        let mut list = vec![tx("a", 40.0, TxKind::Spent, "2024-02-01")];
        let before = Summary::of(&list);
        list.push(tx("b", 250.0, TxKind::Spent, "2024-03-01"));
        let after = Summary::of(&list);
        assert_eq!(after.total_spent - before.total_spent, 250.0);
    }

    #[test]
    fn sort_puts_newest_date_first() {
        let mut list = vec![
            tx("old", 1.0, TxKind::Spent, "2024-01-05"),
            tx("new", 1.0, TxKind::Spent, "2024-03-01"),
            tx("mid", 1.0, TxKind::Spent, "2024-02-10"),
        ];
        sort_newest_first(&mut list);
        let ids: Vec<&str> = list.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["new", "mid", "old"]);
    }

    #[test]
    fn sort_is_stable_for_equal_dates() {
        let mut list = vec![
            tx("first", 1.0, TxKind::Spent, "2024-03-01"),
            tx("second", 2.0, TxKind::Spent, "2024-03-01"),
            tx("third", 3.0, TxKind::Spent, "2024-03-01T10:00:00Z"),
        ];
        sort_newest_first(&mut list);
        let ids: Vec<&str> = list.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["first", "second", "third"]);
    }

    #[test]
    fn sort_ignores_time_part_of_wire_dates() {
        let mut list = vec![
            tx("a", 1.0, TxKind::Spent, "2024-03-01T23:59:59Z"),
            tx("b", 1.0, TxKind::Spent, "2024-03-02"),
        ];
        sort_newest_first(&mut list);
        assert_eq!(list[0].id, "b");
    }

    #[test]
    fn scope_tag_carries_general_fields() {
        let scope = ExpenseScope::General {
            year: 2024,
            month: Some("March".to_string()),
            week: None,
        };
        let tag = scope.tag();
        assert_eq!(tag.context_type, Some(ContextKind::General));
        assert_eq!(tag.year, Some(2024));
        assert_eq!(tag.month.as_deref(), Some("March"));
        assert_eq!(tag.week, None);
        assert_eq!(tag.special_context_id, None);
    }

    #[test]
    fn scope_tag_carries_special_context_id() {
        let scope = ExpenseScope::Special {
            context_id: "goa-trip".to_string(),
        };
        let tag = scope.tag();
        assert_eq!(tag.context_type, Some(ContextKind::Special));
        assert_eq!(tag.special_context_id.as_deref(), Some("goa-trip"));
        assert_eq!(tag.year, None);
    }

    #[test]
    fn transaction_parses_backend_shape() {
        let raw = r#"{
            "_id": "65f1",
            "amount": 250,
            "category": "food",
            "type": "spent",
            "date": "2024-03-01T00:00:00.000Z"
        }"#;
        let tx: Transaction = serde_json::from_str(raw).unwrap();
        assert_eq!(tx.id, "65f1");
        assert_eq!(tx.amount, 250.0);
        assert_eq!(tx.kind, TxKind::Spent);
        assert_eq!(tx.group, DEFAULT_GROUP);
        assert_eq!(tx.description, "");
        assert_eq!(tx.context, ContextTag::default());
    }

    #[test]
    fn new_note_omits_blank_optionals() {
        let note = NewNote {
            text: "lent cash".to_string(),
            amount: None,
            direction: Direction::Given,
            person: None,
            context_type: ContextKind::General,
            special_title: None,
        };
        let json = serde_json::to_value(&note).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("amount"));
        assert!(!obj.contains_key("person"));
        assert!(!obj.contains_key("specialTitle"));
        assert_eq!(obj["direction"], "given");
        assert_eq!(obj["contextType"], "general");
    }

    #[test]
    fn new_transaction_flattens_context() {
        let tx = NewTransaction {
            amount: 99.5,
            category: "transport".to_string(),
            kind: TxKind::Spent,
            date: "2024-03-01".to_string(),
            description: String::new(),
            group: DEFAULT_GROUP.to_string(),
            context: ExpenseScope::Special {
                context_id: "expo".to_string(),
            }
            .tag(),
        };
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["type"], "spent");
        assert_eq!(json["contextType"], "special");
        assert_eq!(json["specialContextId"], "expo");
        assert!(json.get("year").is_none());
    }
}
