use serde::{Deserialize, Serialize};
use sqlx::query::{Query, QueryAs};
use sqlx::sqlite::SqliteArguments;
use sqlx::Sqlite;

use crate::store::Record;

/// A customer who can enroll in shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub age: i64,
}

/// A show. `head_count` is the number of seats still open, not the capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Show {
    pub id: i64,
    pub title: String,
    pub age_limit: i64,
    pub head_count: i64,
    pub avanue_id: Option<i64>,
}

/// A venue hosting shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Avanue {
    pub id: i64,
    pub name: String,
    pub availability: bool,
}

/// Validated insert payloads.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub age: i64,
}

#[derive(Debug, Clone)]
pub struct NewShow {
    pub title: String,
    pub age_limit: i64,
    pub head_count: i64,
}

#[derive(Debug, Clone)]
pub struct NewAvanue {
    pub name: String,
    pub availability: bool,
}

impl Record for Customer {
    type Draft = NewCustomer;

    const TABLE: &'static str = "customers";
    const COLUMNS: &'static str = "id, name, age";
    const INSERT: &'static str =
        "INSERT INTO customers (name, age) VALUES (?, ?) RETURNING id, name, age";
    const UPDATE: &'static str = "UPDATE customers SET name = ?, age = ? WHERE id = ?";

    fn bind_draft<'q>(
        query: QueryAs<'q, Sqlite, Self, SqliteArguments<'q>>,
        draft: &'q NewCustomer,
    ) -> QueryAs<'q, Sqlite, Self, SqliteArguments<'q>> {
        query.bind(draft.name.as_str()).bind(draft.age)
    }

    fn bind_update<'q>(
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
        record: &'q Self,
    ) -> Query<'q, Sqlite, SqliteArguments<'q>> {
        query
            .bind(record.name.as_str())
            .bind(record.age)
            .bind(record.id)
    }
}

impl Record for Show {
    type Draft = NewShow;

    const TABLE: &'static str = "shows";
    const COLUMNS: &'static str = "id, title, age_limit, head_count, avanue_id";
    const INSERT: &'static str = r#"
        INSERT INTO shows (title, age_limit, head_count)
        VALUES (?, ?, ?)
        RETURNING id, title, age_limit, head_count, avanue_id
        "#;
    const UPDATE: &'static str = r#"
        UPDATE shows
        SET title = ?, age_limit = ?, head_count = ?, avanue_id = ?
        WHERE id = ?
        "#;

    fn bind_draft<'q>(
        query: QueryAs<'q, Sqlite, Self, SqliteArguments<'q>>,
        draft: &'q NewShow,
    ) -> QueryAs<'q, Sqlite, Self, SqliteArguments<'q>> {
        query
            .bind(draft.title.as_str())
            .bind(draft.age_limit)
            .bind(draft.head_count)
    }

    fn bind_update<'q>(
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
        record: &'q Self,
    ) -> Query<'q, Sqlite, SqliteArguments<'q>> {
        query
            .bind(record.title.as_str())
            .bind(record.age_limit)
            .bind(record.head_count)
            .bind(record.avanue_id)
            .bind(record.id)
    }
}

impl Record for Avanue {
    type Draft = NewAvanue;

    const TABLE: &'static str = "avanues";
    const COLUMNS: &'static str = "id, name, availability";
    const INSERT: &'static str =
        "INSERT INTO avanues (name, availability) VALUES (?, ?) RETURNING id, name, availability";
    const UPDATE: &'static str = "UPDATE avanues SET name = ?, availability = ? WHERE id = ?";

    fn bind_draft<'q>(
        query: QueryAs<'q, Sqlite, Self, SqliteArguments<'q>>,
        draft: &'q NewAvanue,
    ) -> QueryAs<'q, Sqlite, Self, SqliteArguments<'q>> {
        query.bind(draft.name.as_str()).bind(draft.availability)
    }

    fn bind_update<'q>(
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
        record: &'q Self,
    ) -> Query<'q, Sqlite, SqliteArguments<'q>> {
        query
            .bind(record.name.as_str())
            .bind(record.availability)
            .bind(record.id)
    }
}

// ---- Requests ----
//
// Every field is optional so that an absent value can be told apart from a
// present zero. Lifecycle operations decide which fields are required.

/// Request to create a customer.
#[derive(Debug, Default, Deserialize)]
pub struct CustomerAdd {
    pub name: Option<String>,
    pub age: Option<i64>,
}

/// Partial update of a customer. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub age: Option<i64>,
}

/// Request to create a show.
#[derive(Debug, Default, Deserialize)]
pub struct ShowAdd {
    pub title: Option<String>,
    pub age_limit: Option<i64>,
    pub head_count: Option<i64>,
}

/// Partial update of a show. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct ShowUpdate {
    pub title: Option<String>,
    pub age_limit: Option<i64>,
    pub head_count: Option<i64>,
}

/// Request to create a venue. `availability` defaults to true when omitted.
#[derive(Debug, Deserialize)]
pub struct AvanueAdd {
    pub name: Option<String>,
    #[serde(default = "default_availability")]
    pub availability: Option<bool>,
}

fn default_availability() -> Option<bool> {
    Some(true)
}

/// Partial update of a venue. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct AvanueUpdate {
    pub name: Option<String>,
    pub availability: Option<bool>,
}

// ---- Responses ----

/// Confirmation returned by deletes and relationship operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A customer with the shows they are enrolled in.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerDetail {
    #[serde(flatten)]
    pub customer: Customer,
    pub show_list: Vec<Show>,
}

/// A show with its roster and its venue, if any.
#[derive(Debug, Clone, Serialize)]
pub struct ShowDetail {
    #[serde(flatten)]
    pub show: Show,
    pub customer_list: Vec<Customer>,
    pub avanue: Option<Avanue>,
}

/// A venue with the shows it hosts.
#[derive(Debug, Clone, Serialize)]
pub struct AvanueDetail {
    #[serde(flatten)]
    pub avanue: Avanue,
    pub show_list: Vec<Show>,
}
