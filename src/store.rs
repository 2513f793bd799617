//! Generic entity access over one SQLite connection.
//!
//! A [`Store`] never validates and never commits. Callers hand it the
//! connection of an open transaction and decide themselves whether the
//! unit of work is committed or rolled back.

use std::marker::PhantomData;

use sqlx::query::{Query, QueryAs};
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{FromRow, Sqlite, SqliteConnection};

use crate::models::{Customer, Show};

/// A row type persisted in its own table, keyed by an integer `id`.
pub trait Record: for<'r> FromRow<'r, SqliteRow> + Send + Unpin {
    /// Insert payload: every column except the id.
    type Draft: Sync;

    const TABLE: &'static str;
    /// Column list matching the `FromRow` layout.
    const COLUMNS: &'static str;
    /// `INSERT ... RETURNING <COLUMNS>` statement, bound by [`Record::bind_draft`].
    const INSERT: &'static str;
    /// `UPDATE ... WHERE id = ?` statement, bound by [`Record::bind_update`].
    const UPDATE: &'static str;

    fn bind_draft<'q>(
        query: QueryAs<'q, Sqlite, Self, SqliteArguments<'q>>,
        draft: &'q Self::Draft,
    ) -> QueryAs<'q, Sqlite, Self, SqliteArguments<'q>>;

    fn bind_update<'q>(
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
        record: &'q Self,
    ) -> Query<'q, Sqlite, SqliteArguments<'q>>;
}

/// Point lookup, listing, insert, update and delete for one entity kind.
pub struct Store<'c, E> {
    conn: &'c mut SqliteConnection,
    kind: PhantomData<fn() -> E>,
}

impl<'c, E: Record> Store<'c, E> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self {
            conn,
            kind: PhantomData,
        }
    }

    /// All rows, ordered by id.
    pub async fn get_all(&mut self) -> Result<Vec<E>, sqlx::Error> {
        let sql = format!("SELECT {} FROM {} ORDER BY id ASC", E::COLUMNS, E::TABLE);
        sqlx::query_as::<_, E>(&sql)
            .fetch_all(&mut *self.conn)
            .await
    }

    /// The row with the given id, or `None` if there is none.
    pub async fn get(&mut self, id: i64) -> Result<Option<E>, sqlx::Error> {
        let sql = format!("SELECT {} FROM {} WHERE id = ?", E::COLUMNS, E::TABLE);
        sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await
    }

    /// Insert a new row and return it with its assigned id.
    pub async fn add(&mut self, draft: &E::Draft) -> Result<E, sqlx::Error> {
        E::bind_draft(sqlx::query_as::<_, E>(E::INSERT), draft)
            .fetch_one(&mut *self.conn)
            .await
    }

    /// Write every mutable column of `record` back to its row.
    pub async fn save(&mut self, record: &E) -> Result<(), sqlx::Error> {
        E::bind_update(sqlx::query(E::UPDATE), record)
            .execute(&mut *self.conn)
            .await?;
        Ok(())
    }

    /// Hard-delete a row. Returns false if no row had that id.
    pub async fn delete(&mut self, id: i64) -> Result<bool, sqlx::Error> {
        let sql = format!("DELETE FROM {} WHERE id = ?", E::TABLE);
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

impl Store<'_, Show> {
    /// Shows whose venue reference points at `avanue_id`.
    pub async fn hosted_by(&mut self, avanue_id: i64) -> Result<Vec<Show>, sqlx::Error> {
        sqlx::query_as::<_, Show>(
            r#"
            SELECT id, title, age_limit, head_count, avanue_id
            FROM shows
            WHERE avanue_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(avanue_id)
        .fetch_all(&mut *self.conn)
        .await
    }
}

/// Edges of the customer/show enrollment relation.
///
/// Both views (a customer's shows, a show's roster) are read from the one
/// `customer_show` table, so a single insert or delete updates both.
pub struct Enrollments<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> Enrollments<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    pub async fn contains(&mut self, customer_id: i64, show_id: i64) -> Result<bool, sqlx::Error> {
        let found: Option<i64> = sqlx::query_scalar(
            "SELECT 1 FROM customer_show WHERE customer_id = ? AND show_id = ?",
        )
        .bind(customer_id)
        .bind(show_id)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(found.is_some())
    }

    pub async fn insert(&mut self, customer_id: i64, show_id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO customer_show (customer_id, show_id) VALUES (?, ?)")
            .bind(customer_id)
            .bind(show_id)
            .execute(&mut *self.conn)
            .await?;
        Ok(())
    }

    /// Returns false if the edge did not exist.
    pub async fn remove(&mut self, customer_id: i64, show_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM customer_show WHERE customer_id = ? AND show_id = ?")
            .bind(customer_id)
            .bind(show_id)
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Shows the customer is enrolled in.
    pub async fn shows_of(&mut self, customer_id: i64) -> Result<Vec<Show>, sqlx::Error> {
        sqlx::query_as::<_, Show>(
            r#"
            SELECT s.id, s.title, s.age_limit, s.head_count, s.avanue_id
            FROM shows s
            JOIN customer_show cs ON cs.show_id = s.id
            WHERE cs.customer_id = ?
            ORDER BY s.id ASC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&mut *self.conn)
        .await
    }

    /// Roster of a show.
    pub async fn customers_of(&mut self, show_id: i64) -> Result<Vec<Customer>, sqlx::Error> {
        sqlx::query_as::<_, Customer>(
            r#"
            SELECT c.id, c.name, c.age
            FROM customers c
            JOIN customer_show cs ON cs.customer_id = c.id
            WHERE cs.show_id = ?
            ORDER BY c.id ASC
            "#,
        )
        .bind(show_id)
        .fetch_all(&mut *self.conn)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{init_pool, run_migrations};
    use crate::models::{Avanue, NewAvanue, NewCustomer, NewShow};
    use sqlx::SqlitePool;

    async fn setup_test_db() -> SqlitePool {
        let pool = init_pool("sqlite::memory:", 1).await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    fn ann() -> NewCustomer {
        NewCustomer {
            name: "Ann".to_string(),
            age: 30,
        }
    }

    fn gala() -> NewShow {
        NewShow {
            title: "Gala".to_string(),
            age_limit: 18,
            head_count: 10,
        }
    }

    #[tokio::test]
    async fn test_add_assigns_ids() {
        let pool = setup_test_db().await;
        let mut conn = pool.acquire().await.unwrap();
        let mut customers = Store::<Customer>::new(&mut conn);

        let first = customers.add(&ann()).await.unwrap();
        let second = customers.add(&ann()).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.name, "Ann");
        assert_eq!(first.age, 30);
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let pool = setup_test_db().await;
        let mut conn = pool.acquire().await.unwrap();

        let found = Store::<Show>::new(&mut conn).get(42).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_get_all_ordered_by_id() {
        let pool = setup_test_db().await;
        let mut conn = pool.acquire().await.unwrap();
        let mut avanues = Store::<Avanue>::new(&mut conn);

        for name in ["Hall", "Arena", "Club"] {
            avanues
                .add(&NewAvanue {
                    name: name.to_string(),
                    availability: true,
                })
                .await
                .unwrap();
        }

        let all = avanues.get_all().await.unwrap();
        let names: Vec<&str> = all.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Hall", "Arena", "Club"]);
    }

    #[tokio::test]
    async fn test_save_and_delete() {
        let pool = setup_test_db().await;
        let mut conn = pool.acquire().await.unwrap();
        let mut shows = Store::<Show>::new(&mut conn);

        let mut show = shows.add(&gala()).await.unwrap();
        show.head_count = 3;
        show.title = "Gala Night".to_string();
        shows.save(&show).await.unwrap();

        let reloaded = shows.get(show.id).await.unwrap().unwrap();
        assert_eq!(reloaded.head_count, 3);
        assert_eq!(reloaded.title, "Gala Night");

        assert!(shows.delete(show.id).await.unwrap());
        assert!(!shows.delete(show.id).await.unwrap());
        assert!(shows.get(show.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let pool = setup_test_db().await;
        let mut conn = pool.acquire().await.unwrap();
        let mut customers = Store::<Customer>::new(&mut conn);

        let first = customers.add(&ann()).await.unwrap();
        customers.delete(first.id).await.unwrap();
        let second = customers.add(&ann()).await.unwrap();

        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_enrollment_edges_visible_from_both_sides() {
        let pool = setup_test_db().await;
        let mut conn = pool.acquire().await.unwrap();

        let customer = Store::<Customer>::new(&mut conn).add(&ann()).await.unwrap();
        let show = Store::<Show>::new(&mut conn).add(&gala()).await.unwrap();

        let mut edges = Enrollments::new(&mut conn);
        assert!(!edges.contains(customer.id, show.id).await.unwrap());

        edges.insert(customer.id, show.id).await.unwrap();
        assert!(edges.contains(customer.id, show.id).await.unwrap());
        assert_eq!(edges.shows_of(customer.id).await.unwrap()[0].id, show.id);
        assert_eq!(edges.customers_of(show.id).await.unwrap()[0].id, customer.id);

        // Duplicate edge violates the composite primary key
        assert!(edges.insert(customer.id, show.id).await.is_err());

        assert!(edges.remove(customer.id, show.id).await.unwrap());
        assert!(!edges.remove(customer.id, show.id).await.unwrap());
        assert!(edges.customers_of(show.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_hosted_by() {
        let pool = setup_test_db().await;
        let mut conn = pool.acquire().await.unwrap();

        let hall = Store::<Avanue>::new(&mut conn)
            .add(&NewAvanue {
                name: "Hall".to_string(),
                availability: true,
            })
            .await
            .unwrap();

        let mut shows = Store::<Show>::new(&mut conn);
        let mut hosted = shows.add(&gala()).await.unwrap();
        shows.add(&gala()).await.unwrap();
        hosted.avanue_id = Some(hall.id);
        shows.save(&hosted).await.unwrap();

        let at_hall = shows.hosted_by(hall.id).await.unwrap();
        assert_eq!(at_hall.len(), 1);
        assert_eq!(at_hall[0].id, hosted.id);
    }
}
