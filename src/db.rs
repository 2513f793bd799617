use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Initialize database connection pool with recommended pragmas.
///
/// Foreign keys are enforced on every connection; the schema relies on them
/// for cascading enrollment cleanup and for orphaning shows of a deleted venue.
pub async fn init_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(5))
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Run database migrations.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(include_str!("../migrations/001_create_tables.sql"))
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a test database with in-memory SQLite.
    async fn setup_test_db() -> SqlitePool {
        let pool = init_pool("sqlite::memory:", 1).await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    async fn count(pool: &SqlitePool, sql: &str) -> i64 {
        sqlx::query_scalar(sql).fetch_one(pool).await.unwrap()
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let pool = setup_test_db().await;
        run_migrations(&pool).await.unwrap();

        let tables = count(
            &pool,
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' \
             AND name IN ('customers', 'shows', 'avanues', 'customer_show')",
        )
        .await;
        assert_eq!(tables, 4);
    }

    #[tokio::test]
    async fn test_deleting_avanue_orphans_shows() {
        let pool = setup_test_db().await;

        sqlx::query("INSERT INTO avanues (name, availability) VALUES ('Hall', 1)")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO shows (title, age_limit, head_count, avanue_id) VALUES ('Gala', 18, 5, 1)",
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query("DELETE FROM avanues WHERE id = 1")
            .execute(&pool)
            .await
            .unwrap();

        let avanue_id: Option<i64> = sqlx::query_scalar("SELECT avanue_id FROM shows WHERE id = 1")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(avanue_id, None);
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM shows").await, 1);
    }

    #[tokio::test]
    async fn test_deleting_customer_or_show_removes_enrollments() {
        let pool = setup_test_db().await;

        sqlx::query("INSERT INTO customers (name, age) VALUES ('Ann', 30), ('Bob', 40)")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO shows (title, age_limit, head_count) VALUES ('Gala', 18, 5), ('Opera', 0, 5)",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO customer_show (customer_id, show_id) VALUES (1, 1), (2, 1), (2, 2)")
            .execute(&pool)
            .await
            .unwrap();

        sqlx::query("DELETE FROM customers WHERE id = 1")
            .execute(&pool)
            .await
            .unwrap();
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM customer_show").await, 2);

        sqlx::query("DELETE FROM shows WHERE id = 1")
            .execute(&pool)
            .await
            .unwrap();
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM customer_show").await, 1);
    }

    #[tokio::test]
    async fn test_db_check_constraints() {
        let pool = setup_test_db().await;

        // Age out of range should fail
        let result = sqlx::query("INSERT INTO customers (name, age) VALUES (?, ?)")
            .bind("Ann")
            .bind(121)
            .execute(&pool)
            .await;
        assert!(result.is_err());

        // Name too short should fail
        let result = sqlx::query("INSERT INTO customers (name, age) VALUES (?, ?)")
            .bind("A")
            .bind(30)
            .execute(&pool)
            .await;
        assert!(result.is_err());

        // Negative head_count should fail
        let result =
            sqlx::query("INSERT INTO shows (title, age_limit, head_count) VALUES (?, ?, ?)")
                .bind("Gala")
                .bind(18)
                .bind(-1)
                .execute(&pool)
                .await;
        assert!(result.is_err());

        // Unknown venue should fail
        let result = sqlx::query(
            "INSERT INTO shows (title, age_limit, head_count, avanue_id) VALUES (?, ?, ?, ?)",
        )
        .bind("Gala")
        .bind(18)
        .bind(1)
        .bind(99)
        .execute(&pool)
        .await;
        assert!(result.is_err());
    }
}
