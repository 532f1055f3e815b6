use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use tokio::sync::OnceCell;

// Process-scoped connection, established on first use.
static GATEWAY: OnceCell<DatabaseConnection> = OnceCell::const_new();

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    // Run migrations manually (simple SQL)
    run_migrations(&db).await?;

    Ok(db)
}

/// Shared connection handle, initialized lazily on first use and cached for
/// the lifetime of the process. Concurrent first callers share a single
/// initialization. Fails if the configured URL is unreachable, in which case
/// the process cannot serve requests.
pub async fn handle(database_url: &str) -> Result<&'static DatabaseConnection, DbErr> {
    GATEWAY.get_or_try_init(|| init_db(database_url)).await
}

/// Teardown hook: close the cached connection's pool. Safe to call when the
/// gateway was never initialized.
pub async fn shutdown() {
    if let Some(db) = GATEWAY.get() {
        if let Err(e) = db.clone().close().await {
            tracing::warn!("Error closing database connection: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn concurrent_first_callers_share_one_connection() {
        let a = tokio::spawn(handle("sqlite::memory:"));
        let b = tokio::spawn(handle("sqlite::memory:"));

        let a = a.await.unwrap().expect("init failed");
        let b = b.await.unwrap().expect("init failed");
        assert!(std::ptr::eq(a, b));
    }
}

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Create books table
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS books (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            price REAL NOT NULL,
            description TEXT NOT NULL,
            isbn TEXT,
            pages INTEGER,
            language TEXT,
            publisher TEXT,
            date_published TEXT,
            in_stock INTEGER NOT NULL DEFAULT 1,
            genre TEXT NOT NULL DEFAULT '[]',
            rating REAL,
            review_count INTEGER NOT NULL DEFAULT 0,
            featured INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#
        .to_owned(),
    ))
    .await?;

    // Create reviews table
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS reviews (
            id TEXT PRIMARY KEY,
            book_id TEXT NOT NULL,
            author TEXT NOT NULL,
            rating INTEGER NOT NULL,
            title TEXT NOT NULL,
            comment TEXT NOT NULL,
            timestamp TEXT NOT NULL,
            verified INTEGER NOT NULL DEFAULT 0
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        "CREATE INDEX IF NOT EXISTS reviews_book_id ON reviews(book_id)".to_owned(),
    ))
    .await?;

    // Create cart_items table. The unique (user_id, book_id) index backs the
    // atomic merge in the cart service.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS cart_items (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            book_id TEXT NOT NULL,
            quantity INTEGER NOT NULL,
            added_at TEXT NOT NULL
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        "CREATE UNIQUE INDEX IF NOT EXISTS cart_items_user_book ON cart_items(user_id, book_id)"
            .to_owned(),
    ))
    .await?;

    Ok(())
}
