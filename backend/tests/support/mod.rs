//! Shared helpers for integration tests that need PostgreSQL.

use tokio::sync::OnceCell;
use user_registry::outbound::persistence::run_pending_migrations;
use uuid::Uuid;

/// Environment variable naming the database used by the PostgreSQL suite.
pub const TEST_DATABASE_ENV: &str = "USER_REGISTRY_TEST_DATABASE_URL";

static MIGRATED: OnceCell<()> = OnceCell::const_new();

/// Return the test database URL with migrations applied, or `None` after
/// printing a skip marker when no database is configured.
pub async fn migrated_database_url(test_name: &str) -> Option<String> {
    let Some(url) = std::env::var(TEST_DATABASE_ENV)
        .ok()
        .filter(|url| !url.trim().is_empty())
    else {
        eprintln!("SKIP-TEST-DATABASE: {test_name} skipped ({TEST_DATABASE_ENV} unset)");
        return None;
    };

    MIGRATED
        .get_or_init(|| async {
            run_pending_migrations(&url)
                .await
                .expect("test database migrations apply");
        })
        .await;
    Some(url)
}

/// Suffix keeping usernames and emails unique across concurrent tests.
pub fn unique_suffix() -> String {
    Uuid::new_v4().simple().to_string()
}
