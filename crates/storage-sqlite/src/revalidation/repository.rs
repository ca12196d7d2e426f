use kasfolio_core::revalidation::{NewUsageRecord, RevalidationRepositoryTrait};
use kasfolio_core::Result;

use crate::db::{get_connection, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::budgets;
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sql_query;
use diesel::sql_types::Text;
use diesel::SqliteConnection;

use std::sync::Arc;

/// The usage-history table is optional: some deployments never provision
/// it, so it is absent from the migrations and probed at runtime.
const USAGE_TABLE: &str = "budget_usage_history";

#[derive(Debug, QueryableByName)]
struct TableCountRow {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    table_count: i64,
}

pub struct RevalidationRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl RevalidationRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        RevalidationRepository { pool, writer }
    }
}

#[async_trait]
impl RevalidationRepositoryTrait for RevalidationRepository {
    async fn touch_budget(&self, budget_id: &str) -> Result<usize> {
        let budget_id_owned = budget_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let now = Utc::now().to_rfc3339();
                diesel::update(budgets::table.find(budget_id_owned))
                    .set(budgets::updated_at.eq(now))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    fn usage_table_exists(&self) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        let row: TableCountRow = sql_query(
            "SELECT COUNT(*) AS table_count FROM sqlite_master WHERE type = 'table' AND name = ?",
        )
        .bind::<Text, _>(USAGE_TABLE)
        .get_result(&mut conn)
        .into_core()?;
        Ok(row.table_count > 0)
    }

    async fn insert_usage_record(&self, record: NewUsageRecord) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let recorded_at = Utc::now().to_rfc3339();
                sql_query(
                    "INSERT INTO budget_usage_history (budget_id, expense_id, amount, recorded_at) \
                     VALUES (?, ?, ?, ?)",
                )
                .bind::<Text, _>(record.budget_id)
                .bind::<Text, _>(record.expense_id)
                .bind::<Text, _>(record.amount.to_string())
                .bind::<Text, _>(recorded_at)
                .execute(conn)
                .into_core()
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budgets::BudgetRepository;
    use crate::db::{create_pool, run_migrations, write_actor::spawn_writer};
    use kasfolio_core::budgets::{BudgetRepositoryTrait, NewBudget};
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    async fn create_test_repository() -> (
        RevalidationRepository,
        Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        String,
        tempfile::TempDir,
    ) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let db_path_str = db_path.to_string_lossy().to_string();

        let pool = create_pool(&db_path_str).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");

        let writer = spawn_writer((*pool).clone());

        let budget_repo = BudgetRepository::new(Arc::clone(&pool), writer.clone());
        let budget = budget_repo
            .insert_new_budget(NewBudget {
                id: None,
                name: "Operasional".to_string(),
                amount: dec!(5000000),
                period_start: "2026-01-01".to_string(),
                period_end: "2026-01-31".to_string(),
            })
            .await
            .expect("Failed to insert budget");

        let repo = RevalidationRepository::new(Arc::clone(&pool), writer);
        (repo, pool, budget.id, temp_dir)
    }

    fn provision_usage_table(pool: &Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) {
        let mut conn = get_connection(pool).expect("Failed to get connection");
        sql_query(
            "CREATE TABLE budget_usage_history (\
                budget_id TEXT NOT NULL, \
                expense_id TEXT NOT NULL, \
                amount TEXT NOT NULL, \
                recorded_at TEXT NOT NULL)",
        )
        .execute(&mut conn)
        .expect("Failed to create usage table");
    }

    #[derive(QueryableByName)]
    struct UsageRowDB {
        #[diesel(sql_type = diesel::sql_types::Text)]
        budget_id: String,
        #[diesel(sql_type = diesel::sql_types::Text)]
        expense_id: String,
        #[diesel(sql_type = diesel::sql_types::Text)]
        amount: String,
    }

    #[tokio::test]
    async fn test_touch_budget_bumps_updated_at() {
        let (repo, pool, budget_id, _temp_dir) = create_test_repository().await;
        let budget_repo = BudgetRepository::new(Arc::clone(&pool), repo.writer.clone());
        let before = budget_repo
            .get_budget_by_id(&budget_id)
            .expect("Failed to load budget");

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let touched = repo.touch_budget(&budget_id).await.expect("Touch failed");

        assert_eq!(touched, 1);
        let after = budget_repo
            .get_budget_by_id(&budget_id)
            .expect("Failed to load budget");
        assert!(after.updated_at > before.updated_at);
        assert_eq!(after.created_at, before.created_at);
    }

    #[tokio::test]
    async fn test_touch_missing_budget_affects_no_rows() {
        let (repo, _pool, _budget_id, _temp_dir) = create_test_repository().await;

        let touched = repo
            .touch_budget("bgt-missing")
            .await
            .expect("Touch failed");

        assert_eq!(touched, 0);
    }

    #[tokio::test]
    async fn test_usage_table_absent_on_fresh_database() {
        let (repo, _pool, _budget_id, _temp_dir) = create_test_repository().await;

        assert!(!repo.usage_table_exists().expect("Probe failed"));
    }

    #[tokio::test]
    async fn test_insert_usage_record_when_table_provisioned() {
        let (repo, pool, budget_id, _temp_dir) = create_test_repository().await;
        provision_usage_table(&pool);

        assert!(repo.usage_table_exists().expect("Probe failed"));
        let inserted = repo
            .insert_usage_record(NewUsageRecord {
                budget_id: budget_id.clone(),
                expense_id: "exp-1".to_string(),
                amount: dec!(250000),
            })
            .await
            .expect("Insert failed");
        assert_eq!(inserted, 1);

        let mut conn = get_connection(&pool).expect("Failed to get connection");
        let rows: Vec<UsageRowDB> =
            sql_query("SELECT budget_id, expense_id, amount, recorded_at FROM budget_usage_history")
                .load(&mut conn)
                .expect("Failed to load usage rows");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].budget_id, budget_id);
        assert_eq!(rows[0].expense_id, "exp-1");
        assert_eq!(rows[0].amount, "250000");
    }

    #[tokio::test]
    async fn test_insert_usage_record_fails_without_table() {
        let (repo, _pool, budget_id, _temp_dir) = create_test_repository().await;

        let result = repo
            .insert_usage_record(NewUsageRecord {
                budget_id,
                expense_id: "exp-1".to_string(),
                amount: dec!(250000),
            })
            .await;

        assert!(result.is_err());
    }
}
