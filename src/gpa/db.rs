mod table;

use log::info;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};
use std::path::Path;
use time::OffsetDateTime;

pub use table::{MatchHistoryRecord, StoredMatch};
use table::MatchHistoryRow;

use super::{
    err::GpaError,
    matcher::{MatchProfile, MatchResult},
};

/// Persisted history of matcher runs
#[derive(Clone, Debug)]
pub struct MatchStore {
    pub db: Pool<Sqlite>,
}

impl MatchStore {
    /// Open (creating if needed) the database file at `path`
    pub async fn open(path: &Path) -> Result<Self, GpaError> {
        // create the data directory if it doesn't exist
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        info!("opened match history at {}", path.display());
        Self::migrate(pool).await
    }

    /// Private database that lives as long as the store
    pub async fn open_in_memory() -> Result<Self, GpaError> {
        // every connection to :memory: is a separate database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        Self::migrate(pool).await
    }

    async fn migrate(pool: Pool<Sqlite>) -> Result<Self, GpaError> {
        // use the migration feature of sqlx to create the table
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(MatchStore { db: pool })
    }

    /// Save one matcher run, returns its id
    pub async fn record(
        &self,
        profile: &MatchProfile,
        results: &[MatchResult<'_>],
    ) -> Result<i64, GpaError> {
        let stored: Vec<StoredMatch> = results.iter().map(StoredMatch::from).collect();
        let created_at = OffsetDateTime::now_utc().unix_timestamp();

        let id = sqlx::query(
            r"INSERT INTO match_history
                ( created_at, percentage, study_level, countries, results )
                VALUES (?1, ?2, ?3, ?4, ?5);",
        )
        .bind(created_at)
        .bind(profile.percentage)
        .bind(profile.level.map(|level| level.as_str()))
        .bind(serde_json::to_string(&profile.countries)?)
        .bind(serde_json::to_string(&stored)?)
        .execute(&self.db)
        .await?
        .last_insert_rowid();

        info!("recorded match run {id} with {} results", stored.len());
        Ok(id)
    }

    /// Newest runs first
    pub async fn recent(&self, limit: u32) -> Result<Vec<MatchHistoryRecord>, GpaError> {
        let rows: Vec<MatchHistoryRow> = sqlx::query_as(
            r"SELECT * FROM match_history
                ORDER BY created_at DESC, history_id DESC
                LIMIT ?1;",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(MatchHistoryRecord::try_from).collect()
    }

    pub async fn get(&self, id: i64) -> Result<Option<MatchHistoryRecord>, GpaError> {
        let row: Option<MatchHistoryRow> =
            sqlx::query_as(r"SELECT * FROM match_history WHERE history_id = ?1;")
                .bind(id)
                .fetch_optional(&self.db)
                .await?;

        row.map(MatchHistoryRecord::try_from).transpose()
    }

    /// Delete every saved run, returns how many were removed
    pub async fn clear(&self) -> Result<u64, GpaError> {
        let removed = sqlx::query(r"DELETE FROM match_history;")
            .execute(&self.db)
            .await?
            .rows_affected();
        info!("cleared {removed} match runs");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpa::{matcher::match_scholarships, requirements::StudyLevel};
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_record_and_get() {
        let store = MatchStore::open_in_memory().await.unwrap();
        let profile = MatchProfile::new(75.0)
            .level(StudyLevel::Master)
            .country("Germany");
        let results = match_scholarships(&profile);

        let id = store.record(&profile, &results).await.unwrap();
        let record = store.get(id).await.unwrap().unwrap();

        assert_eq!(record.id, id);
        assert_eq!(record.percentage, 75.0);
        assert_eq!(record.level, Some(StudyLevel::Master));
        assert_eq!(record.countries, vec!["Germany".to_string()]);
        assert_eq!(record.results.len(), results.len());
        assert_eq!(record.results[0], StoredMatch::from(&results[0]));
        assert!(record.created_at().is_some());
    }

    #[tokio::test]
    async fn test_get_missing_record() {
        let store = MatchStore::open_in_memory().await.unwrap();
        assert!(store.get(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_recent_is_newest_first() {
        let store = MatchStore::open_in_memory().await.unwrap();
        let mut ids = Vec::new();
        for percentage in [60.0, 70.0, 80.0] {
            let profile = MatchProfile::new(percentage);
            let results = match_scholarships(&profile);
            ids.push(store.record(&profile, &results).await.unwrap());
        }

        let recent = store.recent(2).await.unwrap();
        let recent_ids: Vec<i64> = recent.iter().map(|r| r.id).collect();
        assert_eq!(recent_ids, vec![ids[2], ids[1]]);
        assert_eq!(recent[0].level, None);
    }

    #[tokio::test]
    async fn test_clear() {
        let store = MatchStore::open_in_memory().await.unwrap();
        let profile = MatchProfile::new(90.0);
        store
            .record(&profile, &match_scholarships(&profile))
            .await
            .unwrap();

        assert_eq!(store.clear().await.unwrap(), 1);
        assert!(store.recent(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_open_file_persists() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("history.db");

        let profile = MatchProfile::new(85.0).level(StudyLevel::Phd);
        let id = {
            let store = MatchStore::open(&path).await.unwrap();
            let id = store
                .record(&profile, &match_scholarships(&profile))
                .await
                .unwrap();
            store.db.close().await;
            id
        };

        let store = MatchStore::open(&path).await.unwrap();
        let record = store.get(id).await.unwrap().unwrap();
        assert_eq!(record.level, Some(StudyLevel::Phd));
    }
}
