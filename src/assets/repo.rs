use anyhow::Context;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use super::category::Category;

/// Indexed gallery image. `storage_key` addresses the bytes in the store;
/// `original_name` is what the admin's browser sent and is display-only.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Image {
    pub id: Uuid,
    pub storage_key: String,
    pub original_name: String,
    pub category: Category,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Image {
    /// Insert one stored file into the index.
    pub async fn insert(
        db: &PgPool,
        storage_key: &str,
        original_name: &str,
        category: Category,
    ) -> anyhow::Result<Image> {
        let image = sqlx::query_as::<_, Image>(
            r#"
            INSERT INTO images (storage_key, original_name, category)
            VALUES ($1, $2, $3)
            RETURNING id, storage_key, original_name, category, created_at
            "#,
        )
        .bind(storage_key)
        .bind(original_name)
        .bind(category)
        .fetch_one(db)
        .await
        .context("insert image")?;

        Ok(image)
    }

    /// Return every image of a category, newest first.
    pub async fn list_by_category(db: &PgPool, category: Category) -> anyhow::Result<Vec<Image>> {
        let images = sqlx::query_as::<_, Image>(
            r#"
            SELECT id, storage_key, original_name, category, created_at
              FROM images
             WHERE category = $1
             ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(category)
        .fetch_all(db)
        .await
        .context("list images by category")?;

        Ok(images)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Image>> {
        let image = sqlx::query_as::<_, Image>(
            r#"
            SELECT id, storage_key, original_name, category, created_at
              FROM images
             WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("find image")?;

        Ok(image)
    }

    /// Delete an index row. `None` means the row was already gone.
    pub async fn delete_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Image>> {
        let image = sqlx::query_as::<_, Image>(
            r#"
            DELETE FROM images
             WHERE id = $1
            RETURNING id, storage_key, original_name, category, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("delete image")?;

        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_json_shape() {
        let image = Image {
            id: Uuid::new_v4(),
            storage_key: "1724570000000-abc12345-wall.jpg".into(),
            original_name: "wall.jpg".into(),
            category: Category::Facades,
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_string(&image).unwrap();
        assert!(json.contains("\"category\":\"facades\""));
        assert!(json.contains("\"original_name\":\"wall.jpg\""));
        assert!(json.contains("created_at"));
    }

    /// Migrated pool from `DATABASE_URL`, or `None` to skip the test when
    /// no database is reachable.
    async fn test_db() -> Option<PgPool> {
        dotenvy::dotenv().ok();
        let url = std::env::var("DATABASE_URL").ok()?;
        let db = PgPool::connect(&url).await.ok()?;
        sqlx::migrate!("./migrations").run(&db).await.ok()?;
        Some(db)
    }

    #[tokio::test]
    async fn list_by_category_is_newest_first() {
        let Some(db) = test_db().await else { return };

        let run = Uuid::new_v4().simple().to_string();
        let keys: Vec<String> = (0..3).map(|i| format!("{run}-{i}.jpg")).collect();
        // Explicit timestamps make the expected order unambiguous even
        // next to rows left by other runs.
        for (hours_ago, key) in [3i32, 2, 1].into_iter().zip(&keys) {
            sqlx::query(
                r#"
                INSERT INTO images (storage_key, original_name, category, created_at)
                VALUES ($1, $2, $3, now() - make_interval(hours => $4))
                "#,
            )
            .bind(key)
            .bind("wall.jpg")
            .bind(Category::Appartement)
            .bind(hours_ago)
            .execute(&db)
            .await
            .expect("seed image");
        }

        let listed = Image::list_by_category(&db, Category::Appartement)
            .await
            .expect("list");
        let ours: Vec<&str> = listed
            .iter()
            .map(|image| image.storage_key.as_str())
            .filter(|key| key.starts_with(&run))
            .collect();
        let newest_first: Vec<&str> = keys.iter().rev().map(String::as_str).collect();
        assert_eq!(ours, newest_first);

        sqlx::query("DELETE FROM images WHERE storage_key LIKE $1")
            .bind(format!("{run}-%"))
            .execute(&db)
            .await
            .expect("cleanup");
    }
}
