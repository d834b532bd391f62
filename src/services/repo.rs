use anyhow::Context;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// One entry of the public offering list. `image` is a path or URL chosen
/// by the admin, typically under `/uploads`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Service {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image: String,
    pub link: Option<String>,
    pub is_active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Service {
    /// Visible listings only, oldest first.
    pub async fn list_active(db: &PgPool) -> anyhow::Result<Vec<Service>> {
        let services = sqlx::query_as::<_, Service>(
            r#"
            SELECT id, title, description, image, link, is_active, created_at, updated_at
              FROM services
             WHERE is_active
             ORDER BY created_at ASC
            "#,
        )
        .fetch_all(db)
        .await
        .context("list active services")?;

        Ok(services)
    }

    pub async fn create(
        db: &PgPool,
        title: &str,
        description: &str,
        image: &str,
        link: Option<&str>,
    ) -> anyhow::Result<Service> {
        let service = sqlx::query_as::<_, Service>(
            r#"
            INSERT INTO services (title, description, image, link)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, image, link, is_active, created_at, updated_at
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(image)
        .bind(link)
        .fetch_one(db)
        .await
        .context("create service")?;

        Ok(service)
    }

    /// Partial update: absent fields keep their stored value.
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
        image: Option<&str>,
        link: Option<&str>,
        is_active: Option<bool>,
    ) -> anyhow::Result<Option<Service>> {
        let service = sqlx::query_as::<_, Service>(
            r#"
            UPDATE services
               SET title = COALESCE($2, title),
                   description = COALESCE($3, description),
                   image = COALESCE($4, image),
                   link = COALESCE($5, link),
                   is_active = COALESCE($6, is_active),
                   updated_at = now()
             WHERE id = $1
            RETURNING id, title, description, image, link, is_active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(image)
        .bind(link)
        .bind(is_active)
        .fetch_optional(db)
        .await
        .context("update service")?;

        Ok(service)
    }

    pub async fn delete_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let deleted = sqlx::query_as::<_, (Uuid,)>(
            r#"
            DELETE FROM services
             WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("delete service")?;

        Ok(deleted.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_json_shape() {
        let service = Service {
            id: Uuid::new_v4(),
            title: "Ravalement de façade".into(),
            description: "Remise à neuf complète".into(),
            image: "/uploads/1724570000000-abc12345-facade.jpg".into(),
            link: None,
            is_active: true,
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_string(&service).unwrap();
        assert!(json.contains("Ravalement"));
        assert!(json.contains("\"is_active\":true"));
        assert!(json.contains("\"link\":null"));
    }
}
