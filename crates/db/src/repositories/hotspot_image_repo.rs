//! Repository for the `hotspot_images` table.

use sqlx::PgPool;
use panotour_core::types::DbId;

use crate::models::hotspot_image::{CreateHotspotImage, HotspotImage};

/// Read and seed access to hotspot icon assets.
pub struct HotspotImageRepo;

impl HotspotImageRepo {
    /// List every icon asset ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<HotspotImage>, sqlx::Error> {
        sqlx::query_as::<_, HotspotImage>("SELECT id, url, name FROM hotspot_images ORDER BY id")
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<HotspotImage>, sqlx::Error> {
        sqlx::query_as::<_, HotspotImage>("SELECT id, url, name FROM hotspot_images WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Register an icon asset.
    pub async fn create(
        pool: &PgPool,
        input: &CreateHotspotImage,
    ) -> Result<HotspotImage, sqlx::Error> {
        sqlx::query_as::<_, HotspotImage>(
            "INSERT INTO hotspot_images (url, name) VALUES ($1, $2) RETURNING id, url, name",
        )
        .bind(&input.url)
        .bind(&input.name)
        .fetch_one(pool)
        .await
    }
}
