//! Repository for the `hotspots` table.

use sqlx::PgPool;
use panotour_core::types::DbId;

use crate::models::hotspot::{CreateHotspot, Hotspot, HotspotJoinRow, HotspotWithRefs};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, tour_image_id, linked_tour_image_id, hotspot_image_id, \
                       pitch, yaw, hfov, type, name, created_at, updated_at";

/// Select list for hotspots joined with their host image, link target and
/// icon. Shared with the tour aggregate loader.
pub(crate) const JOIN_SELECT: &str = "SELECT h.id, h.tour_image_id, h.linked_tour_image_id, \
        h.hotspot_image_id, h.pitch, h.yaw, h.hfov, h.type, h.name, h.created_at, h.updated_at, \
        ti.url AS tour_image_url, ti.name AS tour_image_name, \
        li.id AS linked_id, li.url AS linked_url, li.name AS linked_name, \
        hi.id AS icon_id, hi.url AS icon_url, hi.name AS icon_name \
    FROM hotspots h \
    JOIN tour_images ti ON ti.id = h.tour_image_id \
    LEFT JOIN tour_images li ON li.id = h.linked_tour_image_id \
    LEFT JOIN hotspot_images hi ON hi.id = h.hotspot_image_id";

/// Provides CRUD operations for hotspots.
pub struct HotspotRepo;

impl HotspotRepo {
    /// Insert a new hotspot, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateHotspot) -> Result<Hotspot, sqlx::Error> {
        let query = format!(
            "INSERT INTO hotspots
                (tour_image_id, linked_tour_image_id, hotspot_image_id, pitch, yaw, hfov, type, name)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Hotspot>(&query)
            .bind(input.tour_image_id)
            .bind(input.linked_tour_image_id)
            .bind(input.hotspot_image_id)
            .bind(input.pitch)
            .bind(input.yaw)
            .bind(input.hfov)
            .bind(&input.kind)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find a hotspot by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Hotspot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM hotspots WHERE id = $1");
        sqlx::query_as::<_, Hotspot>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Hotspots placed on one tour image, ordered by id, with their
    /// references expanded.
    pub async fn list_with_refs_by_tour_image(
        pool: &PgPool,
        tour_image_id: DbId,
    ) -> Result<Vec<HotspotWithRefs>, sqlx::Error> {
        let query = format!("{JOIN_SELECT} WHERE h.tour_image_id = $1 ORDER BY h.id");
        let rows = sqlx::query_as::<_, HotspotJoinRow>(&query)
            .bind(tour_image_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(HotspotJoinRow::into_with_refs).collect())
    }

    /// Overwrite every editable column of a hotspot.
    ///
    /// Partial updates are merged by the caller so that validation sees the
    /// final record. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CreateHotspot,
    ) -> Result<Option<Hotspot>, sqlx::Error> {
        let query = format!(
            "UPDATE hotspots SET
                tour_image_id = $2,
                linked_tour_image_id = $3,
                hotspot_image_id = $4,
                pitch = $5,
                yaw = $6,
                hfov = $7,
                type = $8,
                name = $9
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Hotspot>(&query)
            .bind(id)
            .bind(input.tour_image_id)
            .bind(input.linked_tour_image_id)
            .bind(input.hotspot_image_id)
            .bind(input.pitch)
            .bind(input.yaw)
            .bind(input.hfov)
            .bind(&input.kind)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a hotspot. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM hotspots WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
