//! Repository for the `tour_images` table.

use sqlx::PgPool;
use panotour_core::image_sync::ExistingImage;
use panotour_core::types::DbId;

use crate::models::tour_image::{CreateTourImage, TourImage, UpdateTourImage};

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "id, tour_id, name, url, sort_order, init_pitch, init_yaw, \
                                  created_at, updated_at";

const EXISTING_QUERY: &str =
    "SELECT id, sort_order FROM tour_images WHERE tour_id = $1 ORDER BY sort_order, id";

fn to_existing(rows: Vec<(DbId, i32)>) -> Vec<ExistingImage> {
    rows.into_iter()
        .map(|(id, sort_order)| ExistingImage { id, sort_order })
        .collect()
}

/// Provides CRUD operations for the panorama images of a tour.
pub struct TourImageRepo;

impl TourImageRepo {
    /// Find a tour image by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TourImage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tour_images WHERE id = $1");
        sqlx::query_as::<_, TourImage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the images of a tour in display order.
    pub async fn list_by_tour(pool: &PgPool, tour_id: DbId) -> Result<Vec<TourImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tour_images WHERE tour_id = $1 ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, TourImage>(&query)
            .bind(tour_id)
            .fetch_all(pool)
            .await
    }

    /// Ids and orders of the stored images of a tour, for update planning.
    pub async fn existing_for_tour(
        pool: &PgPool,
        tour_id: DbId,
    ) -> Result<Vec<ExistingImage>, sqlx::Error> {
        let rows: Vec<(DbId, i32)> = sqlx::query_as(EXISTING_QUERY)
            .bind(tour_id)
            .fetch_all(pool)
            .await?;
        Ok(to_existing(rows))
    }

    /// Update a tour image. `None` fields are left alone; `Some(None)` clears
    /// an initial angle.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTourImage,
    ) -> Result<Option<TourImage>, sqlx::Error> {
        let query = format!(
            "UPDATE tour_images SET
                name = COALESCE($2, name),
                sort_order = COALESCE($3, sort_order),
                init_pitch = CASE WHEN $4 THEN $5 ELSE init_pitch END,
                init_yaw = CASE WHEN $6 THEN $7 ELSE init_yaw END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TourImage>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.sort_order)
            .bind(input.init_pitch.is_some())
            .bind(input.init_pitch.flatten())
            .bind(input.init_yaw.is_some())
            .bind(input.init_yaw.flatten())
            .fetch_optional(pool)
            .await
    }

    /// Delete a tour image. Hotspots placed on it are removed by cascade and
    /// hotspots linking to it lose their link. Returns `true` if a row was
    /// removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tour_images WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// [`Self::existing_for_tour`] within an existing transaction.
    pub(crate) async fn existing_for_tour_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        tour_id: DbId,
    ) -> Result<Vec<ExistingImage>, sqlx::Error> {
        let rows: Vec<(DbId, i32)> = sqlx::query_as(EXISTING_QUERY)
            .bind(tour_id)
            .fetch_all(&mut **tx)
            .await?;
        Ok(to_existing(rows))
    }

    /// Insert images within an existing transaction.
    pub(crate) async fn insert_many_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        tour_id: DbId,
        images: &[CreateTourImage],
    ) -> Result<Vec<TourImage>, sqlx::Error> {
        let query = format!(
            "INSERT INTO tour_images (tour_id, name, url, sort_order)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let mut created = Vec::with_capacity(images.len());
        for image in images {
            let row = sqlx::query_as::<_, TourImage>(&query)
                .bind(tour_id)
                .bind(&image.name)
                .bind(&image.url)
                .bind(image.sort_order)
                .fetch_one(&mut **tx)
                .await?;
            created.push(row);
        }
        Ok(created)
    }
}
