//! Repository for the `tours` table.

use std::collections::HashMap;

use sqlx::PgPool;
use panotour_core::error::CoreError;
use panotour_core::image_sync::plan_image_sync;
use panotour_core::slug::slugify;
use panotour_core::types::DbId;

use crate::models::tour::{CreateTour, Tour, TourSummary, TourWithImages, UpdateTour};
use crate::models::tour_image::{CreateTourImage, TourImage};
use crate::repositories::tour_image_repo::{self, TourImageRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, slug, description, project_logo, created_at, updated_at";

/// Why [`TourRepo::update`] did not apply.
#[derive(Debug, thiserror::Error)]
pub enum TourUpdateError {
    /// The keep-list does not match the tour's images at the time of the
    /// update.
    #[error(transparent)]
    ImageSync(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Provides CRUD operations for tours and their image sets.
pub struct TourRepo;

impl TourRepo {
    /// Insert a tour together with its initial images in one transaction.
    ///
    /// The slug needs the generated id, so it is written right after the
    /// insert inside the same transaction.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTour,
        images: &[CreateTourImage],
    ) -> Result<TourWithImages, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let id: DbId = sqlx::query_scalar(
            "INSERT INTO tours (name, description, project_logo)
             VALUES ($1, $2, $3)
             RETURNING id",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.project_logo)
        .fetch_one(&mut *tx)
        .await?;

        let tour = Self::set_slug_inner(&mut tx, id, &input.name).await?;
        let tour_images = TourImageRepo::insert_many_inner(&mut tx, id, images).await?;

        tx.commit().await?;
        Ok(TourWithImages { tour, tour_images })
    }

    /// Find a tour by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tour>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tours WHERE id = $1");
        sqlx::query_as::<_, Tour>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a tour by ID, enriched with its images in display order.
    pub async fn find_with_images(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TourWithImages>, sqlx::Error> {
        match Self::find_by_id(pool, id).await? {
            Some(tour) => {
                let tour_images = TourImageRepo::list_by_tour(pool, tour.id).await?;
                Ok(Some(TourWithImages { tour, tour_images }))
            }
            None => Ok(None),
        }
    }

    /// List all tours with their images, oldest tour first.
    pub async fn list_with_images(pool: &PgPool) -> Result<Vec<TourWithImages>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tours ORDER BY id");
        let tours = sqlx::query_as::<_, Tour>(&query).fetch_all(pool).await?;

        let ids: Vec<DbId> = tours.iter().map(|t| t.id).collect();
        let image_query = format!(
            "SELECT {} FROM tour_images WHERE tour_id = ANY($1) ORDER BY tour_id, sort_order, id",
            tour_image_repo::COLUMNS
        );
        let images = sqlx::query_as::<_, TourImage>(&image_query)
            .bind(&ids)
            .fetch_all(pool)
            .await?;

        let mut by_tour: HashMap<DbId, Vec<TourImage>> = HashMap::new();
        for image in images {
            by_tour.entry(image.tour_id).or_default().push(image);
        }

        Ok(tours
            .into_iter()
            .map(|tour| {
                let tour_images = by_tour.remove(&tour.id).unwrap_or_default();
                TourWithImages { tour, tour_images }
            })
            .collect())
    }

    /// Dashboard rows: one per tour with image count and cover image.
    pub async fn list_summaries(pool: &PgPool) -> Result<Vec<TourSummary>, sqlx::Error> {
        sqlx::query_as::<_, TourSummary>(
            "SELECT t.id, t.name, t.slug, t.description, t.project_logo,
                    (SELECT COUNT(*) FROM tour_images ti WHERE ti.tour_id = t.id) AS image_count,
                    (SELECT ti.url FROM tour_images ti
                      WHERE ti.tour_id = t.id
                      ORDER BY ti.sort_order, ti.id
                      LIMIT 1) AS cover_image_url,
                    t.updated_at
             FROM tours t
             ORDER BY t.updated_at DESC, t.id DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Update a tour's fields and reconcile its images in one transaction.
    ///
    /// The image plan is computed from the rows read under the tour lock, so
    /// `keep` is checked against the images as they are at commit time (see
    /// [`plan_image_sync`]). `new_images` are numbered from 1 in upload order
    /// and placed after the kept images. The slug is regenerated when the
    /// name changes. Returns `None` if the tour does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTour,
        keep: Option<&[DbId]>,
        new_images: &[CreateTourImage],
    ) -> Result<Option<TourWithImages>, TourUpdateError> {
        let mut tx = pool.begin().await?;

        let current: Option<String> =
            sqlx::query_scalar("SELECT name FROM tours WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(current_name) = current else {
            return Ok(None);
        };

        let existing = TourImageRepo::existing_for_tour_inner(&mut tx, id).await?;
        let plan = plan_image_sync(&existing, keep)?;

        let query = format!(
            "UPDATE tours SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                project_logo = COALESCE($4, project_logo)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let mut tour = sqlx::query_as::<_, Tour>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.project_logo)
            .fetch_one(&mut *tx)
            .await?;

        if tour.name != current_name {
            tour = Self::set_slug_inner(&mut tx, id, &tour.name).await?;
        }

        if !plan.delete.is_empty() {
            sqlx::query("DELETE FROM tour_images WHERE tour_id = $1 AND id = ANY($2)")
                .bind(id)
                .bind(&plan.delete)
                .execute(&mut *tx)
                .await?;
        }
        for &(image_id, sort_order) in &plan.reorder {
            sqlx::query("UPDATE tour_images SET sort_order = $3 WHERE id = $1 AND tour_id = $2")
                .bind(image_id)
                .bind(id)
                .bind(sort_order)
                .execute(&mut *tx)
                .await?;
        }
        let offset = plan.first_new_order - 1;
        let appended: Vec<CreateTourImage> = new_images
            .iter()
            .map(|image| CreateTourImage {
                sort_order: image.sort_order + offset,
                ..image.clone()
            })
            .collect();
        TourImageRepo::insert_many_inner(&mut tx, id, &appended).await?;

        let image_query = format!(
            "SELECT {} FROM tour_images WHERE tour_id = $1 ORDER BY sort_order, id",
            tour_image_repo::COLUMNS
        );
        let tour_images = sqlx::query_as::<_, TourImage>(&image_query)
            .bind(id)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(TourWithImages { tour, tour_images }))
    }

    /// Delete a tour with its images and their hotspots. Returns `true` if a
    /// row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tours WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    async fn set_slug_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
        name: &str,
    ) -> Result<Tour, sqlx::Error> {
        let query = format!("UPDATE tours SET slug = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Tour>(&query)
            .bind(id)
            .bind(slugify(name, Some(id)))
            .fetch_one(&mut **tx)
            .await
    }
}
