//! Postgres-backed loader for the tour aggregate used by scene assembly.

use std::collections::HashMap;

use async_trait::async_trait;
use panotour_core::tour::{
    HotspotIcon, HotspotNode, LinkedTourImage, TourAggregate, TourAggregateSource, TourImageNode,
};
use panotour_core::types::DbId;

use crate::models::hotspot::HotspotJoinRow;
use crate::models::tour::Tour;
use crate::models::tour_image::TourImage;
use crate::repositories::hotspot_repo::JOIN_SELECT;
use crate::repositories::tour_image_repo;
use crate::DbPool;

/// Loads tour aggregates from the database.
///
/// The tour, its images and their hotspots are read inside one
/// `REPEATABLE READ` read-only transaction, so a concurrent edit can never
/// produce a scene graph that mixes two states.
#[derive(Clone)]
pub struct PgTourAggregateSource {
    pool: DbPool,
}

impl PgTourAggregateSource {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TourAggregateSource for PgTourAggregateSource {
    type Error = sqlx::Error;

    async fn load_tour_aggregate(
        &self,
        tour_id: DbId,
    ) -> Result<Option<TourAggregate>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let tour = sqlx::query_as::<_, Tour>(
            "SELECT id, name, slug, description, project_logo, created_at, updated_at
             FROM tours WHERE id = $1",
        )
        .bind(tour_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(tour) = tour else {
            return Ok(None);
        };

        let image_query = format!(
            "SELECT {} FROM tour_images WHERE tour_id = $1 ORDER BY sort_order, id",
            tour_image_repo::COLUMNS
        );
        let images = sqlx::query_as::<_, TourImage>(&image_query)
            .bind(tour_id)
            .fetch_all(&mut *tx)
            .await?;

        let hotspot_query = format!("{JOIN_SELECT} WHERE ti.tour_id = $1 ORDER BY h.id");
        let rows = sqlx::query_as::<_, HotspotJoinRow>(&hotspot_query)
            .bind(tour_id)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(
            tour_id,
            images = images.len(),
            hotspots = rows.len(),
            "Loaded tour aggregate"
        );

        Ok(Some(build_aggregate(tour, images, rows)))
    }
}

/// Group joined hotspot rows under their images, keeping both orders.
fn build_aggregate(tour: Tour, images: Vec<TourImage>, rows: Vec<HotspotJoinRow>) -> TourAggregate {
    let mut by_image: HashMap<DbId, Vec<HotspotNode>> = HashMap::new();
    for row in rows {
        by_image
            .entry(row.hotspot.tour_image_id)
            .or_default()
            .push(hotspot_node(row));
    }

    let tour_images = images
        .into_iter()
        .map(|image| TourImageNode {
            hotspots: by_image.remove(&image.id).unwrap_or_default(),
            id: image.id,
            name: image.name,
            url: image.url,
            sort_order: image.sort_order,
            init_pitch: image.init_pitch,
            init_yaw: image.init_yaw,
        })
        .collect();

    TourAggregate {
        id: tour.id,
        name: tour.name,
        slug: tour.slug,
        description: tour.description,
        project_logo: tour.project_logo,
        tour_images,
    }
}

fn hotspot_node(row: HotspotJoinRow) -> HotspotNode {
    let linked_tour_image = row.linked_ref().map(|r| LinkedTourImage {
        id: r.id,
        name: r.name,
        url: r.url,
    });
    let hotspot_image = row.icon().map(|i| HotspotIcon {
        id: i.id,
        url: i.url,
        name: i.name,
    });
    let h = row.hotspot;
    HotspotNode {
        id: h.id,
        pitch: h.pitch,
        yaw: h.yaw,
        hfov: h.hfov,
        kind: h.kind,
        name: h.name,
        tour_image_id: h.tour_image_id,
        hotspot_image_id: h.hotspot_image_id,
        linked_tour_image_id: h.linked_tour_image_id,
        linked_tour_image,
        hotspot_image,
    }
}
