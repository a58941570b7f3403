//! Integration tests for loading tour aggregates and assembling scenes from
//! them against a real database.

use sqlx::PgPool;
use panotour_core::tour::assembly::{assemble_indexed, assemble_keyed};
use panotour_core::tour::{assemble_tour, AssemblyError, Projection, TourAggregateSource};
use panotour_db::aggregate::PgTourAggregateSource;
use panotour_db::models::hotspot::CreateHotspot;
use panotour_db::models::hotspot_image::CreateHotspotImage;
use panotour_db::models::tour::{CreateTour, TourWithImages};
use panotour_db::models::tour_image::{CreateTourImage, UpdateTourImage};
use panotour_db::repositories::{HotspotImageRepo, HotspotRepo, TourImageRepo, TourRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_image(name: &str, sort_order: i32) -> CreateTourImage {
    CreateTourImage {
        name: name.to_string(),
        url: format!("/uploads/{}.jpg", name.to_lowercase()),
        sort_order,
    }
}

async fn seed_tour(pool: &PgPool, names: &[&str]) -> TourWithImages {
    let images: Vec<CreateTourImage> = names
        .iter()
        .zip(1..)
        .map(|(name, order)| new_image(name, order))
        .collect();
    TourRepo::create(
        pool,
        &CreateTour {
            name: "Museum".to_string(),
            description: None,
            project_logo: Some("/uploads/logo.png".to_string()),
        },
        &images,
    )
    .await
    .unwrap()
}

fn link_hotspot(on: i64, to: Option<i64>, icon: Option<i64>, name: &str) -> CreateHotspot {
    CreateHotspot {
        pitch: -5.0,
        yaw: 20.0,
        hfov: 90.0,
        kind: "link".to_string(),
        name: name.to_string(),
        tour_image_id: on,
        hotspot_image_id: icon,
        linked_tour_image_id: to,
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_tour_loads_none(pool: PgPool) {
    let source = PgTourAggregateSource::new(pool);
    assert!(source.load_tour_aggregate(999).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_images_follow_sort_order_then_id(pool: PgPool) {
    let tour = seed_tour(&pool, &["Lobby", "Hall", "Roof"]).await;
    let roof = tour.tour_images[2].id;
    TourImageRepo::update(
        &pool,
        roof,
        &UpdateTourImage {
            sort_order: Some(1),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let source = PgTourAggregateSource::new(pool);
    let aggregate = source.load_tour_aggregate(tour.tour.id).await.unwrap().unwrap();
    let names: Vec<&str> = aggregate.tour_images.iter().map(|i| i.name.as_str()).collect();
    // Lobby and Roof share order 1; Lobby has the lower id.
    assert_eq!(names, ["Lobby", "Roof", "Hall"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_hotspots_grouped_per_image_in_id_order(pool: PgPool) {
    let tour = seed_tour(&pool, &["Lobby", "Hall"]).await;
    let lobby = tour.tour_images[0].id;
    let hall = tour.tour_images[1].id;
    let icon = HotspotImageRepo::create(
        &pool,
        &CreateHotspotImage {
            url: "/uploads/arrow.png".to_string(),
            name: "arrow".to_string(),
        },
    )
    .await
    .unwrap();

    HotspotRepo::create(&pool, &link_hotspot(lobby, Some(hall), Some(icon.id), "To Hall"))
        .await
        .unwrap();
    HotspotRepo::create(&pool, &link_hotspot(hall, Some(lobby), None, "Back"))
        .await
        .unwrap();
    HotspotRepo::create(&pool, &link_hotspot(lobby, None, None, "Nowhere"))
        .await
        .unwrap();

    let source = PgTourAggregateSource::new(pool);
    let aggregate = source.load_tour_aggregate(tour.tour.id).await.unwrap().unwrap();

    let lobby_node = &aggregate.tour_images[0];
    assert_eq!(lobby_node.hotspots.len(), 2);
    assert_eq!(lobby_node.hotspots[0].name, "To Hall");
    assert_eq!(lobby_node.hotspots[1].name, "Nowhere");
    assert_eq!(
        lobby_node.hotspots[0].linked_tour_image.as_ref().map(|l| l.name.as_str()),
        Some("Hall")
    );
    assert_eq!(
        lobby_node.hotspots[0].hotspot_image.as_ref().map(|i| i.url.as_str()),
        Some("/uploads/arrow.png")
    );
    assert!(lobby_node.hotspots[1].linked_tour_image.is_none());
    assert_eq!(aggregate.tour_images[1].hotspots.len(), 1);

    let keyed = assemble_keyed(&aggregate);
    let lobby_scene = &keyed["Lobby"];
    let orders: Vec<u32> = lobby_scene.hot_spots_arr.iter().map(|h| h.order).collect();
    assert_eq!(orders, [1, 2]);
    assert_eq!(lobby_scene.hot_spots_arr[0].transition.as_deref(), Some("Hall"));
    assert_eq!(keyed["Hall"].hot_spots_arr[0].order, 1);
}

// ---------------------------------------------------------------------------
// Reference lifecycle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_link_target_nulls_the_link(pool: PgPool) {
    let tour = seed_tour(&pool, &["Lobby", "Hall"]).await;
    let lobby = tour.tour_images[0].id;
    let hall = tour.tour_images[1].id;
    let hotspot = HotspotRepo::create(&pool, &link_hotspot(lobby, Some(hall), None, "To Hall"))
        .await
        .unwrap();

    assert!(TourImageRepo::delete(&pool, hall).await.unwrap());

    let stored = HotspotRepo::find_by_id(&pool, hotspot.id).await.unwrap().unwrap();
    assert_eq!(stored.linked_tour_image_id, None);

    let source = PgTourAggregateSource::new(pool);
    let aggregate = source.load_tour_aggregate(tour.tour.id).await.unwrap().unwrap();
    let scenes = assemble_indexed(&aggregate);
    assert_eq!(scenes.len(), 1);
    let projected = &scenes[0].scene.hot_spots_arr[0];
    assert_eq!(projected.linked_tour_image_id, None);
    assert_eq!(projected.hotspot.transition, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_host_image_removes_its_hotspots(pool: PgPool) {
    let tour = seed_tour(&pool, &["Lobby", "Hall"]).await;
    let lobby = tour.tour_images[0].id;
    let hall = tour.tour_images[1].id;
    let hotspot = HotspotRepo::create(&pool, &link_hotspot(lobby, Some(hall), None, "To Hall"))
        .await
        .unwrap();

    TourImageRepo::delete(&pool, lobby).await.unwrap();
    assert!(HotspotRepo::find_by_id(&pool, hotspot.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_tour_cascades(pool: PgPool) {
    let tour = seed_tour(&pool, &["Lobby", "Hall"]).await;
    let lobby = tour.tour_images[0].id;
    let hotspot = HotspotRepo::create(&pool, &link_hotspot(lobby, None, None, "Spot"))
        .await
        .unwrap();

    assert!(TourRepo::delete(&pool, tour.tour.id).await.unwrap());
    assert!(TourImageRepo::find_by_id(&pool, lobby).await.unwrap().is_none());
    assert!(HotspotRepo::find_by_id(&pool, hotspot.id).await.unwrap().is_none());
    assert!(!TourRepo::delete(&pool, tour.tour.id).await.unwrap());
}

// ---------------------------------------------------------------------------
// End-to-end assembly
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_assemble_tour_reports_missing_tour(pool: PgPool) {
    let source = PgTourAggregateSource::new(pool);
    let result = assemble_tour(&source, 12345, Projection::Keyed).await;
    assert!(matches!(result, Err(AssemblyError::NotFound(12345))));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_assemble_tour_indexed_has_one_scene_per_image(pool: PgPool) {
    let tour = seed_tour(&pool, &["Lobby", "Lobby", "Roof"]).await;

    let source = PgTourAggregateSource::new(pool);
    let indexed = assemble_tour(&source, tour.tour.id, Projection::Indexed)
        .await
        .unwrap();
    assert_eq!(indexed.len(), 3);

    let keyed = assemble_tour(&source, tour.tour.id, Projection::Keyed)
        .await
        .unwrap();
    assert_eq!(keyed.len(), 2);
}
