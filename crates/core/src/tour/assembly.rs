//! Tour assembly: aggregate in, scene collection out.
//!
//! Two projections are produced from the same fold over the tour's images:
//!
//! - **Keyed** (public viewer): `sceneName -> Scene`. Scene names are display
//!   labels, not identifiers. When two images share a name the later one (in
//!   repository order) replaces the earlier one's value while keeping the
//!   first occurrence's position. Each scene carries `sceneId` so clients can
//!   tell images apart.
//! - **Indexed** (authoring dashboard): one [`BackendScene`] per image, in
//!   repository order, with hotspot ids and link ids.

use indexmap::IndexMap;
use serde::Serialize;

use super::aggregate::TourAggregate;
use super::hotspot::{project_hotspot, ViewerHotspot};
use super::scene::{build_backend_scene, build_scene, BackendScene, Scene};
use super::{AssemblyError, TourAggregateSource};
use crate::types::DbId;

/// Which consumer the collection is shaped for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    Keyed,
    Indexed,
}

/// Keyed collection: scene name to scene, in first-appearance order.
pub type KeyedScenes = IndexMap<String, Scene<ViewerHotspot>>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SceneCollection {
    Keyed(KeyedScenes),
    Indexed(Vec<BackendScene>),
}

impl SceneCollection {
    /// Number of scenes in the collection.
    pub fn len(&self) -> usize {
        match self {
            SceneCollection::Keyed(scenes) => scenes.len(),
            SceneCollection::Indexed(scenes) => scenes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn assemble_keyed(tour: &TourAggregate) -> KeyedScenes {
    tour.tour_images
        .iter()
        .map(|image| (image.name.clone(), build_scene(image, project_hotspot)))
        .collect()
}

pub fn assemble_indexed(tour: &TourAggregate) -> Vec<BackendScene> {
    let logo = tour.project_logo.as_deref();
    tour.tour_images
        .iter()
        .map(|image| build_backend_scene(image, logo))
        .collect()
}

pub fn assemble(tour: &TourAggregate, projection: Projection) -> SceneCollection {
    match projection {
        Projection::Keyed => SceneCollection::Keyed(assemble_keyed(tour)),
        Projection::Indexed => SceneCollection::Indexed(assemble_indexed(tour)),
    }
}

/// Load a tour through `source` and assemble it.
///
/// Returns [`AssemblyError::NotFound`] when the tour does not exist; load
/// failures are passed through as [`AssemblyError::Repository`].
pub async fn assemble_tour<S>(
    source: &S,
    tour_id: DbId,
    projection: Projection,
) -> Result<SceneCollection, AssemblyError<S::Error>>
where
    S: TourAggregateSource + ?Sized,
{
    let tour = source
        .load_tour_aggregate(tour_id)
        .await
        .map_err(AssemblyError::Repository)?
        .ok_or(AssemblyError::NotFound(tour_id))?;

    Ok(assemble(&tour, projection))
}
