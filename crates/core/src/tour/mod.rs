//! Tour scene-graph assembly.
//!
//! Turns a fully-loaded tour aggregate (tour -> tour images -> hotspots, with
//! each hotspot's optional link target and icon already resolved by the
//! repository) into the renderer-ready scene collection served to viewers and
//! to the authoring dashboard.
//!
//! This module does NOT depend on the database crate. The repository layer
//! implements [`TourAggregateSource`]; everything below the load is a pure,
//! synchronous transformation:
//!
//! - [`references`] -- optional link/icon references to display tuples.
//! - [`hotspot`] -- hotspot projection and positional order.
//! - [`scene`] -- one tour image to one scene record.
//! - [`assembly`] -- keyed and indexed scene collections.

pub mod aggregate;
pub mod assembly;
pub mod hotspot;
pub mod references;
pub mod scene;

#[cfg(test)]
pub(crate) mod fixtures;

use async_trait::async_trait;

use crate::types::DbId;

pub use aggregate::{HotspotIcon, HotspotNode, LinkedTourImage, TourAggregate, TourImageNode};
pub use assembly::{assemble, assemble_tour, Projection, SceneCollection};

/// Failure modes of [`assemble_tour`].
///
/// Missing optional references are never an error; they project to `null`.
#[derive(Debug, thiserror::Error)]
pub enum AssemblyError<E>
where
    E: std::error::Error + 'static,
{
    /// No tour with the requested id exists.
    #[error("Tour with id {0} not found")]
    NotFound(DbId),

    /// The aggregate load failed. Surfaced unchanged, never retried.
    #[error(transparent)]
    Repository(E),
}

/// Loads a tour with its images, hotspots, link targets and icons in one
/// consistent snapshot.
///
/// Implementations must return tour images in display order and each image's
/// hotspots in a stable order; hotspot `order` values are derived from that
/// sequence.
#[async_trait]
pub trait TourAggregateSource: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn load_tour_aggregate(
        &self,
        tour_id: DbId,
    ) -> Result<Option<TourAggregate>, Self::Error>;
}
