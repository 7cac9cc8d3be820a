use log::debug;

use crate::error::{Error, Result};
use crate::model::{PlaylistRef, TrackId, TrackRef};
use crate::service::PlaylistService;

/// Tracks per add call unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Largest batch the remote API accepts in one call.
pub const MAX_BATCH_SIZE: usize = 100;

/// Appends `plan` to `playlist` in consecutive batches of at most
/// `batch_size` tracks, one call per batch, strictly in order.
///
/// Stops at the first failing batch. Batches sent before it stay applied.
/// Returns the number of tracks added.
///
/// # Panics
///
/// Panics if `batch_size` is zero.
pub fn apply<S: PlaylistService>(
    service: &S,
    playlist: &PlaylistRef,
    plan: &[TrackRef],
    batch_size: usize,
) -> Result<usize> {
    assert!(batch_size > 0, "batch size must be positive");

    let batches = (plan.len() + batch_size - 1) / batch_size;
    let mut applied = 0;
    for (index, batch) in plan.chunks(batch_size).enumerate() {
        let ids: Vec<TrackId> = batch.iter().map(|track| track.id.clone()).collect();
        service
            .add_tracks(&playlist.id, &ids)
            .map_err(|e| Error::AddTracks {
                id: playlist.id.to_string(),
                title: playlist.title.clone(),
                batch: index + 1,
                batches,
                applied,
                source: Box::new(e),
            })?;
        applied += ids.len();
        debug!(
            "Added batch {}/{} ({} tracks) to {}",
            index + 1,
            batches,
            ids.len(),
            playlist
        );
    }

    Ok(applied)
}
