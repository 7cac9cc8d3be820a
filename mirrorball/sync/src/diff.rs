use crate::model::{SyncPlan, TrackIdSet, TrackRef};

/// Tracks of `source` whose id is absent from `destination`.
///
/// Source order is kept and so are repeats: a track listed twice in the
/// source and missing from the destination is planned twice.
pub fn diff(source: &[TrackRef], destination: &[TrackRef]) -> SyncPlan {
    let present: TrackIdSet = destination.iter().collect();

    source
        .iter()
        .filter(|track| !present.contains(track))
        .cloned()
        .collect()
}
