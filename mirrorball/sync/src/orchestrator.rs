use log::{error, info};

use crate::batch::{self, DEFAULT_BATCH_SIZE};
use crate::diff::diff;
use crate::error::{Error, ErrorChain, Result};
use crate::model::{PlaylistRef, SyncPair, SyncSummary, TrackSnapshot, UserId};
use crate::paginate::{self, TRACK_PAGE_SIZE};
use crate::resolve::PlaylistResolver;
use crate::service::PlaylistService;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyncOptions {
    pub batch_size: usize,
    /// Visibility of destination playlists that have to be created.
    pub public: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        SyncOptions {
            batch_size: DEFAULT_BATCH_SIZE,
            public: true,
        }
    }
}

/// Results of one pass, one entry per direction in the order they ran.
#[derive(Debug)]
pub struct PassReport {
    pub results: Vec<(SyncPair, Result<SyncSummary>)>,
}

impl PassReport {
    pub fn is_success(&self) -> bool {
        self.results.iter().all(|(_, result)| result.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&SyncPair, &Error)> {
        self.results
            .iter()
            .filter_map(|(pair, result)| result.as_ref().err().map(|e| (pair, e)))
    }

    pub fn tracks_added(&self) -> usize {
        self.results
            .iter()
            .filter_map(|(_, result)| result.as_ref().ok())
            .map(|summary| summary.added)
            .sum()
    }
}

/// Copies missing tracks between playlists of one user.
pub struct SyncOrchestrator<'a, S> {
    service: &'a S,
    options: SyncOptions,
}

impl<'a, S: PlaylistService> SyncOrchestrator<'a, S> {
    pub fn new(service: &'a S, options: SyncOptions) -> Self {
        SyncOrchestrator { service, options }
    }

    /// Adds every track of `source` missing from `destination`, creating
    /// `destination` when it does not exist. Nothing is ever removed.
    pub fn sync_one_way(
        &self,
        owner: &UserId,
        source: &str,
        destination: &str,
    ) -> Result<SyncSummary> {
        let resolver = PlaylistResolver::new(self.service, self.options.public);

        let source = resolver.require(owner, source)?;
        let resolved = resolver.resolve(owner, destination)?;
        let destination = resolved.playlist;

        let destination_tracks = self.snapshot(&destination)?;
        let source_tracks = self.snapshot(&source)?;

        let plan = diff(&source_tracks, &destination_tracks);
        let added = if plan.is_empty() {
            0
        } else {
            info!("Adding {} tracks from {} to {}", plan.len(), source, destination);
            batch::apply(self.service, &destination, &plan, self.options.batch_size)?
        };

        Ok(SyncSummary {
            source,
            destination,
            destination_created: resolved.created,
            source_tracks: source_tracks.len(),
            destination_tracks: destination_tracks.len(),
            added,
        })
    }

    /// `a` into `b`, then `b` into `a`. The second direction runs even when
    /// the first fails.
    pub fn sync_bidirectional(&self, owner: &UserId, a: &str, b: &str) -> PassReport {
        let forward = SyncPair::new(a, b);
        let backward = forward.reversed();
        self.run_pass(owner, &[forward, backward])
    }

    /// Runs each pair in order. A failing pair is logged and recorded, and
    /// the following pairs still run.
    pub fn run_pass(&self, owner: &UserId, pairs: &[SyncPair]) -> PassReport {
        let mut results = Vec::with_capacity(pairs.len());
        for pair in pairs {
            let result = self.sync_one_way(owner, &pair.source, &pair.destination);
            match &result {
                Ok(summary) if summary.added > 0 => {
                    info!("Synced {}: added {} tracks", pair, summary.added)
                }
                Ok(_) => info!("Synced {}: already up to date", pair),
                Err(e) => error!("Sync {} failed: {}", pair, ErrorChain(e)),
            }
            results.push((pair.clone(), result));
        }
        PassReport { results }
    }

    /// Current track list of a playlist, skipping entries without a track id.
    fn snapshot(&self, playlist: &PlaylistRef) -> Result<TrackSnapshot> {
        let items = paginate::fetch_all(TRACK_PAGE_SIZE, |offset, limit| {
            self.service
                .list_playlist_tracks(&playlist.id, offset, limit)
        })
        .map_err(|e| Error::ListTracks {
            id: playlist.id.to_string(),
            title: playlist.title.clone(),
            source: Box::new(e),
        })?;

        Ok(items.into_iter().filter_map(|item| item.track).collect())
    }
}
