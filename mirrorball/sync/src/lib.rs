//! Keeps a destination playlist topped up with the tracks of a source
//! playlist on a remote music service.
//!
//! A pass resolves both playlists by title, snapshots their tracks, plans the
//! tracks missing from the destination and appends them in batches. Tracks
//! are never removed and nothing is remembered between passes.

mod batch;
mod config;
mod diff;
mod error;
mod model;
mod orchestrator;
mod paginate;
mod resolve;
mod scheduler;
mod service;

#[cfg(test)]
mod testing;

pub use batch::{apply as apply_plan, DEFAULT_BATCH_SIZE, MAX_BATCH_SIZE};
pub use config::{Config, Direction, BACKUP_SUFFIX, DEFAULT_INTERVAL_SECS};
pub use diff::diff;
pub use error::{ConfigError, Error, ErrorChain, Result, ServiceError};
pub use model::{
    PlaylistId, PlaylistItem, PlaylistRef, SyncPair, SyncPlan, SyncSummary, TrackId, TrackIdSet,
    TrackRef, TrackSnapshot, UserId,
};
pub use orchestrator::{PassReport, SyncOptions, SyncOrchestrator};
pub use paginate::{fetch_all, find_first, PLAYLIST_PAGE_SIZE, TRACK_PAGE_SIZE};
pub use resolve::{PlaylistResolver, Resolved};
pub use scheduler::Scheduler;
pub use service::{Authenticator, PlaylistService};
