//! In-memory [`PlaylistService`] for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use crate::model::{PlaylistId, PlaylistItem, PlaylistRef, TrackId, UserId};
use crate::service::PlaylistService;

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct FakeError(pub String);

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    CurrentUser,
    ListPlaylists { offset: usize },
    ListTracks { playlist: String, offset: usize },
    CreatePlaylist { title: String, public: bool },
    AddTracks { playlist: String, tracks: Vec<String> },
}

struct Stored {
    playlist: PlaylistRef,
    entries: Vec<Option<String>>,
    listed: bool,
}

pub struct FakeService {
    user: UserId,
    playlists: RefCell<Vec<Stored>>,
    calls: RefCell<Vec<Call>>,
    hide_created: Cell<bool>,
    fail_list_playlists: Cell<bool>,
    fail_current_user: Cell<bool>,
    fail_create: Cell<bool>,
    failing_track_lists: RefCell<HashSet<String>>,
    failing_adds: RefCell<HashSet<usize>>,
    failing_destinations: RefCell<HashSet<String>>,
    adds: Cell<usize>,
}

impl FakeService {
    pub fn new(user: &str) -> Self {
        FakeService {
            user: user.into(),
            playlists: RefCell::new(Vec::new()),
            calls: RefCell::new(Vec::new()),
            hide_created: Cell::new(false),
            fail_list_playlists: Cell::new(false),
            fail_current_user: Cell::new(false),
            fail_create: Cell::new(false),
            failing_track_lists: RefCell::new(HashSet::new()),
            failing_adds: RefCell::new(HashSet::new()),
            failing_destinations: RefCell::new(HashSet::new()),
            adds: Cell::new(0),
        }
    }

    pub fn add_playlist(&self, title: &str, tracks: &[&str]) -> PlaylistId {
        let entries: Vec<Option<&str>> = tracks.iter().map(|id| Some(*id)).collect();
        self.add_playlist_entries(title, &entries)
    }

    pub fn add_playlist_entries(&self, title: &str, entries: &[Option<&str>]) -> PlaylistId {
        let mut playlists = self.playlists.borrow_mut();
        let id = PlaylistId::new(format!("pl-{}", playlists.len()));
        playlists.push(Stored {
            playlist: PlaylistRef {
                id: id.clone(),
                title: title.to_string(),
                owner: self.user.clone(),
            },
            entries: entries.iter().map(|e| e.map(str::to_string)).collect(),
            listed: true,
        });
        id
    }

    /// Track ids of the first playlist with this exact title.
    pub fn tracks_of(&self, title: &str) -> Vec<String> {
        self.playlists
            .borrow()
            .iter()
            .find(|stored| stored.playlist.title == title)
            .map(|stored| stored.entries.iter().flatten().cloned().collect())
            .unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Track lists of every add call, in order.
    pub fn added_batches(&self) -> Vec<Vec<String>> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::AddTracks { tracks, .. } => Some(tracks.clone()),
                _ => None,
            })
            .collect()
    }

    /// Created playlists never show up in the listing.
    pub fn hide_created_playlists(&self) {
        self.hide_created.set(true);
    }

    pub fn fail_list_playlists(&self) {
        self.fail_list_playlists.set(true);
    }

    pub fn fail_current_user(&self) {
        self.fail_current_user.set(true);
    }

    pub fn fail_create(&self) {
        self.fail_create.set(true);
    }

    /// Fails every track listing of the playlist with this title.
    pub fn fail_list_tracks(&self, title: &str) {
        self.failing_track_lists
            .borrow_mut()
            .insert(title.to_string());
    }

    /// Fails the `n`th add call (1-based) across the whole service.
    pub fn fail_add_call(&self, n: usize) {
        self.failing_adds.borrow_mut().insert(n);
    }

    /// Fails every add call targeting the playlist with this title.
    pub fn fail_adds_to(&self, title: &str) {
        self.failing_destinations
            .borrow_mut()
            .insert(title.to_string());
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl PlaylistService for FakeService {
    type Error = FakeError;

    fn current_user(&self) -> Result<UserId, FakeError> {
        self.record(Call::CurrentUser);
        if self.fail_current_user.get() {
            return Err(FakeError("token expired".into()));
        }
        Ok(self.user.clone())
    }

    fn list_playlists(
        &self,
        _owner: &UserId,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<PlaylistRef>, FakeError> {
        self.record(Call::ListPlaylists { offset });
        if self.fail_list_playlists.get() {
            return Err(FakeError("listing unavailable".into()));
        }
        Ok(self
            .playlists
            .borrow()
            .iter()
            .filter(|stored| stored.listed)
            .skip(offset)
            .take(limit)
            .map(|stored| stored.playlist.clone())
            .collect())
    }

    fn list_playlist_tracks(
        &self,
        playlist: &PlaylistId,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<PlaylistItem>, FakeError> {
        self.record(Call::ListTracks {
            playlist: playlist.to_string(),
            offset,
        });
        let playlists = self.playlists.borrow();
        let stored = playlists
            .iter()
            .find(|stored| &stored.playlist.id == playlist)
            .ok_or_else(|| FakeError(format!("no playlist {}", playlist)))?;
        if self
            .failing_track_lists
            .borrow()
            .contains(&stored.playlist.title)
        {
            return Err(FakeError("tracks unavailable".into()));
        }
        Ok(stored
            .entries
            .iter()
            .skip(offset)
            .take(limit)
            .map(|entry| PlaylistItem {
                track: entry.as_ref().map(|id| crate::model::TrackRef::new(id.as_str())),
            })
            .collect())
    }

    fn create_playlist(
        &self,
        _owner: &UserId,
        title: &str,
        public: bool,
    ) -> Result<PlaylistRef, FakeError> {
        self.record(Call::CreatePlaylist {
            title: title.to_string(),
            public,
        });
        if self.fail_create.get() {
            return Err(FakeError("quota exceeded".into()));
        }
        let id = self.add_playlist(title, &[]);
        let mut playlists = self.playlists.borrow_mut();
        let stored = playlists
            .iter_mut()
            .find(|stored| stored.playlist.id == id)
            .ok_or_else(|| FakeError("vanished".into()))?;
        stored.listed = !self.hide_created.get();
        Ok(stored.playlist.clone())
    }

    fn add_tracks(&self, playlist: &PlaylistId, tracks: &[TrackId]) -> Result<(), FakeError> {
        self.record(Call::AddTracks {
            playlist: playlist.to_string(),
            tracks: tracks.iter().map(|id| id.to_string()).collect(),
        });
        let n = self.adds.get() + 1;
        self.adds.set(n);

        let mut playlists = self.playlists.borrow_mut();
        let stored = playlists
            .iter_mut()
            .find(|stored| &stored.playlist.id == playlist)
            .ok_or_else(|| FakeError(format!("no playlist {}", playlist)))?;
        if self.failing_adds.borrow().contains(&n)
            || self
                .failing_destinations
                .borrow()
                .contains(&stored.playlist.title)
        {
            return Err(FakeError(format!("add call {} rejected", n)));
        }
        stored
            .entries
            .extend(tracks.iter().map(|id| Some(id.to_string())));
        Ok(())
    }
}
