use serde::{Deserialize, Serialize};

use playlist_sync::{PlaylistItem, PlaylistRef, TrackRef};

#[derive(Deserialize)]
pub(crate) struct Page<T> {
    pub items: Vec<T>,
}

#[derive(Deserialize)]
pub(crate) struct User {
    pub id: String,
}

#[derive(Deserialize)]
pub(crate) struct SimplePlaylist {
    pub id: String,
    pub name: String,
    pub owner: User,
}

impl From<SimplePlaylist> for PlaylistRef {
    fn from(playlist: SimplePlaylist) -> Self {
        PlaylistRef {
            id: playlist.id.into(),
            title: playlist.name,
            owner: playlist.owner.id.into(),
        }
    }
}

// Local files and episodes come back with a null id, unavailable tracks with
// a null track.
#[derive(Deserialize)]
pub(crate) struct PlaylistTrack {
    pub track: Option<TrackObject>,
}

#[derive(Deserialize)]
pub(crate) struct TrackObject {
    pub id: Option<String>,
}

impl From<PlaylistTrack> for PlaylistItem {
    fn from(entry: PlaylistTrack) -> Self {
        PlaylistItem {
            track: entry.track.and_then(|track| track.id).map(TrackRef::new),
        }
    }
}

#[derive(Serialize)]
pub(crate) struct NewPlaylist<'a> {
    pub name: &'a str,
    pub public: bool,
}

#[derive(Serialize)]
pub(crate) struct AddTracks {
    pub uris: Vec<String>,
}

#[derive(Deserialize)]
pub(crate) struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Deserialize)]
pub(crate) struct ErrorDetail {
    pub message: String,
}

// Error shape of the accounts service token endpoint.
#[derive(Deserialize)]
pub(crate) struct OAuthErrorBody {
    pub error: String,
    pub error_description: Option<String>,
}

impl OAuthErrorBody {
    pub fn message(self) -> String {
        match self.error_description {
            Some(description) => format!("{}: {}", self.error, description),
            None => self.error,
        }
    }
}

#[derive(Deserialize)]
pub(crate) struct AccessAuth {
    pub access_token: String,
    pub refresh_token: Option<String>,
}
