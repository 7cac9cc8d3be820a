use log::debug;
use reqwest::blocking::{Client as HttpClient, RequestBuilder};
use serde::de::DeserializeOwned;

use playlist_sync::{PlaylistId, PlaylistItem, PlaylistRef, PlaylistService, TrackId, UserId};

use crate::error::{Error, Result};
use crate::models::{AddTracks, ErrorBody, NewPlaylist, Page, PlaylistTrack, SimplePlaylist, User};
use crate::SPOTIFY_BASE_URL;

/// Blocking client for the parts of the Web API that playlist syncing uses.
pub struct Client {
    http: HttpClient,
    base_url: String,
    access_token: String,
}

impl Client {
    pub fn new(access_token: impl Into<String>) -> Self {
        Client::with_base_url(SPOTIFY_BASE_URL, access_token)
    }

    pub fn with_base_url(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Client {
            http: HttpClient::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        }
    }

    pub fn current_user(&self) -> Result<UserId> {
        let user: User = self.send(self.http.get(&self.url("/me")))?;
        Ok(user.id.into())
    }

    pub fn playlists(&self, user: &str, offset: usize, limit: usize) -> Result<Vec<PlaylistRef>> {
        let url = self.url(&format!("/users/{}/playlists", user));
        let page: Page<SimplePlaylist> = self.send(
            self.http
                .get(&url)
                .query(&[("limit", limit), ("offset", offset)]),
        )?;
        Ok(page.items.into_iter().map(PlaylistRef::from).collect())
    }

    pub fn playlist_tracks(
        &self,
        playlist_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<PlaylistItem>> {
        let url = self.url(&format!("/playlists/{}/tracks", playlist_id));
        let limit = limit.to_string();
        let offset = offset.to_string();
        let page: Page<PlaylistTrack> = self.send(self.http.get(&url).query(&[
            ("fields", "items(track(id))"),
            ("limit", limit.as_str()),
            ("offset", offset.as_str()),
        ]))?;
        Ok(page.items.into_iter().map(PlaylistItem::from).collect())
    }

    pub fn create_playlist(&self, user: &str, name: &str, public: bool) -> Result<PlaylistRef> {
        let url = self.url(&format!("/users/{}/playlists", user));
        let created: SimplePlaylist =
            self.send(self.http.post(&url).json(&NewPlaylist { name, public }))?;
        Ok(created.into())
    }

    /// Appends tracks by id. The API takes at most 100 per call.
    pub fn add_tracks(&self, playlist_id: &str, track_ids: &[TrackId]) -> Result<()> {
        let url = self.url(&format!("/playlists/{}/tracks", playlist_id));
        let body = AddTracks {
            uris: track_ids
                .iter()
                .map(|id| format!("spotify:track:{}", id))
                .collect(),
        };
        let _: serde_json::Value = self.send(self.http.post(&url).json(&body))?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.bearer_auth(&self.access_token).send()?;
        let status = response.status();
        debug!("{} {}", status, response.url());
        let body = response.text()?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ErrorBody>(&body) {
                Ok(parsed) => parsed.error.message,
                Err(_) => body,
            };
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

impl PlaylistService for Client {
    type Error = Error;

    fn current_user(&self) -> Result<UserId> {
        Client::current_user(self)
    }

    fn list_playlists(
        &self,
        owner: &UserId,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<PlaylistRef>> {
        self.playlists(owner.as_str(), offset, limit)
    }

    fn list_playlist_tracks(
        &self,
        playlist: &PlaylistId,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<PlaylistItem>> {
        self.playlist_tracks(playlist.as_str(), offset, limit)
    }

    fn create_playlist(&self, owner: &UserId, title: &str, public: bool) -> Result<PlaylistRef> {
        Client::create_playlist(self, owner.as_str(), title, public)
    }

    fn add_tracks(&self, playlist: &PlaylistId, tracks: &[TrackId]) -> Result<()> {
        Client::add_tracks(self, playlist.as_str(), tracks)
    }
}
