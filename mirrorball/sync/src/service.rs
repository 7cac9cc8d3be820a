use crate::model::{PlaylistId, PlaylistItem, PlaylistRef, TrackId, UserId};

/// Operations the sync core needs from an authenticated music service client.
///
/// Every call is blocking and is issued one at a time. Implementations must
/// not retry: failures go straight back to the caller, which decides.
pub trait PlaylistService {
    type Error: std::error::Error + Send + Sync + 'static;

    fn current_user(&self) -> Result<UserId, Self::Error>;

    /// One page of the playlists visible to `owner`, in listing order.
    fn list_playlists(
        &self,
        owner: &UserId,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<PlaylistRef>, Self::Error>;

    /// One page of entries of a playlist, in playlist order.
    fn list_playlist_tracks(
        &self,
        playlist: &PlaylistId,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<PlaylistItem>, Self::Error>;

    fn create_playlist(
        &self,
        owner: &UserId,
        title: &str,
        public: bool,
    ) -> Result<PlaylistRef, Self::Error>;

    /// Appends `tracks` to the playlist. Callers never pass more than the
    /// configured batch size.
    fn add_tracks(&self, playlist: &PlaylistId, tracks: &[TrackId]) -> Result<(), Self::Error>;
}

impl<'a, S: PlaylistService + ?Sized> PlaylistService for &'a S {
    type Error = S::Error;

    fn current_user(&self) -> Result<UserId, Self::Error> {
        (**self).current_user()
    }

    fn list_playlists(
        &self,
        owner: &UserId,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<PlaylistRef>, Self::Error> {
        (**self).list_playlists(owner, offset, limit)
    }

    fn list_playlist_tracks(
        &self,
        playlist: &PlaylistId,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<PlaylistItem>, Self::Error> {
        (**self).list_playlist_tracks(playlist, offset, limit)
    }

    fn create_playlist(
        &self,
        owner: &UserId,
        title: &str,
        public: bool,
    ) -> Result<PlaylistRef, Self::Error> {
        (**self).create_playlist(owner, title, public)
    }

    fn add_tracks(&self, playlist: &PlaylistId, tracks: &[TrackId]) -> Result<(), Self::Error> {
        (**self).add_tracks(playlist, tracks)
    }
}

/// Produces a freshly authenticated [`PlaylistService`] for each pass.
pub trait Authenticator {
    type Service: PlaylistService;
    type Error: std::error::Error + Send + Sync + 'static;

    fn authenticate(&mut self) -> Result<Self::Service, Self::Error>;
}
