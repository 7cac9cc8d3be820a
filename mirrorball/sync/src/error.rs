use std::fmt;

/// Error returned by a [`PlaylistService`](crate::PlaylistService) or an
/// [`Authenticator`](crate::Authenticator), boxed so the sync layer stays
/// independent of the remote client.
pub type ServiceError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T> = std::result::Result<T, Error>;

/// Displays an error followed by each of its sources, separated by `: `.
pub struct ErrorChain<'a>(pub &'a (dyn std::error::Error + 'static));

impl fmt::Display for ErrorChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)?;
        let mut source = self.0.source();
        while let Some(cause) = source {
            write!(f, ": {}", cause)?;
            source = cause.source();
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to authenticate")]
    Authenticate { source: ServiceError },

    #[error("Failed to fetch the current user")]
    CurrentUser { source: ServiceError },

    #[error("Failed to list playlists of {owner} while looking for \"{title}\"")]
    ListPlaylists {
        owner: String,
        title: String,
        source: ServiceError,
    },

    #[error("Failed to list tracks of \"{title}\" ({id})")]
    ListTracks {
        id: String,
        title: String,
        source: ServiceError,
    },

    #[error("Unable to create playlist \"{title}\"")]
    CreatePlaylist { title: String, source: ServiceError },

    #[error("Playlist \"{title}\" was created but is missing from the listing")]
    NotFoundAfterCreate { title: String },

    #[error("Playlist \"{title}\" not found")]
    PlaylistNotFound { title: String },

    #[error(
        "Failed adding batch {batch}/{batches} to \"{title}\" ({id}), \
         {applied} tracks were added before it"
    )]
    AddTracks {
        id: String,
        title: String,
        batch: usize,
        batches: usize,
        applied: usize,
        source: ServiceError,
    },
}

/// Rejected configuration. The only error that is fatal to the process.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Playlist title must not be empty")]
    EmptyTitle,

    #[error("Partner playlist title must not be empty")]
    EmptyPartner,

    #[error("Cannot sync \"{0}\" into itself")]
    SamePlaylist(String),

    #[error("Interval must be at least one second")]
    ZeroInterval,

    #[error("Batch size must be between 1 and {max}, got {size}")]
    BatchSize { size: usize, max: usize },

    #[error("Unknown sync direction \"{0}\", expected \"one-way\" or \"bidirectional\"")]
    UnknownDirection(String),
}
