use log::{debug, info};

use crate::error::{Error, Result};
use crate::model::{PlaylistRef, UserId};
use crate::paginate::{self, PLAYLIST_PAGE_SIZE};
use crate::service::PlaylistService;

/// Result of [`PlaylistResolver::resolve`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolved {
    pub playlist: PlaylistRef,
    pub created: bool,
}

/// Looks playlists up by title among a user's playlists.
pub struct PlaylistResolver<'a, S> {
    service: &'a S,
    public: bool,
}

impl<'a, S: PlaylistService> PlaylistResolver<'a, S> {
    /// `public` decides the visibility of playlists created by [`resolve`](Self::resolve).
    pub fn new(service: &'a S, public: bool) -> Self {
        PlaylistResolver { service, public }
    }

    /// First playlist in listing order whose title matches, ignoring case.
    pub fn find(&self, owner: &UserId, title: &str) -> Result<Option<PlaylistRef>> {
        paginate::find_first(
            PLAYLIST_PAGE_SIZE,
            |offset, limit| self.service.list_playlists(owner, offset, limit),
            |playlist| playlist.has_title(title),
        )
        .map_err(|e| Error::ListPlaylists {
            owner: owner.to_string(),
            title: title.to_string(),
            source: Box::new(e),
        })
    }

    /// Like [`find`](Self::find) but a missing playlist is an error.
    pub fn require(&self, owner: &UserId, title: &str) -> Result<PlaylistRef> {
        self.find(owner, title)?.ok_or_else(|| Error::PlaylistNotFound {
            title: title.to_string(),
        })
    }

    /// Finds the playlist, creating it when absent.
    ///
    /// After a create the playlist is looked up again and that listing entry
    /// is returned, not the object the create call answered with.
    pub fn resolve(&self, owner: &UserId, title: &str) -> Result<Resolved> {
        if let Some(playlist) = self.find(owner, title)? {
            debug!("Found {}", playlist);
            return Ok(Resolved {
                playlist,
                created: false,
            });
        }

        let created = self
            .service
            .create_playlist(owner, title, self.public)
            .map_err(|e| Error::CreatePlaylist {
                title: title.to_string(),
                source: Box::new(e),
            })?;
        info!("Created {}", created);

        match self.find(owner, title)? {
            Some(playlist) => Ok(Resolved {
                playlist,
                created: true,
            }),
            None => Err(Error::NotFoundAfterCreate {
                title: title.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, FakeService};

    fn creates(service: &FakeService) -> usize {
        service
            .calls()
            .iter()
            .filter(|call| matches!(call, Call::CreatePlaylist { .. }))
            .count()
    }

    #[test]
    fn existing_playlist_is_never_created() {
        let service = FakeService::new("me");
        service.add_playlist("Road Trip (backup)", &["a"]);
        let resolver = PlaylistResolver::new(&service, true);

        let first = resolver.resolve(&"me".into(), "road trip (BACKUP)").unwrap();
        let second = resolver.resolve(&"me".into(), "Road Trip (backup)").unwrap();

        assert!(!first.created);
        assert_eq!(first, second);
        assert_eq!(creates(&service), 0);
    }

    #[test]
    fn missing_playlist_is_created_once_then_looked_up() {
        let service = FakeService::new("me");
        let resolver = PlaylistResolver::new(&service, false);

        let resolved = resolver.resolve(&"me".into(), "Road Trip (backup)").unwrap();

        assert!(resolved.created);
        assert_eq!(resolved.playlist.title, "Road Trip (backup)");
        assert_eq!(creates(&service), 1);
        assert_eq!(
            service.calls().last(),
            Some(&Call::ListPlaylists { offset: 0 })
        );
        assert!(service
            .calls()
            .contains(&Call::CreatePlaylist {
                title: "Road Trip (backup)".into(),
                public: false,
            }));

        let again = resolver.resolve(&"me".into(), "Road Trip (backup)").unwrap();
        assert!(!again.created);
        assert_eq!(again.playlist, resolved.playlist);
        assert_eq!(creates(&service), 1);
    }

    #[test]
    fn lookup_pages_through_the_listing() {
        let service = FakeService::new("me");
        for i in 0..45 {
            service.add_playlist(&format!("Playlist {}", i), &[]);
        }
        let resolver = PlaylistResolver::new(&service, true);

        let found = resolver.find(&"me".into(), "playlist 42").unwrap();

        assert_eq!(found.map(|p| p.title), Some("Playlist 42".to_string()));
        assert_eq!(
            service.calls(),
            vec![
                Call::ListPlaylists { offset: 0 },
                Call::ListPlaylists { offset: 20 },
                Call::ListPlaylists { offset: 40 },
            ]
        );
    }

    #[test]
    fn created_playlist_missing_from_listing_is_an_error() {
        let service = FakeService::new("me");
        service.hide_created_playlists();
        let resolver = PlaylistResolver::new(&service, true);

        let err = resolver.resolve(&"me".into(), "Ghost").unwrap_err();

        assert!(matches!(err, Error::NotFoundAfterCreate { ref title } if title == "Ghost"));
        assert_eq!(creates(&service), 1);
    }

    #[test]
    fn listing_failure_names_the_title() {
        let service = FakeService::new("me");
        service.fail_list_playlists();
        let resolver = PlaylistResolver::new(&service, true);

        let err = resolver.resolve(&"me".into(), "Mix").unwrap_err();

        assert!(matches!(err, Error::ListPlaylists { ref title, .. } if title == "Mix"));
        assert_eq!(creates(&service), 0);
    }

    #[test]
    fn create_failure_names_the_title() {
        let service = FakeService::new("me");
        service.fail_create();
        let resolver = PlaylistResolver::new(&service, true);

        let err = resolver.resolve(&"me".into(), "Mix (backup)").unwrap_err();

        assert!(
            matches!(err, Error::CreatePlaylist { ref title, .. } if title == "Mix (backup)")
        );
        // No lookup after a failed create.
        assert_eq!(
            service.calls(),
            vec![
                Call::ListPlaylists { offset: 0 },
                Call::CreatePlaylist {
                    title: "Mix (backup)".into(),
                    public: true,
                },
            ]
        );
    }

    #[test]
    fn finds_titles_that_differ_in_final_sigma() {
        let service = FakeService::new("me");
        service.add_playlist("ΟΔΟΣ (backup)", &[]);
        let resolver = PlaylistResolver::new(&service, true);

        let resolved = resolver.resolve(&"me".into(), "οδοσ (backup)").unwrap();

        assert!(!resolved.created);
        assert_eq!(resolved.playlist.title, "ΟΔΟΣ (backup)");
        assert_eq!(creates(&service), 0);
    }

    #[test]
    fn require_reports_missing_source() {
        let service = FakeService::new("me");
        let resolver = PlaylistResolver::new(&service, true);

        let err = resolver.require(&"me".into(), "Nowhere").unwrap_err();

        assert!(matches!(err, Error::PlaylistNotFound { ref title } if title == "Nowhere"));
    }
}
