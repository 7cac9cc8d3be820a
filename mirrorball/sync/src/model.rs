use std::collections::HashSet;
use std::fmt;
use std::iter::FromIterator;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                $name(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                $name::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                $name(id)
            }
        }
    };
}

id_type!(
    /// Identifier of a user on the remote service.
    UserId
);
id_type!(
    /// Opaque playlist identifier assigned by the remote service.
    PlaylistId
);
id_type!(
    /// Opaque track identifier. Two entries are the same track iff their ids are equal.
    TrackId
);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaylistRef {
    pub id: PlaylistId,
    pub title: String,
    pub owner: UserId,
}

impl PlaylistRef {
    /// Case-insensitive exact title comparison.
    pub fn has_title(&self, title: &str) -> bool {
        titles_match(&self.title, title)
    }
}

/// Compares titles under simple case folding, one character at a time.
/// Final sigma folds like any other sigma.
pub(crate) fn titles_match(a: &str, b: &str) -> bool {
    fn fold(c: char) -> impl Iterator<Item = char> {
        c.to_lowercase().map(|c| if c == 'ς' { 'σ' } else { c })
    }

    a.chars().flat_map(fold).eq(b.chars().flat_map(fold))
}

impl fmt::Display for PlaylistRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" ({})", self.title, self.id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackRef {
    pub id: TrackId,
}

impl TrackRef {
    pub fn new(id: impl Into<TrackId>) -> Self {
        TrackRef { id: id.into() }
    }
}

/// One entry of a playlist listing. Local files and tracks pulled from the
/// catalogue come back without an id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaylistItem {
    pub track: Option<TrackRef>,
}

impl PlaylistItem {
    pub fn track(id: impl Into<TrackId>) -> Self {
        PlaylistItem {
            track: Some(TrackRef::new(id)),
        }
    }

    pub fn unavailable() -> Self {
        PlaylistItem { track: None }
    }
}

/// Full contents of a playlist captured during one pass.
pub type TrackSnapshot = Vec<TrackRef>;

/// Tracks to add to a destination, in source order.
pub type SyncPlan = Vec<TrackRef>;

/// Membership set of track ids.
#[derive(Debug, Default)]
pub struct TrackIdSet(HashSet<TrackId>);

impl TrackIdSet {
    pub fn contains(&self, track: &TrackRef) -> bool {
        self.0.contains(&track.id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> FromIterator<&'a TrackRef> for TrackIdSet {
    fn from_iter<I: IntoIterator<Item = &'a TrackRef>>(iter: I) -> Self {
        TrackIdSet(iter.into_iter().map(|track| track.id.clone()).collect())
    }
}

/// A source playlist copied into a destination playlist, both named by title.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncPair {
    pub source: String,
    pub destination: String,
}

impl SyncPair {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        SyncPair {
            source: source.into(),
            destination: destination.into(),
        }
    }

    pub fn reversed(&self) -> Self {
        SyncPair {
            source: self.destination.clone(),
            destination: self.source.clone(),
        }
    }
}

impl fmt::Display for SyncPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" -> \"{}\"", self.source, self.destination)
    }
}

/// Outcome of one successfully synced direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncSummary {
    pub source: PlaylistRef,
    pub destination: PlaylistRef,
    pub destination_created: bool,
    pub source_tracks: usize,
    pub destination_tracks: usize,
    pub added: usize,
}
