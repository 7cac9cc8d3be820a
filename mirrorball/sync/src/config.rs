use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::batch::{DEFAULT_BATCH_SIZE, MAX_BATCH_SIZE};
use crate::error::ConfigError;
use crate::model::{titles_match, SyncPair};

/// Seconds between passes unless configured otherwise.
pub const DEFAULT_INTERVAL_SECS: u64 = 300;

/// Appended to the playlist title to name its backup.
pub const BACKUP_SUFFIX: &str = " (backup)";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Copy the playlist into its partner.
    OneWay,
    /// Copy each playlist into the other.
    Bidirectional,
}

impl FromStr for Direction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "one-way" | "oneway" | "backup" => Ok(Direction::OneWay),
            "bidirectional" | "both" => Ok(Direction::Bidirectional),
            _ => Err(ConfigError::UnknownDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::OneWay => f.write_str("one-way"),
            Direction::Bidirectional => f.write_str("bidirectional"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub title: String,
    /// Defaults to the title with [`BACKUP_SUFFIX`].
    pub partner: Option<String>,
    pub direction: Direction,
    pub interval: Duration,
    pub batch_size: usize,
    /// Visibility of playlists this tool creates.
    pub public: bool,
}

impl Config {
    pub fn new(title: impl Into<String>) -> Self {
        Config {
            title: title.into(),
            partner: None,
            direction: Direction::OneWay,
            interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
            batch_size: DEFAULT_BATCH_SIZE,
            public: true,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::EmptyTitle);
        }
        if let Some(partner) = &self.partner {
            if partner.trim().is_empty() {
                return Err(ConfigError::EmptyPartner);
            }
        }
        if titles_match(&self.partner_title(), &self.title) {
            return Err(ConfigError::SamePlaylist(self.title.clone()));
        }
        if self.interval < Duration::from_secs(1) {
            return Err(ConfigError::ZeroInterval);
        }
        if self.batch_size == 0 || self.batch_size > MAX_BATCH_SIZE {
            return Err(ConfigError::BatchSize {
                size: self.batch_size,
                max: MAX_BATCH_SIZE,
            });
        }
        Ok(())
    }

    pub fn partner_title(&self) -> String {
        match &self.partner {
            Some(partner) => partner.clone(),
            None => format!("{}{}", self.title, BACKUP_SUFFIX),
        }
    }

    /// Directions to run in one pass, in order.
    pub fn pairs(&self) -> Vec<SyncPair> {
        let forward = SyncPair::new(self.title.clone(), self.partner_title());
        match self.direction {
            Direction::OneWay => vec![forward],
            Direction::Bidirectional => {
                let backward = forward.reversed();
                vec![forward, backward]
            }
        }
    }
}
