use std::sync::mpsc::{Receiver, RecvTimeoutError};

use log::{error, info, warn};

use crate::config::Config;
use crate::error::{Error, ErrorChain, Result};
use crate::orchestrator::{PassReport, SyncOptions, SyncOrchestrator};
use crate::service::{Authenticator, PlaylistService};

/// Runs sync passes forever, one at a time, with a fixed sleep in between.
pub struct Scheduler<A> {
    authenticator: A,
    config: Config,
}

impl<A: Authenticator> Scheduler<A> {
    pub fn new(authenticator: A, config: Config) -> Self {
        Scheduler {
            authenticator,
            config,
        }
    }

    /// One iteration: authenticate, look up the current user and run every
    /// configured direction.
    ///
    /// Fails only when no pass could start. Failures of individual
    /// directions are in the returned report.
    pub fn run_once(&mut self) -> Result<PassReport> {
        let service = self
            .authenticator
            .authenticate()
            .map_err(|e| Error::Authenticate {
                source: Box::new(e),
            })?;
        let owner = service.current_user().map_err(|e| Error::CurrentUser {
            source: Box::new(e),
        })?;

        let options = SyncOptions {
            batch_size: self.config.batch_size,
            public: self.config.public,
        };
        let orchestrator = SyncOrchestrator::new(&service, options);
        Ok(orchestrator.run_pass(&owner, &self.config.pairs()))
    }

    /// Loops until `stop` receives a message or its sender is dropped,
    /// returning the number of passes attempted. A stop request is noticed
    /// during the sleep, so the pass in progress always finishes.
    ///
    /// No error ends the loop.
    pub fn run(&mut self, stop: &Receiver<()>) -> u64 {
        let mut passes = 0;
        loop {
            passes += 1;
            match self.run_once() {
                Ok(report) if report.is_success() => info!(
                    "Pass {} done, {} tracks added",
                    passes,
                    report.tracks_added()
                ),
                Ok(report) => warn!(
                    "Pass {} done with {} failed direction(s), {} tracks added",
                    passes,
                    report.failures().count(),
                    report.tracks_added()
                ),
                Err(e) => error!("Pass {} skipped: {}", passes, ErrorChain(&e)),
            }

            info!("Sleeping {}s", self.config.interval.as_secs());
            match stop.recv_timeout(self.config.interval) {
                Err(RecvTimeoutError::Timeout) => continue,
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        info!("Stopped after {} passes", passes);
        passes
    }
}
