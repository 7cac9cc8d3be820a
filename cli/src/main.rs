use std::process;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use dotenv::dotenv;
use log::{error, info, warn};
use structopt::StructOpt;

use playlist_sync::{Config, ConfigError, Direction, ErrorChain, Scheduler};
use spotify::{AppCredentials, CredentialsFile, SpotifyAuth};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "mirrorball",
    about = "Keeps a backup of a Spotify playlist up to date."
)]
enum Command {
    /// Authorize the application against your Spotify account
    Auth,
    /// Sync forever, sleeping between passes
    Run(SyncOpt),
    /// Run a single sync pass and exit
    Once(SyncOpt),
}

#[derive(Debug, StructOpt)]
struct SyncOpt {
    /// Title of the playlist to back up
    #[structopt(short, long, env = "MIRRORBALL_TITLE")]
    title: String,

    /// Title of the backup playlist [default: "<title> (backup)"]
    #[structopt(short, long, env = "MIRRORBALL_PARTNER")]
    partner: Option<String>,

    /// "one-way" copies the playlist into its backup, "bidirectional" copies both ways
    #[structopt(short, long, default_value = "one-way", env = "MIRRORBALL_DIRECTION")]
    direction: Direction,

    /// Seconds between passes
    #[structopt(short, long, default_value = "300", env = "MIRRORBALL_INTERVAL")]
    interval: u64,

    /// Tracks per add request
    #[structopt(long, default_value = "50", env = "MIRRORBALL_BATCH_SIZE")]
    batch_size: usize,

    /// Create missing playlists as private
    #[structopt(long)]
    private: bool,
}

impl SyncOpt {
    fn into_config(self) -> Result<Config, ConfigError> {
        let config = Config {
            title: self.title,
            partner: self.partner,
            direction: self.direction,
            interval: Duration::from_secs(self.interval),
            batch_size: self.batch_size,
            public: !self.private,
        };
        config.validate()?;
        Ok(config)
    }
}

fn main() {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let code = match execute(Command::from_args()) {
        Ok(()) => exitcode::OK,
        Err(e) => {
            error!("{:#}", e);
            if e.is::<ConfigError>() {
                exitcode::USAGE
            } else if e.is::<spotify::Error>() {
                exitcode::CONFIG
            } else {
                exitcode::SOFTWARE
            }
        }
    };
    process::exit(code)
}

fn execute(command: Command) -> Result<()> {
    match command {
        Command::Auth => {
            let auth = authenticator()?;
            auth.authorize().context("Authorization failed")?;
        }
        Command::Run(opt) => {
            let config = opt.into_config()?;
            info!(
                "Syncing {:?} ({}) every {}s",
                config.title,
                config.direction,
                config.interval.as_secs()
            );
            let mut scheduler = Scheduler::new(authenticator()?, config);
            // Held for the life of the process so the loop never sees a stop.
            let (_keep_running, stop) = mpsc::channel();
            scheduler.run(&stop);
        }
        Command::Once(opt) => {
            let config = opt.into_config()?;
            let mut scheduler = Scheduler::new(authenticator()?, config);
            match scheduler.run_once() {
                Ok(report) if report.is_success() => {
                    info!("Done, {} tracks added", report.tracks_added())
                }
                Ok(report) => warn!(
                    "Done with {} failed direction(s), {} tracks added",
                    report.failures().count(),
                    report.tracks_added()
                ),
                Err(e) => error!("Pass skipped: {}", ErrorChain(&e)),
            }
        }
    }
    Ok(())
}

fn authenticator() -> Result<SpotifyAuth> {
    let app = AppCredentials::from_env()?;
    let credentials = CredentialsFile::default_location()?;
    Ok(SpotifyAuth::new(app, credentials))
}
