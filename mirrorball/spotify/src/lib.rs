mod auth;
mod callback;
mod client;
mod error;
mod models;

pub use auth::{AppCredentials, Credentials, CredentialsFile, SpotifyAuth};
pub use client::Client;
pub use error::{Error, Result};

// Constants
pub const SPOTIFY_BASE_URL: &str = "https://api.spotify.com/v1";
pub const SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const RESPONSE_TYPE: &str = "code";
const SCOPE: &str = "playlist-read-private playlist-modify-public playlist-modify-private";
const CALLBACK_PORT: u16 = 8000;
const REDIRECT_URI: &str = "http://localhost:8000/auth";
