#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    #[error("Spotify returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response body")]
    Json(#[from] serde_json::Error),

    #[error("Unable to read credentials")]
    Credentials(#[from] ini::Error),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("Missing {0} in credentials file, run the auth command first")]
    MissingCredential(&'static str),

    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Unable to locate the home directory")]
    NoHomeDirectory,

    #[error("Token response did not include a refresh token")]
    NoRefreshToken,

    #[error("Unable to generate a random state token")]
    Random,

    #[error("Invalid OAuth state parameter")]
    InvalidOAuthState,

    #[error("Authorization callback failed: {0}")]
    Callback(String),
}

pub type Result<T> = std::result::Result<T, Error>;
