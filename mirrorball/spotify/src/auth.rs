use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dirs::home_dir;
use ini::Ini;
use log::{debug, info, warn};
use reqwest::{blocking::Client as HttpClient, header};
use ring::rand::{SecureRandom, SystemRandom};

use playlist_sync::Authenticator;

use crate::callback;
use crate::client::Client;
use crate::error::{Error, Result};
use crate::models::{AccessAuth, ErrorBody, OAuthErrorBody};
use crate::{
    CALLBACK_PORT, REDIRECT_URI, RESPONSE_TYPE, SCOPE, SPOTIFY_AUTH_URL, SPOTIFY_BASE_URL,
    SPOTIFY_TOKEN_URL,
};

const SECTION: &str = "default";

/// Client id and secret of the registered Spotify application.
#[derive(Clone, Debug)]
pub struct AppCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl AppCredentials {
    /// Reads `SPOTIFY_CLIENT_ID` and `SPOTIFY_CLIENT_SECRET`.
    pub fn from_env() -> Result<Self> {
        let client_id =
            env::var("SPOTIFY_CLIENT_ID").map_err(|_| Error::MissingEnv("SPOTIFY_CLIENT_ID"))?;
        let client_secret = env::var("SPOTIFY_CLIENT_SECRET")
            .map_err(|_| Error::MissingEnv("SPOTIFY_CLIENT_SECRET"))?;
        Ok(AppCredentials {
            client_id,
            client_secret,
        })
    }

    fn basic_auth(&self) -> String {
        let credentials = format!(
            "{client_id}:{client_secret}",
            client_id = self.client_id,
            client_secret = self.client_secret
        );
        format!(
            "Basic {}",
            base64::encode_config(credentials, base64::STANDARD)
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Credentials {
    pub access_token: String,
    pub refresh_token: String,
}

/// INI file holding the user's tokens under a `[default]` section.
#[derive(Clone, Debug)]
pub struct CredentialsFile {
    path: PathBuf,
}

impl CredentialsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CredentialsFile { path: path.into() }
    }

    /// `~/.spotify/credentials`
    pub fn default_location() -> Result<Self> {
        let mut path = home_dir().ok_or(Error::NoHomeDirectory)?;
        path.push(".spotify");
        path.push("credentials");
        Ok(CredentialsFile::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Credentials> {
        let conf = Ini::load_from_file(&self.path)?;
        let refresh_token = conf
            .get_from(Some(SECTION), "refresh_token")
            .ok_or(Error::MissingCredential("refresh_token"))?;
        let access_token = conf
            .get_from(Some(SECTION), "access_token")
            .unwrap_or_default();
        Ok(Credentials {
            access_token: access_token.to_string(),
            refresh_token: refresh_token.to_string(),
        })
    }

    /// Writes both tokens, keeping whatever else the file holds.
    pub fn save(&self, credentials: &Credentials) -> Result<()> {
        let mut conf = if self.path.exists() {
            Ini::load_from_file(&self.path)?
        } else {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            Ini::new()
        };
        conf.with_section(Some(SECTION))
            .set("access_token", credentials.access_token.as_str())
            .set("refresh_token", credentials.refresh_token.as_str());
        conf.write_to_file(&self.path)?;
        Ok(())
    }
}

/// Obtains access tokens for the Web API.
pub struct SpotifyAuth {
    app: AppCredentials,
    credentials: CredentialsFile,
    http: HttpClient,
    token_url: String,
    api_url: String,
}

impl SpotifyAuth {
    pub fn new(app: AppCredentials, credentials: CredentialsFile) -> Self {
        SpotifyAuth::with_urls(app, credentials, SPOTIFY_TOKEN_URL, SPOTIFY_BASE_URL)
    }

    pub fn with_urls(
        app: AppCredentials,
        credentials: CredentialsFile,
        token_url: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Self {
        SpotifyAuth {
            app,
            credentials,
            http: HttpClient::new(),
            token_url: token_url.into(),
            api_url: api_url.into(),
        }
    }

    /// Exchanges the stored refresh token for a new access token and writes
    /// it back, along with the refresh token if Spotify rotated it.
    pub fn refresh_access_token(&self) -> Result<String> {
        let mut credentials = self.credentials.load()?;

        let body = form_urlencoded::Serializer::new(String::new())
            .append_pair("grant_type", "refresh_token")
            .append_pair("refresh_token", &credentials.refresh_token)
            .finish();
        let auth = self.request_token(body)?;

        credentials.access_token = auth.access_token;
        if let Some(rotated) = auth.refresh_token {
            credentials.refresh_token = rotated;
        }
        self.credentials.save(&credentials)?;
        debug!("Refreshed access token");

        Ok(credentials.access_token)
    }

    /// Interactive authorization code flow. Opens the consent page, waits for
    /// the redirect on the local callback and stores the resulting tokens.
    pub fn authorize(&self) -> Result<()> {
        let state = random_state()?;
        let url = authorize_url(&self.app.client_id, &state);

        match webbrowser::open(&url) {
            Ok(_) => info!("Waiting for authorization on {}", REDIRECT_URI),
            Err(e) => warn!("Unable to open a browser ({}), visit {} to continue", e, url),
        }
        let code = callback::wait_for_code(CALLBACK_PORT, state)?;

        let body = form_urlencoded::Serializer::new(String::new())
            .append_pair("grant_type", "authorization_code")
            .append_pair("code", code.trim())
            .append_pair("redirect_uri", REDIRECT_URI)
            .finish();
        let auth = self.request_token(body)?;
        let refresh_token = auth.refresh_token.ok_or(Error::NoRefreshToken)?;

        self.credentials.save(&Credentials {
            access_token: auth.access_token,
            refresh_token,
        })?;
        info!(
            "Successfully authenticated, credentials saved to {}",
            self.credentials.path().display()
        );
        Ok(())
    }

    fn request_token(&self, body: String) -> Result<AccessAuth> {
        let response = self
            .http
            .post(&self.token_url)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(header::AUTHORIZATION, self.app.basic_auth())
            .body(body)
            .send()?;
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                message: token_error_message(body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

impl Authenticator for SpotifyAuth {
    type Service = Client;
    type Error = Error;

    fn authenticate(&mut self) -> Result<Client> {
        let access_token = self.refresh_access_token()?;
        Ok(Client::with_base_url(self.api_url.as_str(), access_token))
    }
}

fn token_error_message(body: String) -> String {
    if let Ok(parsed) = serde_json::from_str::<OAuthErrorBody>(&body) {
        return parsed.message();
    }
    match serde_json::from_str::<ErrorBody>(&body) {
        Ok(parsed) => parsed.error.message,
        Err(_) => body,
    }
}

fn random_state() -> Result<String> {
    let mut bytes = [0; 32];
    SystemRandom::new()
        .fill(&mut bytes)
        .map_err(|_| Error::Random)?;
    Ok(base64::encode_config(bytes, base64::URL_SAFE_NO_PAD))
}

fn authorize_url(client_id: &str, state: &str) -> String {
    let params = form_urlencoded::Serializer::new(String::new())
        .append_pair("client_id", client_id)
        .append_pair("response_type", RESPONSE_TYPE)
        .append_pair("redirect_uri", REDIRECT_URI)
        .append_pair("scope", SCOPE)
        .append_pair("state", state)
        .append_pair("show_dialog", "false")
        .finish();

    format!(
        "{auth_url}?{params}",
        auth_url = SPOTIFY_AUTH_URL,
        params = params
    )
}
