//! One-shot local server receiving the OAuth redirect.

use std::sync::Mutex;

use rocket::{get, routes, Shutdown, State};

use crate::error::{Error, Result};

enum Outcome {
    Code(String),
    StateMismatch,
}

struct Callback {
    state: String,
    outcome: Mutex<Option<Outcome>>,
}

#[get("/auth?<code>&<state>")]
fn authorized(
    code: String,
    state: String,
    callback: &State<Callback>,
    shutdown: Shutdown,
) -> &'static str {
    let (outcome, reply) = if state == callback.state {
        (
            Outcome::Code(code),
            "Authorized, you can close this window.",
        )
    } else {
        (Outcome::StateMismatch, "Authorization failed: state mismatch.")
    };

    if let Ok(mut slot) = callback.outcome.lock() {
        *slot = Some(outcome);
    }
    shutdown.notify();
    reply
}

/// Serves `/auth` on `port` until the first redirect arrives and returns the
/// authorization code it carried.
pub(crate) fn wait_for_code(port: u16, state: String) -> Result<String> {
    let figment = rocket::Config::figment()
        .merge(("port", port))
        .merge(("log_level", "off"));
    let rocket = rocket::custom(figment)
        .manage(Callback {
            state,
            outcome: Mutex::new(None),
        })
        .mount("/", routes![authorized]);

    let ignited =
        rocket::execute(rocket.launch()).map_err(|e| Error::Callback(e.to_string()))?;

    let outcome = ignited
        .state::<Callback>()
        .and_then(|callback| callback.outcome.lock().ok().and_then(|mut slot| slot.take()));
    match outcome {
        Some(Outcome::Code(code)) => Ok(code),
        Some(Outcome::StateMismatch) => Err(Error::InvalidOAuthState),
        None => Err(Error::Callback(
            "server stopped before the redirect arrived".into(),
        )),
    }
}
