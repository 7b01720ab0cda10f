//! Parsers for the session toggles.
//!
//! Debug builds replace a missing or malformed toggle with its default and
//! log the problem. Release builds return the error.

use actix_web::cookie::SameSite;
use mockable::Env;
use tracing::warn;

use super::{BuildMode, SAMESITE_ENV, SessionConfigError};

const FLAG_VALUES: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_VALUES: &str = "Strict|Lax|None";

/// Fall back to `default` in debug builds, fail otherwise.
pub(super) fn tolerate<T>(
    mode: BuildMode,
    default: T,
    error: SessionConfigError,
) -> Result<T, SessionConfigError> {
    if mode.is_debug() {
        warn!(%error, "session setting replaced by its development default");
        Ok(default)
    } else {
        Err(error)
    }
}

/// Boolean environment toggle with a development default.
pub(super) struct Toggle {
    name: &'static str,
    default: bool,
}

impl Toggle {
    pub(super) const fn new(name: &'static str, default: bool) -> Self {
        Self { name, default }
    }

    pub(super) fn read<E: Env>(&self, env: &E, mode: BuildMode) -> Result<bool, SessionConfigError> {
        let Some(raw) = env.string(self.name) else {
            return tolerate(
                mode,
                self.default,
                SessionConfigError::MissingEnv { name: self.name },
            );
        };
        match parse_flag(&raw) {
            Some(flag) => Ok(flag),
            None => tolerate(
                mode,
                self.default,
                SessionConfigError::InvalidEnv {
                    name: self.name,
                    value: raw,
                    expected: FLAG_VALUES,
                },
            ),
        }
    }
}

/// Parse a `SameSite` policy. `None` is only honoured for secure cookies.
pub(super) fn parse_same_site(
    raw: String,
    mode: BuildMode,
    cookie_secure: bool,
    default: SameSite,
) -> Result<SameSite, SessionConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "strict" => Ok(SameSite::Strict),
        "lax" => Ok(SameSite::Lax),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" => tolerate(mode, SameSite::None, SessionConfigError::InsecureSameSiteNone),
        _ => tolerate(
            mode,
            default,
            SessionConfigError::InvalidEnv {
                name: SAMESITE_ENV,
                value: raw,
                expected: SAMESITE_VALUES,
            },
        ),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
