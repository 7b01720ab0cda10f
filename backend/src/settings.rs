//! Server settings loaded via OrthoConfig.
//!
//! Values come from `COMPANION_*` environment variables, configuration files
//! and command-line flags, in OrthoConfig's usual precedence order.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_BIND_PORT: u16 = 8080;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Application settings for the HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "COMPANION")]
pub struct AppSettings {
    /// Interface to bind; all interfaces when unset.
    pub bind_host: Option<IpAddr>,
    /// TCP port to bind; 8080 when unset.
    pub bind_port: Option<u16>,
    /// PostgreSQL URL. Fixture adapters are wired when absent.
    pub database_url: Option<String>,
    /// Upper bound on pooled connections.
    pub pool_max_size: Option<u32>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = false)]
    pub run_migrations: bool,
}

impl AppSettings {
    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.bind_host.unwrap_or(DEFAULT_BIND_HOST),
            self.bind_port.unwrap_or(DEFAULT_BIND_PORT),
        )
    }

    /// Pool configuration, present only when a database URL is set.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        self.database_url.as_deref().map(|url| {
            PoolConfig::new(url)
                .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const KEYS: [&str; 5] = [
        "COMPANION_BIND_HOST",
        "COMPANION_BIND_PORT",
        "COMPANION_DATABASE_URL",
        "COMPANION_POOL_MAX_SIZE",
        "COMPANION_RUN_MIGRATIONS",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("companion-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_serve_fixtures_on_port_8080() {
        let _guard = lock_env(KEYS.map(|key| (key, None::<String>)));

        let settings = load_from_empty_args();

        assert_eq!(settings.bind_addr(), "0.0.0.0:8080".parse().expect("addr"));
        assert!(settings.pool_config().is_none());
        assert!(!settings.run_migrations);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("COMPANION_BIND_HOST", Some("127.0.0.1".to_owned())),
            ("COMPANION_BIND_PORT", Some("9000".to_owned())),
            (
                "COMPANION_DATABASE_URL",
                Some("postgres://localhost/companion".to_owned()),
            ),
            ("COMPANION_POOL_MAX_SIZE", Some("4".to_owned())),
            ("COMPANION_RUN_MIGRATIONS", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();

        assert_eq!(settings.bind_addr(), "127.0.0.1:9000".parse().expect("addr"));
        let pool = settings.pool_config().expect("pool config");
        assert_eq!(pool.database_url(), "postgres://localhost/companion");
        assert_eq!(pool.max_size(), 4);
        assert!(settings.run_migrations);
    }
}
