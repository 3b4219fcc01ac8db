use core_config::{
    AppInfo, FromEnv, app_info, cors::CorsConfig, env_optional, env_or_default,
    server::ServerConfig,
};
use database::mongodb::MongoConfig;
use domain_workshop::AdminSecret;

pub use core_config::Environment;

/// Tenant used when `WORKSHOP_TENANT_ID` is not set
pub const DEFAULT_TENANT_ID: &str = "workshop";

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub mongodb: MongoConfig,
    /// Fixed tenant every document lives under (`workshop/{tenant_id}`)
    pub tenant_id: String,
    pub admin: AdminSecret,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let cors = CorsConfig::from_env()?;
        let mongodb = MongoConfig::from_env()?;

        let admin = AdminSecret::from_values(
            env_optional("ADMIN_PASSWORD_HASH"),
            env_optional("ADMIN_PASSWORD"),
        );

        Ok(Self {
            app: app_info!(),
            environment,
            server,
            cors,
            mongodb,
            tenant_id: env_or_default("WORKSHOP_TENANT_ID", DEFAULT_TENANT_ID),
            admin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 7] = [
        "APP_ENV",
        "WORKSHOP_TENANT_ID",
        "ADMIN_PASSWORD_HASH",
        "ADMIN_PASSWORD",
        "MONGODB_URL",
        "MONGO_URL",
        "PORT",
    ];

    #[test]
    fn test_defaults() {
        temp_env::with_vars(VARS.map(|key| (key, None::<&str>)), || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.tenant_id, DEFAULT_TENANT_ID);
            assert_eq!(config.environment, Environment::Development);
            assert!(!config.admin.is_configured());
            assert_eq!(config.app.name, "workshop_api");
        });
    }

    #[test]
    fn test_admin_hash_wins_over_plain_password() {
        temp_env::with_vars(
            [
                ("ADMIN_PASSWORD_HASH", Some("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA")),
                ("ADMIN_PASSWORD", Some("plain")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert!(matches!(config.admin, AdminSecret::Hashed(_)));
            },
        );
    }

    #[test]
    fn test_tenant_and_environment_from_env() {
        temp_env::with_vars(
            [("WORKSHOP_TENANT_ID", Some("acme")), ("APP_ENV", Some("production"))],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.tenant_id, "acme");
                assert!(config.environment.use_https());
            },
        );
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        temp_env::with_var("PORT", Some("not-a-port"), || {
            assert!(Config::from_env().is_err());
        });
    }
}
