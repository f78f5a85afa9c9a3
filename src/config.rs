//! Process configuration, read once at startup from the environment.
use crate::DEFAULT_PORT;
use crate::DEFAULT_USER;
use crate::sql::Origin;
use anyhow::Context;
use std::time::Duration;

/// Everything the surrounding service needs to build a loader.
#[derive(Debug, Clone)]
pub struct Config {
    /// Deployment name; part of the COPY role and the database name.
    pub environment: String,
    /// Bucket the data files arrive in.
    pub data_bucket: String,
    /// Bucket holding `<table>.csv` schema files.
    pub schema_bucket: String,
    /// Deadline for each file load.
    pub timeout: Option<Duration>,
    /// DEBUG-level logging.
    pub debug: bool,
    pub database: tokio_postgres::Config,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`Config::from_env`] over any variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .with_context(|| format!("{} undefined", name))
        };
        let environment = required("ENVIRONMENT_NAME")?;
        let data_bucket = required("DATA_BUCKET")?;
        let schema_bucket = required("SCHEMA_BUCKET")?;
        let timeout = match lookup("LOAD_TIMEOUT") {
            Some(s) => Some(parse_duration(&s).with_context(|| format!("invalid LOAD_TIMEOUT {:?}", s))?),
            None => None,
        };
        let debug = lookup("AWS_SAM_LOCAL").is_some_and(|v| v == "true")
            || lookup("DEBUG").is_some_and(|v| !v.is_empty())
            || lookup("debug").is_some_and(|v| !v.is_empty());
        let database = match lookup("DB_URL") {
            Some(url) => url.parse::<tokio_postgres::Config>().context("invalid DB_URL")?,
            None => {
                let port = match lookup("DB_PORT") {
                    Some(p) => p.parse::<u16>().with_context(|| format!("invalid DB_PORT {:?}", p))?,
                    None => DEFAULT_PORT,
                };
                let mut config = tokio_postgres::Config::new();
                config
                    .host(&required("DB_HOST")?)
                    .port(port)
                    .user(&lookup("DB_USER").unwrap_or_else(|| DEFAULT_USER.to_string()))
                    .password(required("DB_PASSWORD")?)
                    .dbname(&format!("data-loader-{}", environment));
                config
            }
        };
        Ok(Self {
            environment,
            data_bucket,
            schema_bucket,
            timeout,
            debug,
            database,
        })
    }

    pub fn origin(&self) -> Origin {
        Origin::new(&self.data_bucket, &self.environment)
    }
}

/// Parse duration string like "30s", "5m", "2h", "1d" into Duration.
fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    let (num, unit) = s.split_at(s.char_indices().last().map_or(0, |(i, _)| i));
    let value: u64 = num.parse().ok()?;
    let scale = match unit {
        "s" => 1,
        "m" => 60,
        "h" => 3600,
        "d" => 86400,
        _ => return None,
    };
    value.checked_mul(scale).map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    const BASE: [(&str, &str); 5] = [
        ("ENVIRONMENT_NAME", "dev"),
        ("DATA_BUCKET", "data"),
        ("SCHEMA_BUCKET", "schemas"),
        ("DB_HOST", "cluster.example.com"),
        ("DB_PASSWORD", "secret"),
    ];

    #[test]
    fn minimal_environment() {
        let config = config(&BASE).unwrap();
        assert_eq!(config.environment, "dev");
        assert_eq!(config.timeout, None);
        assert!(!config.debug);
        assert_eq!(config.database.get_dbname(), Some("data-loader-dev"));
        assert_eq!(config.database.get_ports(), &[5439u16]);
        assert_eq!(config.database.get_user(), Some("admin"));
        assert_eq!(config.origin(), Origin::new("data", "dev"));
    }

    #[test]
    fn missing_required_variable() {
        for skip in ["ENVIRONMENT_NAME", "DATA_BUCKET", "SCHEMA_BUCKET"] {
            let vars = BASE.iter().copied().filter(|(k, _)| *k != skip).collect::<Vec<_>>();
            let err = config(&vars).unwrap_err();
            assert_eq!(err.to_string(), format!("{} undefined", skip));
        }
    }

    #[test]
    fn empty_counts_as_missing() {
        let mut vars = BASE.to_vec();
        vars.push(("DATA_BUCKET", ""));
        assert!(config(&vars).is_err());
    }

    #[test]
    fn url_overrides_parts() {
        let vars = [
            ("ENVIRONMENT_NAME", "dev"),
            ("DATA_BUCKET", "data"),
            ("SCHEMA_BUCKET", "schemas"),
            ("DB_URL", "postgres://loader@localhost:5432/warehouse"),
        ];
        let config = config(&vars).unwrap();
        assert_eq!(config.database.get_dbname(), Some("warehouse"));
        assert_eq!(config.database.get_ports(), &[5432u16]);
    }

    #[test]
    fn debug_flags() {
        for flag in [("DEBUG", "1"), ("debug", "yes"), ("AWS_SAM_LOCAL", "true")] {
            let mut vars = BASE.to_vec();
            vars.push(flag);
            assert!(config(&vars).unwrap().debug, "{:?}", flag);
        }
        let mut vars = BASE.to_vec();
        vars.push(("AWS_SAM_LOCAL", "false"));
        assert!(!config(&vars).unwrap().debug);
    }

    #[test]
    fn timeout_parsed() {
        let mut vars = BASE.to_vec();
        vars.push(("LOAD_TIMEOUT", "5m"));
        assert_eq!(config(&vars).unwrap().timeout, Some(Duration::from_secs(300)));
        vars.push(("LOAD_TIMEOUT", "soon"));
        assert!(config(&vars).is_err());
    }

    #[test]
    fn durations() {
        assert_eq!(parse_duration("30s"), Some(Duration::from_secs(30)));
        assert_eq!(parse_duration("2h"), Some(Duration::from_secs(7200)));
        assert_eq!(parse_duration("1d"), Some(Duration::from_secs(86400)));
        assert_eq!(parse_duration("10"), None);
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("5µ"), None);
    }

    #[test]
    fn oversized_durations_rejected() {
        assert_eq!(parse_duration("300000000000000d"), None);
        assert_eq!(parse_duration("18446744073709551615h"), None);
        let mut vars = BASE.to_vec();
        vars.push(("LOAD_TIMEOUT", "300000000000000d"));
        assert!(config(&vars).is_err());
    }
}
