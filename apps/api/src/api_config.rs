use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use aegis_core::AppError;
use tracing_subscriber::EnvFilter;

const DEFAULT_API_PORT: u16 = 3050;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub bootstrap_admins: Vec<String>,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());
        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = match env::var("API_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .map_err(|error| AppError::Validation(format!("invalid API_PORT: {error}")))?,
            Err(_) => DEFAULT_API_PORT,
        };
        let bootstrap_admins = env::var("AEGIS_BOOTSTRAP_ADMINS")
            .map(|value| parse_subject_list(value.as_str()))
            .unwrap_or_default();

        Ok(Self {
            frontend_url,
            api_host,
            api_port,
            bootstrap_admins,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn parse_subject_list(value: &str) -> Vec<String> {
    let mut subjects: Vec<String> = Vec::new();
    for subject in value.split(',').map(str::trim).filter(|value| !value.is_empty()) {
        if !subjects.iter().any(|stored| stored == subject) {
            subjects.push(subject.to_owned());
        }
    }
    subjects
}
