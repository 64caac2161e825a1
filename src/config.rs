use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;
use url::Url;

const DEFAULT_GENERATOR_TIMEOUT_SECS: u64 = 120;
const DEFAULT_MAX_UPLOAD_MB: usize = 20;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub generator_base_url: Url,
    pub generator_timeout_secs: u64,
    pub max_upload_mb: usize,
    pub json_logs: bool,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            generator_base_url: get_env_parse("GENERATOR_BASE_URL")?,
            generator_timeout_secs: get_env_parse_or(
                "GENERATOR_TIMEOUT_SECS",
                DEFAULT_GENERATOR_TIMEOUT_SECS,
            )?,
            max_upload_mb: get_env_parse_or("MAX_UPLOAD_MB", DEFAULT_MAX_UPLOAD_MB)?,
            json_logs: env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        })
    }

    /// Config pointing at an explicit generator, with defaults for everything else.
    pub fn for_generator(generator_base_url: Url) -> Self {
        Self {
            server_address: "127.0.0.1:0".to_string(),
            generator_base_url,
            generator_timeout_secs: DEFAULT_GENERATOR_TIMEOUT_SECS,
            max_upload_mb: DEFAULT_MAX_UPLOAD_MB,
            json_logs: false,
        }
    }

    /// `{GENERATOR_BASE_URL}/generate-questions`; a path prefix on the base is kept.
    pub fn generate_questions_url(&self) -> Result<Url> {
        let mut base = self.generator_base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(base.join("generate-questions")?)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse<T>(name: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = get_env(name)?;
    raw.parse()
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(_) => get_env_parse(name),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> Result<&'static Config> {
    CONFIG
        .get()
        .ok_or_else(|| Error::Config("Configuration has not been initialized".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate_url(base: &str) -> String {
        Config::for_generator(Url::parse(base).unwrap())
            .generate_questions_url()
            .unwrap()
            .to_string()
    }

    #[test]
    fn generate_url_keeps_the_base_path() {
        assert_eq!(
            generate_url("https://quiz.example.com/some/prefix"),
            "https://quiz.example.com/some/prefix/generate-questions"
        );
        assert_eq!(
            generate_url("https://quiz.example.com/quiz/"),
            "https://quiz.example.com/quiz/generate-questions"
        );
        assert_eq!(
            generate_url("http://localhost:5000"),
            "http://localhost:5000/generate-questions"
        );
    }

    #[test]
    fn upload_limit_is_in_megabytes() {
        let mut config = Config::for_generator(Url::parse("http://localhost:5000").unwrap());
        config.max_upload_mb = 2;
        assert_eq!(config.max_upload_bytes(), 2 * 1024 * 1024);
    }
}
