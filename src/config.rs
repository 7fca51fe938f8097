use serde::Deserialize;
use std::path::PathBuf;

const MODEL_BASE_URL: &str = "https://github.com/vladmandic/face-api/raw/master/model";

const DEFAULT_MODEL_FILES: [&str; 7] = [
    "face_landmark_68_model-weights_manifest.json",
    "face_landmark_68_model-shard1",
    "face_recognition_model-weights_manifest.json",
    "face_recognition_model-shard1",
    "face_recognition_model-shard2",
    "tiny_face_detector_model-weights_manifest.json",
    "tiny_face_detector_model-shard1",
];

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub matching: MatchingConfig,
    pub static_files: StaticFilesConfig,
    pub models: ModelsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_body_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub data_file: PathBuf,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct MatchingConfig {
    /// Maximum distance at which a probe is accepted as a known user.
    pub match_threshold: f64,
    /// Maximum distance at which an enrollment is treated as a face that
    /// is already registered under another name.
    pub duplicate_threshold: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StaticFilesConfig {
    pub dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelsConfig {
    pub dir: PathBuf,
    pub urls: Vec<String>,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            match_threshold: 0.5,
            duplicate_threshold: 0.5,
        }
    }
}

pub fn default_model_urls() -> Vec<String> {
    DEFAULT_MODEL_FILES
        .iter()
        .map(|file| format!("{}/{}", MODEL_BASE_URL, file))
        .collect()
}

impl Config {
    /// Defaults, then `config/default.*` if present, then `APP__SECTION__KEY`
    /// environment variables. `PORT` wins over everything for the port.
    pub fn load() -> Result<Self, config::ConfigError> {
        let matching = MatchingConfig::default();

        let mut builder = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000_i64)?
            .set_default("server.max_body_bytes", 100 * 1024_i64)?
            .set_default("storage.data_file", "users.json")?
            .set_default("matching.match_threshold", matching.match_threshold)?
            .set_default("matching.duplicate_threshold", matching.duplicate_threshold)?
            .set_default("static_files.dir", "public")?
            .set_default("models.dir", "public/models")?
            .set_default("models.urls", default_model_urls())?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"));

        if let Ok(port) = std::env::var("PORT") {
            builder = builder.set_override("server.port", port)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_urls_point_at_face_api_models() {
        let urls = default_model_urls();
        assert_eq!(urls.len(), 7);
        assert!(urls.iter().all(|u| u.starts_with(MODEL_BASE_URL)));
        assert!(urls[0].ends_with("/face_landmark_68_model-weights_manifest.json"));
    }

    #[test]
    fn thresholds_share_a_default() {
        let matching = MatchingConfig::default();
        assert_eq!(matching.match_threshold, 0.5);
        assert_eq!(matching.duplicate_threshold, matching.match_threshold);
    }
}
