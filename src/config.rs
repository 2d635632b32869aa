use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "phototagger.toml";
pub const ENV_PREFIX: &str = "PHOTOTAGGER";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TaggerConfig {
    pub upload_url: String,
    pub tagging_url: String,
    pub api_key: String,
    pub upload_field_name: String,
    pub upload_file_name: String,
    pub jpeg_quality: u8,
    /// Bytes handed to the transport per progress report.
    pub progress_chunk_size: usize,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            upload_url: "http://api.imagga.com/v1/content".to_string(),
            tagging_url: "http://api.imagga.com/v1/tagging".to_string(),
            api_key: String::new(),
            upload_field_name: "imagefile".to_string(),
            upload_file_name: "image.jpg".to_string(),
            jpeg_quality: 50,
            progress_chunk_size: 16 * 1024,
        }
    }
}

impl TaggerConfig {
    /// Layers an optional config file and `PHOTOTAGGER_*` environment
    /// variables over the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;
        let mut configuration: TaggerConfig = settings.try_deserialize()?;
        if configuration.progress_chunk_size == 0 {
            configuration.progress_chunk_size = TaggerConfig::default().progress_chunk_size;
        }
        Ok(configuration)
    }
}
