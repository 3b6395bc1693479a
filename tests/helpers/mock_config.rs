// ==========================================
// Mock configuration - in-memory RosterConfigReader
// ==========================================

use async_trait::async_trait;
use flight_roster::config::{ConfigResult, GeneratorSettings, RosterConfigReader};

#[derive(Debug, Clone)]
pub struct MockConfig {
    pub require_senior_pilot: bool,
    pub export_directory: String,
    pub generator: GeneratorSettings,
}

impl MockConfig {
    pub fn default() -> Self {
        Self {
            require_senior_pilot: false,
            export_directory: "exports".to_string(),
            generator: GeneratorSettings::default(),
        }
    }

    pub fn strict() -> Self {
        let mut config = Self::default();
        config.require_senior_pilot = true;
        config
    }

    pub fn exporting_to(dir: &str) -> Self {
        let mut config = Self::default();
        config.export_directory = dir.to_string();
        config
    }
}

#[async_trait]
impl RosterConfigReader for MockConfig {
    async fn get_require_senior_pilot(&self) -> ConfigResult<bool> {
        Ok(self.require_senior_pilot)
    }

    async fn get_export_directory(&self) -> ConfigResult<String> {
        Ok(self.export_directory.clone())
    }

    async fn get_generator_settings(&self) -> ConfigResult<GeneratorSettings> {
        Ok(self.generator)
    }
}
