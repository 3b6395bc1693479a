// ==========================================
// Flight Roster - Configuration reader trait
// ==========================================
// Read side only. Implementor: ConfigManager (config_kv table)
// ==========================================

use async_trait::async_trait;
use std::error::Error;

/// Config Result alias
pub type ConfigResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

/// Demo passenger generation settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorSettings {
    pub seed: u64,
    /// Share of total seats booked, in [0, 1]
    pub occupancy_ratio: f64,
    /// Probability that a generated passenger flies business, in [0, 1]
    pub business_ratio: f64,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            seed: 42,
            occupancy_ratio: 0.85,
            business_ratio: 0.2,
        }
    }
}

#[async_trait]
pub trait RosterConfigReader: Send + Sync {
    /// Whether assembly fails without an eligible Senior pilot
    ///
    /// # Default
    /// - false
    async fn get_require_senior_pilot(&self) -> ConfigResult<bool>;

    /// Directory roster exports are written to
    ///
    /// # Default
    /// - "exports"
    async fn get_export_directory(&self) -> ConfigResult<String>;

    /// Demo passenger generator settings
    ///
    /// # Default
    /// - seed 42, occupancy 0.85, business 0.2
    async fn get_generator_settings(&self) -> ConfigResult<GeneratorSettings>;
}
