// ==========================================
// Flight Roster - Configuration layer
// ==========================================
// Storage: config_kv table, global scope
// ==========================================

pub mod config_manager;
pub mod roster_config_trait;

pub use config_manager::{config_keys, ConfigManager};
pub use roster_config_trait::{ConfigResult, GeneratorSettings, RosterConfigReader};
