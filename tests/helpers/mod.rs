// ==========================================
// Shared helpers for integration tests
// ==========================================

#![allow(dead_code)]

pub mod mock_config;
pub mod test_data_builder;
