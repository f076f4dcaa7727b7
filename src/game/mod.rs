pub mod settings;
pub mod stats_backend;
pub mod stats_manager;
