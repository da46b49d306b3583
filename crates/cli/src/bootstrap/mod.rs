mod config;
mod logging;
mod services;

pub use config::load_config;
pub use logging::init_logging;
pub use services::build_lookup_service;
