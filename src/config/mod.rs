mod settings;

pub use settings::{ApiSettings, LoggingConfig, Settings};
