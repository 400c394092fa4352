mod loader;
mod types;

pub use loader::{ConfigLoader, ConfigSource, ConfigSources};
pub use types::LifequestConfig;
