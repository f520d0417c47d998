pub mod config;

pub use config::{ForgeConfig, ProviderConfig};
