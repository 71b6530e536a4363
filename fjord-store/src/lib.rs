pub mod app_config;
pub mod loader;

pub use app_config::Config;
pub use loader::{load_csv_dir, load_dataset, load_json_bundle, StoreError};
