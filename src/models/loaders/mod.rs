pub mod json_loader;
pub mod toml_loader;

pub use json_loader::load_extraction;
pub use toml_loader::{load_group_file, parse_group_file};
