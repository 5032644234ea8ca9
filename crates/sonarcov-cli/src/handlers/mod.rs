//! Command handlers - extracted from main.rs for testability

pub mod canonicalize;
pub mod export;
pub mod plugin;

pub use canonicalize::{canonicalize_all, execute_canonicalize};
pub use export::{build_export_config, execute_export, merge_inputs};
pub use plugin::{execute_check_arg, execute_info, plugin_info};
