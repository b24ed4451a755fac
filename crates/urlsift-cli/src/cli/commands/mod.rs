//! CLI command handlers. Each command is in its own file.

mod completions;
mod create_profile;
mod delete_import;
mod export;
mod imports;
mod list;
mod manpage;
mod normalize;
mod origin;
mod process;
mod profiles;
mod render;
mod stats;

pub use completions::run_completions;
pub use create_profile::run_create_profile;
pub use delete_import::run_delete_import;
pub use export::run_export;
pub use imports::run_imports;
pub use list::run_list;
pub use manpage::run_manpage;
pub use normalize::run_normalize;
pub use origin::run_origin;
pub use process::run_process;
pub use profiles::run_profiles;
pub use stats::run_stats;
