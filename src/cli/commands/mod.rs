//! CLI command implementations

pub mod check;
pub mod config;
pub mod list;
pub mod show;
pub mod update;

pub use check::execute as check;
pub use config::execute as config;
pub use list::execute as list;
pub use show::execute as show;
pub use update::execute as update;
