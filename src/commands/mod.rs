//! Command implementations

pub mod archive;
pub mod base;
pub mod get;
pub mod parse_url;
pub mod push;
pub mod rm_dirs;
pub mod sha;
pub mod validators;

pub use archive::ArchiveCommand;
pub use base::{Command, CommandContext};
pub use get::GetCommand;
pub use parse_url::ParseUrlCommand;
pub use push::PushCommand;
pub use rm_dirs::RmDirsCommand;
pub use sha::ShaCommand;
