// Re-export all types so callers can use `domain::types::*`
// while the definitions stay split by concern.

pub use self::code::*;
pub use self::record::*;
pub use self::location::*;
pub use self::config::*;

// Module declarations
mod code;
mod record;
mod location;
mod config;
