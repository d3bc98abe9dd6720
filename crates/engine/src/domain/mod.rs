pub mod clock;
pub mod error;
pub mod location;
pub mod pipeline;
pub mod registry;
pub mod scan;
pub mod types;
pub mod verify;
