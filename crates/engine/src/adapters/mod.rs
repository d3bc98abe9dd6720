#[cfg(feature = "http")]
pub mod http;
pub mod memory;
