// HTTP registry adapter - re-exports all public interfaces

mod constants;
mod url_validation;
mod client;

pub use constants::*;
pub use url_validation::*;
pub use client::*;
