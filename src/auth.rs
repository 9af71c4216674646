//! OAuth client-credentials token lifecycle for carrier APIs.

pub mod token;
pub mod token_manager;

pub use token::*;
pub use token_manager::*;
