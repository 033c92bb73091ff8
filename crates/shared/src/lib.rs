pub mod domain;
pub mod error;
pub mod fetch;
pub mod protocol;
