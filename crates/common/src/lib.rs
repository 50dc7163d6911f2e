//! Common utilities and types shared across macdeploy crates.

pub mod error;
pub mod layout;

pub use error::{Error, Result};
pub use layout::BundleLayout;
