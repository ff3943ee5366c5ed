//! Fluent construction of validated instances: set named properties on a
//! builder, then build an instance that is checked for required and
//! non-nullable properties.

pub mod build;
pub mod error;
pub mod property;

pub use build::*;
pub use error::*;
pub use property::*;

pub use fluent_construction_macros::Buildable;
