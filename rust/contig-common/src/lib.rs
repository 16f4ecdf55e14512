//! Common definitions (errors and results) relied upon by all contig-* crates.

pub mod error;
pub mod result;

pub use error::{Error, ErrorKind};
pub use result::Result;
