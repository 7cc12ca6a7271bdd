//! Python source extractors.
//!
//! Both extractors take the file path and its content; neither touches the
//! filesystem. Output is ordered by line, then by discovery.

mod functions;
mod imports;
mod params;

pub use functions::extract_functions;
pub use imports::extract_imports;
pub use params::{Signature, parse_parameters, parse_signature};
