//! Pure helpers behind the sprig standard library.
//!
//! Nothing here knows about script values; the runtime converts arguments
//! into plain Rust types, calls into these modules, and wraps the results.

pub mod math;
pub mod seq;
pub mod string;
