mod core;
mod outcome;

pub use self::core::*;
pub use outcome::*;
