//! Engine module for `docargs`.
//! See the `docargs` crate documentation for the doc string convention and full details.
#![deny(missing_docs)]
mod api;
mod constant;
mod error;
mod matcher;
mod model;
mod parser;
mod pattern;
mod tokens;
mod ui;

pub use api::*;
pub use error::Error;
pub use model::Value;
pub use ui::*;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;

#[cfg(test)]
pub(crate) mod test {
    macro_rules! assert_contains {
        ($base:expr, $sub:expr) => {
            assert!(
                $base.contains($sub),
                "'{b}' does not contain '{s}'",
                b = $base,
                s = $sub,
            );
        };
    }

    pub(crate) use assert_contains;
}
