//! Player settings: starting mode and volume, audio monitor tick, key
//! steps, the now-playing label and where logs go.
//!
//! Settings come from `config.toml` with `RECITAL__SECTION__KEY` environment
//! overrides; see `Settings::load`.

mod load;
mod schema;

pub use schema::*;

#[cfg(test)]
mod tests;
