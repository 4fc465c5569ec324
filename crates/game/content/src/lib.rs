//! Static catalog data for the cultivation world.
//!
//! `game-content` owns the realm ladder, boss catalog, equipment set tables,
//! achievements, and technique tables as plain serde data. The compiled-in
//! [`builtin`] bundle is the default world; [`loaders`] reads replacement
//! catalogs from RON files. The runtime wraps a [`ContentBundle`] into the
//! oracle implementations `game-core` consumes.

mod builtin;
mod catalog;
pub mod loaders;

pub use builtin::builtin;
pub use catalog::ContentBundle;
