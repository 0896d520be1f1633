//! Application state modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each module is a plain struct with synchronous transition methods. The app
//! root wraps them in `RwSignal`s and provides them through context; socket
//! handlers and views mutate them with `update`. Keeping the transitions
//! signal-free lets them be unit tested natively.

pub mod chat;
pub mod connection;
pub mod documents;
pub mod ingest;
pub mod query_cache;
pub mod settings;
pub mod ui;
