//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (sockets, request effects) and
//! delegates rendering details to `components`.

pub mod chat;
pub mod documents;
pub mod import;
pub mod settings;
