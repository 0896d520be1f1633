//! Networking modules for REST calls and the two streaming sockets.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` wraps every backend endpoint, `socket` owns the shared websocket
//! lifecycle, `chat_socket` and `ingest_socket` translate inbound frames into
//! state transitions, and `upload` slices drafts into batch frames.

pub mod api;
pub mod chat_socket;
pub mod ingest_socket;
pub mod socket;
pub mod upload;
