//! Backend logic behind the mock routes.
//!
//! ARCHITECTURE
//! ============
//! Services are synchronous and operate on the in-memory [`store::Store`];
//! route handlers own locking, JSON translation and socket I/O.

pub mod generate;
pub mod ingest;
pub mod store;
