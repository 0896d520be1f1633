//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render view chrome and panels. Those that read shared state
//! take it from Leptos context; user actions are reported through callbacks
//! so the owning page decides which requests to issue.

pub mod chat_messages;
pub mod document_detail;
pub mod document_list;
pub mod file_row;
pub mod nav_bar;
pub mod rag_config_editor;
pub mod ui;
pub mod vector_view;
