//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the conversational orchestration — which pipeline
//! calls run, in what order, against which session state — so route
//! handlers can stay focused on protocol translation and session plumbing.

pub mod chat;
pub mod dashboard;
