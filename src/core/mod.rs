//! # Core Application Logic
//!
//! This module contains Folio's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • rotator (typewriter) │
//!                    │  • chat (transcript)    │
//!                    │  • selection (hover)    │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`rotator`]: Typewriter role rotation for the hero banner
//! - [`chat`]: The streaming chat transcript
//! - [`selection`]: Hover selection shared by the journey map and legend
//! - [`content`]: Read-only portfolio data
//! - [`config`]: Config file, env and CLI resolution

pub mod action;
pub mod chat;
pub mod config;
pub mod content;
pub mod rotator;
pub mod selection;
pub mod state;
