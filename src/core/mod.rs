//! # Core Application Logic
//!
//! This module contains Luminary's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    └───────────┬─────────────┘
//!                                │
//!                    ┌───────────┴───────────┐
//!                    ▼                       ▼
//!             ┌────────────┐          ┌────────────┐
//!             │    TUI     │          │  Identity  │
//!             │  Adapter   │          │  Provider  │
//!             │ (ratatui)  │          │   (mock)   │
//!             └────────────┘          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`auth`]: Identity provider trait and the in-memory mock
//! - [`chats`]: Chats, messages, seed data and the search filter
//! - [`profile`]: User profile and the reserved-handle check
//! - [`settings`]: Display preferences
//! - [`i18n`]: UI strings per language
//! - [`config`]: `~/.luminary/config.toml` loading and resolution

pub mod action;
pub mod auth;
pub mod chats;
pub mod config;
pub mod i18n;
pub mod profile;
pub mod settings;
pub mod state;
