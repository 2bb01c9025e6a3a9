//! Browser state module
//!
//! The externally observable presentation state and the machine that moves
//! between its variants.
//!
//! # Overview
//!
//! - `BrowserState` - `Idle | Loading | Ready | Refreshing | Error`
//! - `BrowserStateMachine` - applies controller outcomes, remembers the last
//!   good page, and publishes every change on a watch channel
//!
//! ```text
//! Idle ──► Loading ──► Ready ──► Refreshing ──► Ready
//!             │          │            │
//!             ▼          ▼            ▼
//!           Error      Loading      Error (keeps last Ready page)
//! ```

mod machine;
mod types;

pub use machine::BrowserStateMachine;
pub use types::{BrowserState, StateKind};
