//! Browser session module
//!
//! `Browser` is the surface a presentation layer talks to. It pairs the
//! pagination controller with a fetch gateway and a search query, and drives
//! overlapping fetches cooperatively on the caller's task.

mod session;

pub use session::Browser;
