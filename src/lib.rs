//! Import an office hierarchy into SQLite and answer "who shares this employee's office?"
//!
//! Layers, innermost first: [`domain`], [`application`], [`infrastructure`], [`cli`].

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
