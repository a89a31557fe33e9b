//! Plain (non-interactive) output

pub mod console;
