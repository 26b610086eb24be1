//! Minecraft Log Viewer (mclogview)
//!
//! TUI application for browsing Minecraft server logs and CoreProtect
//! lookup output, with a small catalog of keyboard macros.
//!
//! Pure Core / Impure Shell: `parser` and `state` never touch the terminal
//! or the filesystem; `source`, `macros` and `view` do.

pub mod config;
pub mod logging;
pub mod macros;
pub mod model;
pub mod parser;
pub mod source;
pub mod state;
pub mod view;

#[cfg(test)]
mod test_harness;
