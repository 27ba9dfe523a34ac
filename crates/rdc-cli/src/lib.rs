//! Library side of the `rdc` command-line tool.

pub mod logging;
pub mod pipeline;
