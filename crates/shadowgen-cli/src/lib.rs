//! shadowgen-cli - Manifest loading, Java emission and commands for the
//! `shadowgen` binary

pub mod check;
pub mod codegen;
pub mod generate;
pub mod logging;
pub mod manifest;
