//! CLI command implementations.

pub(crate) mod date;
pub(crate) mod export;
pub(crate) mod rename;

pub(crate) use date::DateArgs;
pub(crate) use export::ExportArgs;
pub(crate) use rename::RenameArgs;
