//! Agents for Parley.
//!
//! `DataAgent` is the prompt-to-SQL translation pipeline; `ChatAgent` is the
//! raw streaming passthrough. Both consume the model/executor traits, so the
//! presentation layer stays free of error handling and wire details.

mod catalog;
mod chat;
mod data;
mod prompt;

pub use catalog::SchemaCatalog;
pub use chat::ChatAgent;
pub use data::DataAgent;
pub use prompt::build_instruction;
