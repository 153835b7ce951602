//! Small parsing and validation helpers shared by services.

pub mod parse;
pub mod validate;
