//! Rust code generation modules.

pub mod database;
pub mod enums;
pub mod idents;
pub mod records;
pub mod types;

pub use database::DatabaseGenerator;
pub use enums::EnumGenerator;
pub use idents::check_identifiers;
pub use records::RecordGenerator;
pub use types::TypeMapper;
