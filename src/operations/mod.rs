pub mod offset;
pub mod query;
