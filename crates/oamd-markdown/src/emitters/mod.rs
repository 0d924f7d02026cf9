pub mod endpoints;
pub mod operation;
pub mod reference;
pub mod summary;
