pub mod employee;
pub mod entry;
