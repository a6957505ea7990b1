pub mod models;
pub mod notebook;
