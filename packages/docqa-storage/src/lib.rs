pub mod db;
pub mod documents;
pub mod history;
pub mod models;
pub mod outbox;
pub mod schema;
pub mod vector;

mod error;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;
