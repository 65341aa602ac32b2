pub mod connection;
pub mod documents;
pub mod ids;

pub use connection::Database;
