pub mod connection;
pub mod movie;
