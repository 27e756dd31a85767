pub mod gateway;
pub mod memory;
pub mod models;
pub mod postgres;

pub use gateway::{Connector, DatabaseError, PostGateway};
pub use memory::MemoryConnector;
pub use models::{NewPost, Post};
pub use postgres::PgConnector;
