pub mod cases;
pub mod connection;
pub mod seed;
pub mod sites;
pub mod users;
