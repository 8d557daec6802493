pub mod body;
pub mod client;
pub mod encoder;
pub mod error;
pub mod transport;
