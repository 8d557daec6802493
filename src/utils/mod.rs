pub mod log;
pub mod utils;
