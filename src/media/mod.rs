pub mod age;
pub mod normalizer;
