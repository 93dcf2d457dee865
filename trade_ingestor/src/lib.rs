pub mod aggregate;
pub mod decode;
pub mod discovery;
pub mod errors;
pub mod models;
pub mod providers;
