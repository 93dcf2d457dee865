pub mod concurrency;
pub mod dates;
