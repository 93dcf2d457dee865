pub mod day_row;
pub mod resource;
pub mod trade;
