pub mod pdf;
pub mod sheet;
pub mod user;
