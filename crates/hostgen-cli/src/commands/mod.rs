pub mod generate;
pub mod records;
