pub mod imagery;
pub mod writer;
