pub mod bucket;
pub mod catalog;
pub mod result;
