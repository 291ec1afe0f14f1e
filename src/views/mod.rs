pub mod form;
pub mod overview;
pub mod result;
