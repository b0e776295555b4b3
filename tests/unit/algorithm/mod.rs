pub mod collision;
pub mod patience;
