pub mod extraction;
pub mod ordering;
