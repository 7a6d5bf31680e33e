pub mod memorial;
pub mod message;
pub mod status;
pub mod training;
pub mod tribute;
pub mod viewer;
