pub mod capability;
pub mod compare;
