pub mod home;
pub mod interactions;
pub mod not_found;
