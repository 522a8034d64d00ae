pub mod branches;
pub mod home;
pub mod not_found;
pub mod offers;
