pub mod guide;
pub mod home;
pub mod upload;
