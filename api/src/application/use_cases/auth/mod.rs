pub mod login;
pub mod me;
pub mod password;
pub mod register;
pub mod reset_password;
