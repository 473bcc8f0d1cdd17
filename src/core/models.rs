pub mod common;
pub mod question;
