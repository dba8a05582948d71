pub mod contacts;
pub mod conversations;
pub mod diseases;
pub mod family;
pub mod reports;
pub mod users;
