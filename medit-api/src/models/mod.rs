pub mod contact;
pub mod conversation;
pub mod disease;
pub mod family;
pub mod report;
pub mod user;
