pub mod contact;
pub mod conversation;
pub mod disease;
pub mod family;
pub mod report;
pub mod user;

pub use contact::ContactRepository;
pub use conversation::ConversationRepository;
pub use disease::DiseaseRepository;
pub use family::FamilyRepository;
pub use report::ReportRepository;
pub use user::UserRepository;
