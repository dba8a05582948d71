pub mod health;
#[allow(clippy::module_inception)]
pub mod router;

pub use router::create_app_router;
