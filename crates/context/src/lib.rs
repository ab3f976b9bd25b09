mod identity;
mod user;

pub use identity::Identity;
pub use user::AuthenticatedUser;
