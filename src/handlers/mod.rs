mod face;
mod users;

pub use face::{enroll, match_descriptor};
pub use users::{delete_user, list_users};
