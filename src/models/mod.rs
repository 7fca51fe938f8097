mod descriptor;
mod forms;
mod user;

pub use descriptor::Descriptor;
pub use forms::{DeleteForm, EnrollForm, MatchForm};
pub use user::{UserRecord, UserStore};
