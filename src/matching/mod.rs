pub mod matcher;

pub use matcher::{find_closest, Closest};
