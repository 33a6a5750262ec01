pub mod report;

pub use crate::domain::doctor::Doctor;
pub use crate::domain::roster::{Roster, SortKey};
pub use crate::utils::error::Result;
