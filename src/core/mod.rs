pub mod directory;
pub mod enrollment;
pub mod report;

pub use crate::domain::model::Student;
pub use crate::domain::ports::{RecordStore, StatusSource};
pub use crate::utils::error::Result;
