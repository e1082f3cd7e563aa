use crate::domain::model::Student;
use crate::utils::error::Result;

/// Whole-collection persistence for the directory.
pub trait RecordStore {
    /// `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<Vec<Student>>>;
    /// Replaces everything previously stored.
    fn save(&self, students: &[Student]) -> Result<()>;
    fn location(&self) -> String;
}

/// Supplies the enrollment flag a newly constructed candidate starts with.
pub trait StatusSource {
    fn initial_status(&mut self) -> bool;
}

impl<T: StatusSource + ?Sized> StatusSource for Box<T> {
    fn initial_status(&mut self) -> bool {
        (**self).initial_status()
    }
}
