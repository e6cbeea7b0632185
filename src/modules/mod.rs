pub mod health;
pub mod lessons;
pub mod subjects;

pub use self::lessons::model::Lesson;
pub use self::subjects::model::Subject;
