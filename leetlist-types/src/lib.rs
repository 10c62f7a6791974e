pub mod list;
pub mod question;
pub mod tag;

#[cfg(feature = "diesel")]
pub mod schema;

#[cfg(feature = "diesel")]
pub use schema::*;

// Re-export for convenience
pub use list::{CreateList, ListDetail, ListSort, ModifyList, Page, QuestionList, SaveList};
pub use question::{CreateQuestion, Question};
pub use tag::{QuestionTag, Tag};
