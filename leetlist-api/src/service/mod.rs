//! Visibility and ownership rules over lists.
//!
//! Every operation checks, in this order: the list exists (`NotFound`), the
//! requester may see or change it (`Forbidden`), the request is well formed
//! (`ValidationError`). A missing list therefore never reveals whether it
//! would have been forbidden.

pub mod access;
pub mod mutation;

use crate::utils::{DatabaseError, ListError};
use leetlist_types::list::db::QuestionList;
use leetlist_types::question::db::QuestionWithTags;

/// Storage the list services run against.
#[rocket::async_trait]
pub trait ListStore: Send {
    async fn find_list(&mut self, id: i32) -> Result<Option<QuestionList>, DatabaseError>;

    async fn list_questions(&mut self, id: i32) -> Result<Vec<QuestionWithTags>, DatabaseError>;

    /// `None` when the list no longer exists.
    async fn set_private(
        &mut self,
        id: i32,
        private: bool,
    ) -> Result<Option<QuestionList>, DatabaseError>;

    /// Renames the list and replaces its questions atomically. `None` when
    /// the list no longer exists.
    async fn replace_contents(
        &mut self,
        id: i32,
        name: &str,
        question_ids: &[i32],
    ) -> Result<Option<QuestionList>, DatabaseError>;

    /// Removes the list and its memberships atomically.
    async fn remove_list(&mut self, id: i32) -> Result<(), DatabaseError>;
}

pub fn is_owner(list: &QuestionList, requester: Option<&str>) -> bool {
    requester == Some(list.username.as_str())
}

pub fn can_view(list: &QuestionList, requester: Option<&str>) -> bool {
    !list.private || is_owner(list, requester)
}

async fn find_existing<S: ListStore>(store: &mut S, id: i32) -> Result<QuestionList, ListError> {
    store.find_list(id).await?.ok_or(ListError::NotFound)
}

async fn find_owned<S: ListStore>(
    store: &mut S,
    id: i32,
    requester: Option<&str>,
) -> Result<QuestionList, ListError> {
    let list = find_existing(store, id).await?;
    if !is_owner(&list, requester) {
        tracing::warn!(id, ?requester, owner = %list.username, "not the list owner");
        return Err(ListError::Forbidden);
    }
    Ok(list)
}

pub const MAX_NAME_LEN: usize = 128;
pub const MAX_QUESTIONS: usize = 500;

/// Checks the name and questions of a list being created or saved.
pub fn validate_contents(name: &str, question_ids: &[i32]) -> Result<(), ListError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ListError::ValidationError("name is empty".to_string()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ListError::ValidationError(format!(
            "name is longer than {MAX_NAME_LEN} characters"
        )));
    }
    if question_ids.len() > MAX_QUESTIONS {
        return Err(ListError::ValidationError(format!(
            "more than {MAX_QUESTIONS} questions"
        )));
    }
    let mut seen = std::collections::HashSet::with_capacity(question_ids.len());
    if let Some(dup) = question_ids.iter().find(|id| !seen.insert(**id)) {
        return Err(ListError::ValidationError(format!(
            "question {dup} appears more than once"
        )));
    }
    Ok(())
}

/// Unknown question ids surface as foreign key violations.
pub fn unknown_questions(e: DatabaseError) -> ListError {
    match e {
        DatabaseError::ViolationError() => {
            ListError::ValidationError("unknown question in list".to_string())
        }
        e => ListError::Storage(e),
    }
}
