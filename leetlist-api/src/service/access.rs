use tracing::{debug, warn};

use super::{can_view, find_existing, ListStore};
use crate::utils::ListError;
use leetlist_types::ListDetail;

/// Fetches a list and its questions on behalf of `requester`.
///
/// Private lists are only returned to their owner; anyone else, anonymous
/// requesters included, gets [`ListError::Forbidden`].
pub async fn get_list<S: ListStore>(
    store: &mut S,
    id: i32,
    requester: Option<&str>,
) -> Result<ListDetail, ListError> {
    let list = find_existing(store, id).await?;
    if !can_view(&list, requester) {
        warn!(id, ?requester, "private list requested by non-owner");
        return Err(ListError::Forbidden);
    }

    let questions = store.list_questions(id).await?;
    debug!(id, questions = questions.len(), "list loaded");

    Ok(ListDetail {
        question_list: list.into(),
        questions: questions.into_iter().map(Into::into).collect(),
    })
}
