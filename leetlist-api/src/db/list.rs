use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection as Connection, RunQueryDsl};
use itertools::Itertools;

use super::question::{get_questions_with_tags, Question, QuestionWithTags};
use super::{contains_pattern, keyword, Paging};
use crate::service::ListStore;
use crate::utils::DatabaseError;
use leetlist_types::list::ListSort;
use leetlist_types::schema::{list_questions, question_lists, questions};
pub use leetlist_types::list::db::{ListQuestion, NewQuestionList, QuestionList};

pub async fn get_list(conn: &mut Connection, id: i32) -> Result<Option<QuestionList>, DatabaseError> {
    Ok(question_lists::table
        .find(id)
        .select(QuestionList::as_select())
        .first(conn)
        .await
        .optional()?)
}

/// Questions of a list in list order, each with its tags.
pub async fn get_list_questions(
    conn: &mut Connection,
    list_id: i32,
) -> Result<Vec<QuestionWithTags>, DatabaseError> {
    let questions = list_questions::table
        .inner_join(questions::table)
        .filter(list_questions::list_id.eq(list_id))
        .order_by((list_questions::position.asc(), list_questions::question_id.asc()))
        .select(Question::as_select())
        .load::<Question>(conn)
        .await?;

    get_questions_with_tags(conn, questions).await
}

async fn insert_members(
    conn: &mut Connection,
    list_id: i32,
    question_ids: &[i32],
) -> Result<(), DatabaseError> {
    if question_ids.is_empty() {
        return Ok(());
    }
    let members = question_ids
        .iter()
        .enumerate()
        .map(|(position, &question_id)| ListQuestion {
            list_id,
            question_id,
            position: position as i32,
        })
        .collect_vec();

    diesel::insert_into(list_questions::table)
        .values(&members)
        .execute(conn)
        .await
        .map_err(|e| DatabaseError::classify(e, "list_questions"))?;
    Ok(())
}

/// Creates a list owned by `username` holding `question_ids` in that order.
pub async fn create_list(
    conn: &mut Connection,
    new: NewQuestionList<'_>,
    question_ids: &[i32],
) -> Result<QuestionList, DatabaseError> {
    conn.transaction::<_, DatabaseError, _>(|conn| {
        async move {
            let list = diesel::insert_into(question_lists::table)
                .values(&new)
                .returning(QuestionList::as_returning())
                .get_result(conn)
                .await
                .map_err(|e| DatabaseError::classify(e, "question_lists"))?;

            insert_members(conn, list.id, question_ids).await?;
            Ok(list)
        }
        .scope_boxed()
    })
    .await
}

/// Returns `None` when the list is gone.
pub async fn set_private(
    conn: &mut Connection,
    id: i32,
    private: bool,
) -> Result<Option<QuestionList>, DatabaseError> {
    use diesel::dsl::now;

    Ok(diesel::update(question_lists::table.find(id))
        .set((
            question_lists::private.eq(private),
            question_lists::updated_at.eq(now),
        ))
        .returning(QuestionList::as_returning())
        .get_result(conn)
        .await
        .optional()?)
}

/// Renames a list and replaces its questions in one transaction. Returns
/// `None` and touches nothing when the list is gone.
pub async fn replace_contents(
    conn: &mut Connection,
    id: i32,
    name: &str,
    question_ids: &[i32],
) -> Result<Option<QuestionList>, DatabaseError> {
    use diesel::dsl::now;

    conn.transaction::<_, DatabaseError, _>(|conn| {
        async move {
            let list = diesel::update(question_lists::table.find(id))
                .set((
                    question_lists::name.eq(name),
                    question_lists::updated_at.eq(now),
                ))
                .returning(QuestionList::as_returning())
                .get_result(conn)
                .await
                .optional()?;
            let Some(list) = list else {
                return Ok(None);
            };

            diesel::delete(list_questions::table.filter(list_questions::list_id.eq(id)))
                .execute(conn)
                .await?;
            insert_members(conn, id, question_ids).await?;
            Ok(Some(list))
        }
        .scope_boxed()
    })
    .await
}

/// Deletes a list with its memberships. Returns the number of lists removed.
pub async fn delete_list(conn: &mut Connection, id: i32) -> Result<usize, DatabaseError> {
    conn.transaction::<_, DatabaseError, _>(|conn| {
        async move {
            diesel::delete(list_questions::table.filter(list_questions::list_id.eq(id)))
                .execute(conn)
                .await?;
            Ok(diesel::delete(question_lists::table.find(id))
                .execute(conn)
                .await?)
        }
        .scope_boxed()
    })
    .await
}

#[derive(Debug, Clone, Default)]
pub struct ListFilter<'a> {
    /// Every list of this owner, private ones included. Public lists of
    /// everyone when absent.
    pub owner: Option<&'a str>,
    pub search: Option<&'a str>,
    pub sort: ListSort,
}

fn filtered_lists<'a>(filter: &ListFilter<'a>) -> question_lists::BoxedQuery<'a, diesel::pg::Pg> {
    let mut builder = question_lists::table.into_boxed();
    builder = match filter.owner {
        Some(owner) => builder.filter(question_lists::username.eq(owner)),
        None => builder.filter(question_lists::private.eq(false)),
    };
    if let Some(k) = keyword(filter.search) {
        builder = builder.filter(question_lists::name.ilike(contains_pattern(k)));
    }
    builder
}

/// Returns one page of lists and the number of all matches.
pub async fn search_lists(
    conn: &mut Connection,
    filter: &ListFilter<'_>,
    paging: Paging,
) -> Result<(Vec<QuestionList>, i64), DatabaseError> {
    let total = filtered_lists(filter)
        .count()
        .get_result::<i64>(conn)
        .await?;

    let builder = filtered_lists(filter).select(QuestionList::as_select());
    let builder = match filter.sort {
        ListSort::New => builder
            .order_by(question_lists::created_at.desc())
            .then_order_by(question_lists::id.desc()),
        ListSort::Old => builder
            .order_by(question_lists::created_at.asc())
            .then_order_by(question_lists::id.asc()),
    };
    let lists = builder
        .offset(paging.offset())
        .limit(paging.limit)
        .load::<QuestionList>(conn)
        .await?;

    Ok((lists, total))
}

#[rocket::async_trait]
impl ListStore for Connection {
    async fn find_list(&mut self, id: i32) -> Result<Option<QuestionList>, DatabaseError> {
        get_list(self, id).await
    }

    async fn list_questions(&mut self, id: i32) -> Result<Vec<QuestionWithTags>, DatabaseError> {
        get_list_questions(self, id).await
    }

    async fn set_private(
        &mut self,
        id: i32,
        private: bool,
    ) -> Result<Option<QuestionList>, DatabaseError> {
        set_private(self, id, private).await
    }

    async fn replace_contents(
        &mut self,
        id: i32,
        name: &str,
        question_ids: &[i32],
    ) -> Result<Option<QuestionList>, DatabaseError> {
        replace_contents(self, id, name, question_ids).await
    }

    async fn remove_list(&mut self, id: i32) -> Result<(), DatabaseError> {
        delete_list(self, id).await.map(|_| ())
    }
}
