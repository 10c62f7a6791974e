use diesel::prelude::*;
use diesel_async::{AsyncPgConnection as Connection, RunQueryDsl};
use itertools::Itertools;

use crate::utils::DatabaseError;
use leetlist_types::schema::{question_tags, tags};
pub use leetlist_types::tag::db::{NewQuestionTag, NewTag, QuestionTag, Tag};

pub async fn all_tags(conn: &mut Connection) -> Result<Vec<Tag>, DatabaseError> {
    Ok(tags::table
        .select(Tag::as_select())
        .order_by(tags::name.asc())
        .load(conn)
        .await?)
}

/// Upserts the named tags. New tags are labelled with their name, existing
/// labels are left alone.
pub async fn get_or_create_tags(
    conn: &mut Connection,
    names: &[String],
) -> Result<Vec<Tag>, DatabaseError> {
    use diesel::dsl::now;

    let new_tags = names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .unique()
        .map(|name| NewTag { name, label: name })
        .collect_vec();
    if new_tags.is_empty() {
        return Ok(vec![]);
    }

    diesel::insert_into(tags::table)
        .values(&new_tags)
        .on_conflict(tags::name)
        .do_update()
        .set(tags::updated_at.eq(now))
        .returning(Tag::as_returning())
        .get_results(conn)
        .await
        .map_err(|e| DatabaseError::classify(e, "tags"))
}

/// Replaces the tag mappings of a question with the named tags.
pub async fn update_question_tags(
    conn: &mut Connection,
    question_id: i32,
    names: &[String],
) -> Result<Vec<Tag>, DatabaseError> {
    let tags = get_or_create_tags(conn, names).await?;

    diesel::delete(question_tags::table.filter(question_tags::question_id.eq(question_id)))
        .execute(conn)
        .await?;

    let mappings = tags
        .iter()
        .map(|t| NewQuestionTag {
            question_id,
            tag_name: &t.name,
        })
        .collect_vec();
    if !mappings.is_empty() {
        diesel::insert_into(question_tags::table)
            .values(&mappings)
            .execute(conn)
            .await
            .map_err(|e| DatabaseError::classify(e, "question_tags"))?;
    }

    Ok(tags)
}
