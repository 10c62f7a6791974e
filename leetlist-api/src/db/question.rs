use diesel::prelude::*;
use diesel_async::{AsyncPgConnection as Connection, RunQueryDsl};

use super::{contains_pattern, keyword, Paging};
use crate::utils::DatabaseError;
use leetlist_types::schema::{question_tags, questions, tags};
use leetlist_types::tag::db::{QuestionTag, Tag};
pub use leetlist_types::question::db::{NewQuestion, Question, QuestionWithTags};

/// Inserts a question, or refreshes the one already stored under the same link.
pub async fn upsert_question(
    conn: &mut Connection,
    new: &NewQuestion<'_>,
) -> Result<Question, DatabaseError> {
    use diesel::dsl::now;

    diesel::insert_into(questions::table)
        .values(new)
        .on_conflict(questions::link)
        .do_update()
        .set((new, questions::updated_at.eq(now)))
        .returning(Question::as_returning())
        .get_result(conn)
        .await
        .map_err(|e| DatabaseError::classify(e, "questions"))
}

/// Attaches tag mappings to each question, keeping the order of `questions`.
pub async fn get_questions_with_tags(
    conn: &mut Connection,
    questions: Vec<Question>,
) -> Result<Vec<QuestionWithTags>, DatabaseError> {
    if questions.is_empty() {
        return Ok(vec![]);
    }

    let tags = QuestionTag::belonging_to(&questions)
        .inner_join(tags::table)
        .select((QuestionTag::as_select(), Tag::as_select()))
        .order_by((question_tags::question_id.asc(), tags::name.asc()))
        .load::<(QuestionTag, Tag)>(conn)
        .await?;

    Ok(tags
        .grouped_by(&questions)
        .into_iter()
        .zip(questions)
        .map(|(tags, question)| (question, tags))
        .collect())
}

fn filtered_questions<'a>(
    search: Option<&'a str>,
    tag: Option<&'a str>,
) -> questions::BoxedQuery<'a, diesel::pg::Pg> {
    let mut builder = questions::table.into_boxed();
    if let Some(k) = keyword(search) {
        builder = builder.filter(questions::title.ilike(contains_pattern(k)));
    }
    if let Some(t) = keyword(tag) {
        builder = builder.filter(
            questions::id.eq_any(
                question_tags::table
                    .filter(question_tags::tag_name.eq(t))
                    .select(question_tags::question_id),
            ),
        );
    }
    builder
}

/// Pages through questions by id, optionally narrowed by a title keyword and
/// a tag. Returns the page and the number of all matches.
pub async fn search_questions(
    conn: &mut Connection,
    search: Option<&str>,
    tag: Option<&str>,
    paging: Paging,
) -> Result<(Vec<QuestionWithTags>, i64), DatabaseError> {
    let total = filtered_questions(search, tag)
        .count()
        .get_result::<i64>(conn)
        .await?;

    let page = filtered_questions(search, tag)
        .select(Question::as_select())
        .order_by(questions::id.asc())
        .offset(paging.offset())
        .limit(paging.limit)
        .load::<Question>(conn)
        .await?;

    Ok((get_questions_with_tags(conn, page).await?, total))
}

#[cfg(test)]
pub(crate) mod test {
    use super::super::connection;
    use super::*;
    use crate::db::tag::update_question_tags;
    use crate::utils::rand::rand_str;

    use tracing::info;

    pub async fn create_rand_question(conn: &mut Connection) -> Question {
        let title = rand_str(10);
        let link = format!("https://leetcode.com/problems/{}/", rand_str(16));
        upsert_question(
            conn,
            &NewQuestion {
                title: &title,
                difficulty: "Medium",
                link: &link,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn upsert_refreshes_existing_link() {
        let mut conn = connection::establish().await.unwrap();
        let q = create_rand_question(&mut conn).await;
        assert!(q.id > 0);

        let renamed = upsert_question(
            &mut conn,
            &NewQuestion {
                title: "Renamed",
                difficulty: "Hard",
                link: &q.link,
            },
        )
        .await
        .unwrap();
        info!(?renamed, "upserted");

        assert_eq!(renamed.id, q.id);
        assert_eq!(renamed.title, "Renamed");
        assert_eq!(renamed.difficulty, "Hard");
        assert_eq!(renamed.created_at, q.created_at);
    }

    #[tokio::test]
    async fn search_by_title_and_tag() {
        let mut conn = connection::establish().await.unwrap();
        let marker = rand_str(12);
        let tag = rand_str(8);

        let mut ids = vec![];
        for i in 0..3 {
            let title = format!("{marker} {i}");
            let link = format!("https://leetcode.com/problems/{}/", rand_str(16));
            let q = upsert_question(
                &mut conn,
                &NewQuestion {
                    title: &title,
                    difficulty: "Easy",
                    link: &link,
                },
            )
            .await
            .unwrap();
            if i != 1 {
                update_question_tags(&mut conn, q.id, &[tag.clone()])
                    .await
                    .unwrap();
            }
            ids.push(q.id);
        }

        let (rv, total) = search_questions(&mut conn, Some(marker.as_str()), None, Paging::new(None, None))
            .await
            .unwrap();
        assert_eq!(total, 3);
        assert_eq!(rv.iter().map(|(q, _)| q.id).collect::<Vec<_>>(), ids);

        let (rv, total) =
            search_questions(&mut conn, Some(marker.as_str()), Some(tag.as_str()), Paging::new(None, None))
                .await
                .unwrap();
        assert_eq!(total, 2);
        assert_eq!(rv.len(), 2);
        assert!(rv.iter().all(|(_, tags)| tags.len() == 1 && tags[0].1.name == tag));

        let (rv, total) =
            search_questions(&mut conn, Some(marker.as_str()), None, Paging::new(Some(1), Some(2)))
                .await
                .unwrap();
        assert_eq!(total, 3);
        assert_eq!(rv.len(), 1);
        assert_eq!(rv[0].0.id, ids[2]);
    }
}
