use std::path::Path;

use anyhow::Context;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection};
use tracing::{info, warn};

use crate::db::question::{upsert_question, NewQuestion, Question};
use crate::db::tag::update_question_tags;
use crate::utils::DatabaseError;
use leetlist_types::CreateQuestion;

/// Stores one catalog entry with exactly the given tags.
pub async fn import_question(
    conn: &mut AsyncPgConnection,
    item: &CreateQuestion,
) -> Result<Question, DatabaseError> {
    conn.transaction::<_, DatabaseError, _>(|conn| {
        async move {
            let question = upsert_question(
                conn,
                &NewQuestion {
                    title: item.title.trim(),
                    difficulty: item.difficulty.trim(),
                    link: item.link.trim(),
                },
            )
            .await?;
            update_question_tags(conn, question.id, &item.tags).await?;
            Ok(question)
        }
        .scope_boxed()
    })
    .await
}

/// Loads a JSON array of questions into the catalog. Entries are keyed by
/// link, so importing the same file twice changes nothing.
pub async fn import_questions(
    conn: &mut AsyncPgConnection,
    path: impl AsRef<Path>,
) -> anyhow::Result<usize> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let items: Vec<CreateQuestion> = rocket::serde::json::from_str(&raw)
        .with_context(|| format!("{} is not a list of questions", path.display()))?;

    let mut imported = 0;
    for item in &items {
        if item.link.trim().is_empty() {
            warn!(title = %item.title, "skipping question without link");
            continue;
        }
        let question = import_question(conn, item)
            .await
            .with_context(|| format!("failed to import {}", item.link))?;
        info!(id = question.id, link = %question.link, tags = item.tags.len(), "question imported");
        imported += 1;
    }

    Ok(imported)
}
