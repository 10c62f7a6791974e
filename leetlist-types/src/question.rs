use serde::{Deserialize, Serialize};

use crate::tag::QuestionTag;

// API Response Types
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct Question {
    pub id: i32,
    pub title: String,
    pub difficulty: String,
    pub link: String,
    pub tags: Vec<QuestionTag>,
}

/// One entry of a question import file.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct CreateQuestion {
    pub title: String,
    pub difficulty: String,
    pub link: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

// Database Model Types
#[cfg(feature = "diesel")]
pub mod db {
    use diesel::prelude::*;
    use serde::{Deserialize, Serialize};

    use crate::tag::db::{QuestionTag, Tag};

    #[derive(
        Queryable,
        Selectable,
        Identifiable,
        Deserialize,
        Serialize,
        PartialEq,
        Eq,
        Debug,
        Clone,
    )]
    #[diesel(table_name = crate::questions)]
    #[diesel(check_for_backend(diesel::pg::Pg))]
    pub struct Question {
        pub id: i32,
        pub title: String,
        pub difficulty: String,
        pub link: String,
        #[serde(with = "time::serde::rfc3339")]
        pub created_at: time::OffsetDateTime,
        #[serde(with = "time::serde::rfc3339")]
        pub updated_at: time::OffsetDateTime,
    }

    #[derive(Insertable, AsChangeset, Debug, Clone)]
    #[diesel(table_name = crate::questions)]
    pub struct NewQuestion<'a> {
        pub title: &'a str,
        pub difficulty: &'a str,
        pub link: &'a str,
    }

    /// A question joined with its tag mappings, in tag name order.
    pub type QuestionWithTags = (Question, Vec<(QuestionTag, Tag)>);

    impl From<QuestionWithTags> for super::Question {
        fn from((q, tags): QuestionWithTags) -> Self {
            Self {
                id: q.id,
                title: q.title,
                difficulty: q.difficulty,
                link: q.link,
                tags: tags.into_iter().map(Into::into).collect(),
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use time::macros::datetime;

        fn row() -> QuestionWithTags {
            let at = datetime!(2024-06-01 12:00 UTC);
            (
                Question {
                    id: 7,
                    title: "Two Sum".to_string(),
                    difficulty: "Easy".to_string(),
                    link: "https://leetcode.com/problems/two-sum/".to_string(),
                    created_at: at,
                    updated_at: at,
                },
                vec![(
                    QuestionTag {
                        id: 11,
                        question_id: 7,
                        tag_name: "array".to_string(),
                        created_at: at,
                        updated_at: at,
                    },
                    Tag {
                        name: "array".to_string(),
                        label: "Array".to_string(),
                        created_at: at,
                        updated_at: at,
                    },
                )],
            )
        }

        #[test]
        fn tag_mapping_hides_linkage_fields() {
            let q: super::super::Question = row().into();
            let value = serde_json::to_value(&q).unwrap();
            let mapping = value["tags"][0].as_object().unwrap();

            for hidden in ["id", "questionId", "createdAt", "updatedAt"] {
                assert!(!mapping.contains_key(hidden), "{hidden} leaked");
            }
            assert_eq!(mapping["tagName"], "array");
            assert_eq!(mapping["tag"]["name"], "array");
        }

        #[test]
        fn projection_is_deterministic() {
            let a = serde_json::to_string(&super::super::Question::from(row())).unwrap();
            let b = serde_json::to_string(&super::super::Question::from(row())).unwrap();
            assert_eq!(a, b);
        }
    }
}
