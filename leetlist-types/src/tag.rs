use serde::{Deserialize, Serialize};

// API Response Types
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct Tag {
    pub name: String,
    pub label: String,
}

/// A tag attached to a question, as clients see it.
///
/// Only the tag reference and the joined tag survive; the mapping row's own
/// id, owning question id and timestamps are linkage details and never leave
/// the server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct QuestionTag {
    pub tag_name: String,
    pub tag: Tag,
}

// Database Model Types
#[cfg(feature = "diesel")]
pub mod db {
    use diesel::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Queryable, Selectable, Identifiable, Debug, Clone, Deserialize, Serialize)]
    #[diesel(table_name = crate::tags)]
    #[diesel(primary_key(name))]
    #[diesel(check_for_backend(diesel::pg::Pg))]
    pub struct Tag {
        pub name: String,
        pub label: String,
        #[serde(with = "time::serde::rfc3339")]
        pub created_at: time::OffsetDateTime,
        #[serde(with = "time::serde::rfc3339")]
        pub updated_at: time::OffsetDateTime,
    }

    #[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone)]
    #[diesel(belongs_to(crate::question::db::Question))]
    #[diesel(table_name = crate::question_tags)]
    #[diesel(check_for_backend(diesel::pg::Pg))]
    pub struct QuestionTag {
        pub id: i32,
        pub question_id: i32,
        pub tag_name: String,
        pub created_at: time::OffsetDateTime,
        pub updated_at: time::OffsetDateTime,
    }

    #[derive(Insertable, Debug, Clone)]
    #[diesel(table_name = crate::tags)]
    pub struct NewTag<'a> {
        pub name: &'a str,
        pub label: &'a str,
    }

    #[derive(Insertable, Debug, Clone)]
    #[diesel(table_name = crate::question_tags)]
    pub struct NewQuestionTag<'a> {
        pub question_id: i32,
        pub tag_name: &'a str,
    }

    impl From<Tag> for super::Tag {
        fn from(t: Tag) -> Self {
            Self {
                name: t.name,
                label: t.label,
            }
        }
    }

    impl From<(QuestionTag, Tag)> for super::QuestionTag {
        fn from((mapping, tag): (QuestionTag, Tag)) -> Self {
            Self {
                tag_name: mapping.tag_name,
                tag: tag.into(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_tag_serializes_camel_case() {
        let t = QuestionTag {
            tag_name: "dp".to_string(),
            tag: Tag {
                name: "dp".to_string(),
                label: "Dynamic Programming".to_string(),
            },
        };
        let value = serde_json::to_value(&t).unwrap();
        let obj = value.as_object().unwrap();

        assert_eq!(obj.len(), 2);
        assert_eq!(obj["tagName"], "dp");
        assert_eq!(obj["tag"]["label"], "Dynamic Programming");
    }
}
