use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::question::Question;

// API Response Types
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct QuestionList {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub private: bool,
    #[cfg_attr(feature = "utoipa", schema(format = DateTime, value_type=String))]
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
    #[cfg_attr(feature = "utoipa", schema(format = DateTime, value_type=String))]
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: time::OffsetDateTime,
}

/// A list together with its questions, in list order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ListDetail {
    pub question_list: QuestionList,
    pub questions: Vec<Question>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct CreateList {
    pub name: String,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub questions: Vec<i32>,
}

/// Owner-only changes to a list. Fields other than these are ignored.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct ModifyList {
    pub private: Option<bool>,
}

/// Replaces the name and the questions of a list.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct SaveList {
    pub name: String,
    pub questions: Vec<i32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct Page<T> {
    pub results: Vec<T>,
    pub total: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum ListSort {
    /// Newest first.
    #[default]
    New,
    Old,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("unknown sort order: {0:?}")]
pub struct UnknownSort(pub String);

impl FromStr for ListSort {
    type Err = UnknownSort;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "new" => Ok(Self::New),
            "old" => Ok(Self::Old),
            _ => Err(UnknownSort(s.to_string())),
        }
    }
}

impl fmt::Display for ListSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::New => "new",
            Self::Old => "old",
        })
    }
}

// Database Model Types
#[cfg(feature = "diesel")]
pub mod db {
    use diesel::prelude::*;
    use serde::{Deserialize, Serialize};

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
    #[diesel(table_name = crate::question_lists)]
    #[diesel(check_for_backend(diesel::pg::Pg))]
    pub struct QuestionList {
        pub id: i32,
        pub name: String,
        pub username: String,
        pub private: bool,
        #[serde(with = "time::serde::rfc3339")]
        pub created_at: time::OffsetDateTime,
        #[serde(with = "time::serde::rfc3339")]
        pub updated_at: time::OffsetDateTime,
    }

    #[derive(Insertable, Debug, Clone)]
    #[diesel(table_name = crate::question_lists)]
    pub struct NewQuestionList<'a> {
        pub name: &'a str,
        pub username: &'a str,
        pub private: bool,
    }

    #[derive(Insertable, Queryable, Selectable, Associations, Debug, Clone)]
    #[diesel(belongs_to(QuestionList, foreign_key = list_id))]
    #[diesel(table_name = crate::list_questions)]
    #[diesel(check_for_backend(diesel::pg::Pg))]
    pub struct ListQuestion {
        pub list_id: i32,
        pub question_id: i32,
        pub position: i32,
    }

    impl From<QuestionList> for super::QuestionList {
        fn from(l: QuestionList) -> Self {
            Self {
                id: l.id,
                name: l.name,
                username: l.username,
                private: l.private,
                created_at: l.created_at,
                updated_at: l.updated_at,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_sort() {
        for (raw, expect) in [
            ("", ListSort::New),
            ("new", ListSort::New),
            ("NEW", ListSort::New),
            (" old ", ListSort::Old),
        ] {
            assert_eq!(raw.parse::<ListSort>(), Ok(expect));
        }
        assert_eq!(
            "popular".parse::<ListSort>(),
            Err(UnknownSort("popular".to_string()))
        );
    }

    #[test]
    fn modify_list_ignores_unknown_fields() {
        let raw = r#"{"id":42,"name":"Blind 75","username":"alice","private":false,"createdAt":"2024-06-01T00:00:00Z"}"#;
        let m: ModifyList = serde_json::from_str(raw).unwrap();
        assert_eq!(m.private, Some(false));
    }

    #[test]
    fn detail_uses_frontend_field_names() {
        let detail = ListDetail {
            question_list: QuestionList {
                id: 42,
                name: "Blind 75".to_string(),
                username: "alice".to_string(),
                private: true,
                created_at: time::macros::datetime!(2024-06-01 00:00 UTC),
                updated_at: time::macros::datetime!(2024-06-01 00:00 UTC),
            },
            questions: vec![],
        };
        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["questionList"]["username"], "alice");
        assert_eq!(value["questionList"]["createdAt"], "2024-06-01T00:00:00Z");
        assert!(value["questions"].as_array().unwrap().is_empty());
    }
}
