use tracing::info;

use super::{find_owned, unknown_questions, validate_contents, ListStore};
use crate::utils::ListError;
use leetlist_types::{ModifyList, QuestionList, SaveList};

/// Applies owner-only changes to a list. Only the visibility flag can be
/// changed here; a patch without it is rejected.
pub async fn update_list<S: ListStore>(
    store: &mut S,
    id: i32,
    requester: Option<&str>,
    patch: &ModifyList,
) -> Result<QuestionList, ListError> {
    find_owned(store, id, requester).await?;
    let Some(private) = patch.private else {
        return Err(ListError::ValidationError("No changes".to_string()));
    };

    let list = store
        .set_private(id, private)
        .await?
        .ok_or(ListError::NotFound)?;
    info!(id, private, "list visibility changed");
    Ok(list.into())
}

pub async fn delete_list<S: ListStore>(
    store: &mut S,
    id: i32,
    requester: Option<&str>,
) -> Result<(), ListError> {
    find_owned(store, id, requester).await?;
    store.remove_list(id).await?;
    info!(id, "list deleted");
    Ok(())
}

/// Renames a list and replaces its questions.
pub async fn save_list<S: ListStore>(
    store: &mut S,
    id: i32,
    requester: Option<&str>,
    payload: &SaveList,
) -> Result<QuestionList, ListError> {
    find_owned(store, id, requester).await?;
    validate_contents(&payload.name, &payload.questions)?;

    let list = store
        .replace_contents(id, payload.name.trim(), &payload.questions)
        .await
        .map_err(unknown_questions)?
        .ok_or(ListError::NotFound)?;
    info!(id, questions = payload.questions.len(), "list saved");
    Ok(list.into())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::service::access::get_list;
    use crate::service::test::MemoryStore;
    use crate::utils::DatabaseError;
    use leetlist_types::list::db::QuestionList;
    use leetlist_types::question::db::QuestionWithTags;

    fn store() -> MemoryStore {
        let mut store = MemoryStore::default();
        let q1 = store.add_question(1, "Two Sum");
        let q2 = store.add_question(2, "Valid Parentheses");
        store.add_list(42, "alice", true, &[q1, q2]);
        store
    }

    fn make_public() -> ModifyList {
        ModifyList {
            private: Some(false),
        }
    }

    #[rocket::async_test]
    async fn owner_publishes_list() {
        let mut store = store();
        assert!(matches!(
            get_list(&mut store, 42, Some("bob")).await,
            Err(ListError::Forbidden)
        ));

        let list = update_list(&mut store, 42, Some("alice"), &make_public())
            .await
            .unwrap();
        assert!(!list.private);
        assert_eq!(list.username, "alice");

        let detail = get_list(&mut store, 42, Some("bob")).await.unwrap();
        assert_eq!(detail.questions.len(), 2);
    }

    #[rocket::async_test]
    async fn non_owner_cannot_mutate() {
        let mut store = store();
        for requester in [Some("bob"), None] {
            assert!(matches!(
                update_list(&mut store, 42, requester, &make_public()).await,
                Err(ListError::Forbidden)
            ));
            assert!(matches!(
                delete_list(&mut store, 42, requester).await,
                Err(ListError::Forbidden)
            ));
            let save = SaveList {
                name: "mine now".to_string(),
                questions: vec![],
            };
            assert!(matches!(
                save_list(&mut store, 42, requester, &save).await,
                Err(ListError::Forbidden)
            ));
        }

        let detail = get_list(&mut store, 42, Some("alice")).await.unwrap();
        assert!(detail.question_list.private);
        assert_eq!(detail.question_list.name, "list 42");
        assert_eq!(detail.questions.len(), 2);
    }

    #[rocket::async_test]
    async fn missing_list_is_checked_before_ownership() {
        let mut store = store();
        let save = SaveList {
            name: String::new(),
            questions: vec![],
        };
        for requester in [Some("alice"), Some("bob"), None] {
            assert!(matches!(
                update_list(&mut store, 999, requester, &ModifyList::default()).await,
                Err(ListError::NotFound)
            ));
            assert!(matches!(
                delete_list(&mut store, 999, requester).await,
                Err(ListError::NotFound)
            ));
            assert!(matches!(
                save_list(&mut store, 999, requester, &save).await,
                Err(ListError::NotFound)
            ));
        }
    }

    #[rocket::async_test]
    async fn empty_patch_is_rejected() {
        let mut store = store();
        assert!(matches!(
            update_list(&mut store, 42, Some("alice"), &ModifyList::default()).await,
            Err(ListError::ValidationError(_))
        ));
        // a non-owner learns nothing about the patch
        assert!(matches!(
            update_list(&mut store, 42, Some("bob"), &ModifyList::default()).await,
            Err(ListError::Forbidden)
        ));
    }

    #[rocket::async_test]
    async fn delete_removes_list_and_memberships() {
        let mut store = store();
        assert_eq!(store.member_count(42), 2);

        delete_list(&mut store, 42, Some("alice")).await.unwrap();
        assert_eq!(store.member_count(42), 0);
        assert!(matches!(
            get_list(&mut store, 42, Some("alice")).await,
            Err(ListError::NotFound)
        ));
        assert!(matches!(
            delete_list(&mut store, 42, Some("alice")).await,
            Err(ListError::NotFound)
        ));
    }

    #[rocket::async_test]
    async fn save_replaces_name_and_questions() {
        let mut store = store();
        let q3 = store.add_question(3, "Merge Intervals");

        let save = SaveList {
            name: "  Top Interview  ".to_string(),
            questions: vec![q3, 1],
        };
        let list = save_list(&mut store, 42, Some("alice"), &save).await.unwrap();
        assert_eq!(list.name, "Top Interview");
        assert_eq!(list.username, "alice");

        let detail = get_list(&mut store, 42, Some("alice")).await.unwrap();
        let ids = detail.questions.iter().map(|q| q.id).collect::<Vec<_>>();
        assert_eq!(ids, [3, 1]);
    }

    #[rocket::async_test]
    async fn save_rejects_unknown_questions() {
        let mut store = store();
        let save = SaveList {
            name: "Broken".to_string(),
            questions: vec![1, 77],
        };
        assert!(matches!(
            save_list(&mut store, 42, Some("alice"), &save).await,
            Err(ListError::ValidationError(_))
        ));
        assert_eq!(store.member_count(42), 2);
    }

    /// Drops the list right after it has been looked up, like a concurrent
    /// delete landing between the ownership check and the write.
    struct VanishingStore(MemoryStore);

    #[rocket::async_trait]
    impl ListStore for VanishingStore {
        async fn find_list(&mut self, id: i32) -> Result<Option<QuestionList>, DatabaseError> {
            let found = self.0.find_list(id).await?;
            self.0.remove_list(id).await?;
            Ok(found)
        }

        async fn list_questions(
            &mut self,
            id: i32,
        ) -> Result<Vec<QuestionWithTags>, DatabaseError> {
            self.0.list_questions(id).await
        }

        async fn set_private(
            &mut self,
            id: i32,
            private: bool,
        ) -> Result<Option<QuestionList>, DatabaseError> {
            self.0.set_private(id, private).await
        }

        async fn replace_contents(
            &mut self,
            id: i32,
            name: &str,
            question_ids: &[i32],
        ) -> Result<Option<QuestionList>, DatabaseError> {
            self.0.replace_contents(id, name, question_ids).await
        }

        async fn remove_list(&mut self, id: i32) -> Result<(), DatabaseError> {
            self.0.remove_list(id).await
        }
    }

    #[rocket::async_test]
    async fn list_deleted_mid_request_is_not_found() {
        let mut vanishing = VanishingStore(store());
        assert!(matches!(
            update_list(&mut vanishing, 42, Some("alice"), &make_public()).await,
            Err(ListError::NotFound)
        ));

        let mut vanishing = VanishingStore(store());
        let save = SaveList {
            name: "Renamed".to_string(),
            questions: vec![1],
        };
        assert!(matches!(
            save_list(&mut vanishing, 42, Some("alice"), &save).await,
            Err(ListError::NotFound)
        ));
        assert_eq!(vanishing.0.member_count(42), 0);
    }
}
