use std::sync::Arc;

use im::Vector;

use crate::environment::Environment;
use crate::store::Effect;
use crate::view_model::{PostId, PostPatch, PostViewModel};

use super::{PostsAction, State};

pub fn reduce(
    action: PostsAction,
    state: &mut State,
    environment: &Environment,
) -> Effect<PostsAction> {
    log::trace!("{action:?}");
    match action {
        PostsAction::Load => {
            state.is_loading = true;
            let model = environment.model.clone();
            Effect::future(async move { model.posts().await }, PostsAction::LoadedPosts)
        }
        PostsAction::LoadedPosts(result) => {
            state.is_loading = false;
            match result {
                Ok(records) => {
                    if let Err(error) = state.data.merge_posts(&records) {
                        state.error_message = Some(error.to_string());
                    }
                }
                Err(error) => state.error_message = Some(error),
            }
            Effect::NONE
        }
        PostsAction::Patch { id, patch } => {
            state.data.posts = apply_patch(&state.data.posts, &id, &patch);
            Effect::NONE
        }
    }
}

/// Replace the entry whose id equals `id` with the shallow merge of
/// itself and `patch`. Every other entry keeps its `Arc`, so change
/// detection by pointer identity keeps working downstream; when no
/// entry matches, every entry comes back untouched.
pub fn apply_patch(
    posts: &Vector<Arc<PostViewModel>>,
    id: &PostId,
    patch: &PostPatch,
) -> Vector<Arc<PostViewModel>> {
    let Some(index) = posts.iter().position(|post| &post.id == id) else {
        return posts.clone();
    };
    posts.update(index, Arc::new(posts[index].merged(patch)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::posts::{patch, patch_id};
    use serde_json::json;

    fn hydrated(id: u64) -> PostViewModel {
        let raw = serde_json::from_value(json!({
            "id": id,
            "posted_on": "2020-01-01T00:00:00Z",
            "updated_on": "2020-01-02T00:00:00Z",
            "hidden_on": null,
        }))
        .unwrap();
        PostViewModel::hydrate(&raw).unwrap()
    }

    fn collection(ids: &[u64]) -> Vector<Arc<PostViewModel>> {
        ids.iter().map(|id| Arc::new(hydrated(*id))).collect()
    }

    #[test]
    fn patch_replaces_only_the_matching_entry() {
        let posts = collection(&[1, 2, 3]);
        let next = apply_patch(&posts, &PostId::from(2), &PostPatch::busy(true));

        assert_eq!(*next[1], posts[1].merged(&PostPatch::busy(true)));
        assert!(next[1].is_busy);
        // the untouched neighbours are the same allocation
        assert!(Arc::ptr_eq(&next[0], &posts[0]));
        assert!(Arc::ptr_eq(&next[2], &posts[2]));
        // the input collection still holds the unpatched record
        assert!(!posts[1].is_busy);
    }

    #[test]
    fn patch_on_unknown_id_returns_every_entry_unchanged() {
        let posts = collection(&[1, 2]);
        let next = apply_patch(&posts, &PostId::from(9), &PostPatch::busy(true));
        assert_eq!(next.len(), posts.len());
        assert!(next
            .iter()
            .zip(posts.iter())
            .all(|(a, b)| Arc::ptr_eq(a, b)));
    }

    #[test]
    fn hydrate_then_patch_roundtrip() {
        // raw record in, one flag flipped via dispatch, rest untouched
        let raw: crate::view_model::RawPost = serde_json::from_value(json!({
            "id": 7,
            "posted_on": "2020-01-01T00:00:00Z",
            "updated_on": "2020-01-02T00:00:00Z",
            "hidden_on": null,
        }))
        .unwrap();
        let mut state = State::new();
        state.data.merge_posts(&[raw]).unwrap();
        let post = state.data.post(&PostId::from(7)).unwrap().clone();
        assert!(!post.is_busy);
        assert!(!post.is_hidden());

        let environment = crate::test_support::stub_environment();
        let action = patch(&post, PostPatch::busy(true));
        let effect = reduce(action, &mut state, &environment);
        assert!(matches!(effect, Effect::None));

        let patched = state.data.post(&PostId::from(7)).unwrap();
        assert!(patched.is_busy);
        assert!(!patched.is_selected);
        assert_eq!(patched.posted, post.posted);
        assert_eq!(patched.id, PostId::from(7));
    }

    #[test]
    fn loaded_posts_failure_surfaces_error_message() {
        let mut state = State::new();
        let environment = crate::test_support::stub_environment();
        reduce(
            PostsAction::LoadedPosts(Err("API Error: posts".to_string())),
            &mut state,
            &environment,
        );
        assert!(!state.is_loading);
        assert_eq!(state.error_message.as_deref(), Some("API Error: posts"));
    }

    #[test]
    fn loaded_posts_with_bad_record_keeps_good_ones() {
        let mut state = State::new();
        let environment = crate::test_support::stub_environment();
        let good = serde_json::from_value(json!({
            "id": 1,
            "posted_on": "2020-01-01T00:00:00Z",
            "updated_on": "2020-01-01T00:00:00Z",
        }))
        .unwrap();
        let bad = serde_json::from_value(json!({
            "id": 2,
            "posted_on": "garbage",
            "updated_on": "2020-01-01T00:00:00Z",
        }))
        .unwrap();
        reduce(
            PostsAction::LoadedPosts(Ok(vec![good, bad])),
            &mut state,
            &environment,
        );
        assert_eq!(state.posts().len(), 1);
        assert!(state.error_message.is_some());
    }

    #[test]
    fn patch_by_bare_id_reference() {
        let mut state = State::new();
        state.data.posts = collection(&[4]);
        let environment = crate::test_support::stub_environment();
        reduce(
            patch_id(PostId::from(4), PostPatch::selected(true)),
            &mut state,
            &environment,
        );
        assert!(state.posts()[0].is_selected);
    }

    #[test]
    fn moderation_helpers_compose_with_patch() {
        use crate::components::posts::{hide, mark_deleted, unhide};
        use chrono::TimeZone;

        let mut state = State::new();
        state.data.posts = collection(&[5]);
        let environment = crate::test_support::stub_environment();
        let post = state.posts()[0].clone();

        let at = chrono::Utc.with_ymd_and_hms(2020, 2, 1, 0, 0, 0).unwrap();
        reduce(hide(&post, at), &mut state, &environment);
        assert_eq!(state.posts()[0].hidden, Some(at));

        let post = state.posts()[0].clone();
        reduce(unhide(&post), &mut state, &environment);
        assert!(!state.posts()[0].is_hidden());

        let post = state.posts()[0].clone();
        reduce(mark_deleted(&post), &mut state, &environment);
        assert!(state.posts()[0].is_deleted);
    }
}
