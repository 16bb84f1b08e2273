use chrono::{DateTime, Utc};

use crate::view_model::{PostId, PostPatch, PostViewModel, RawPost};

#[derive(Debug, Clone)]
pub enum PostsAction {
    /// Fetch the thread page's posts from the server
    Load,
    LoadedPosts(Result<Vec<RawPost>, String>),
    /// Overwrite a subset of one post's fields
    Patch { id: PostId, patch: PostPatch },
}

/// Action creator: patch `post` with `changes`. The patch shape is not
/// validated here; that is the caller's concern.
pub fn patch(post: &PostViewModel, changes: PostPatch) -> PostsAction {
    patch_id(post.id.clone(), changes)
}

/// Like [`patch`], for callers that only hold an id.
pub fn patch_id(id: PostId, changes: PostPatch) -> PostsAction {
    PostsAction::Patch { id, patch: changes }
}

// Moderation shortcuts. Each is just a named patch; the reducer treats
// them like any other.

pub fn set_selected(post: &PostViewModel, selected: bool) -> PostsAction {
    patch(post, PostPatch::selected(selected))
}

pub fn set_busy(post: &PostViewModel, busy: bool) -> PostsAction {
    patch(post, PostPatch::busy(busy))
}

pub fn hide(post: &PostViewModel, at: DateTime<Utc>) -> PostsAction {
    patch(post, PostPatch::hidden(Some(at)))
}

pub fn unhide(post: &PostViewModel) -> PostsAction {
    patch(post, PostPatch::hidden(None))
}

pub fn mark_deleted(post: &PostViewModel) -> PostsAction {
    patch(post, PostPatch::deleted(true))
}
