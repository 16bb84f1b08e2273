use std::sync::Arc;

use im::Vector;

use crate::view_model::{MalformedRecord, PostId, PostViewModel, RawPost};

/// The hydrated post collection. Lives inside the posts slice; all
/// mutation goes through dispatched actions, never field assignment.
/// Entries are `Arc`ed so consumers can detect an unchanged post by
/// pointer identity instead of comparing records.
#[derive(Clone, Default, PartialEq)]
pub struct Data {
    pub posts: Vector<Arc<PostViewModel>>,
}

impl std::fmt::Debug for Data {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Data").field("posts", &self.posts.len()).finish()
    }
}

// Data Operations

impl Data {
    /// Hydrate `records` and merge them in: a record whose id is
    /// already present replaces the stored entry, everything else is
    /// appended in server order. A record that fails hydration is
    /// skipped, never stored with a substitute date; the first
    /// failure is returned once the rest has been merged.
    pub fn merge_posts(&mut self, records: &[RawPost]) -> Result<(), MalformedRecord> {
        let mut first_error = None;
        for record in records.iter() {
            match PostViewModel::hydrate(record) {
                Ok(post) => {
                    if let Some(index) = self.posts.iter().position(|e| e.id == post.id) {
                        self.posts.set(index, Arc::new(post));
                    } else {
                        self.posts.push_back(Arc::new(post));
                    }
                }
                Err(error) => {
                    log::error!("skipping malformed post record: {error}");
                    first_error.get_or_insert(error);
                }
            }
        }
        match first_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    pub fn post(&self, id: &PostId) -> Option<&Arc<PostViewModel>> {
        self.posts.iter().find(|post| &post.id == id)
    }
}
