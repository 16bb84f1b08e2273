use std::sync::Arc;

use im::Vector;

use crate::environment::storage::Data;
use crate::view_model::PostViewModel;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct State {
    pub data: Data,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn posts(&self) -> &Vector<Arc<PostViewModel>> {
        &self.data.posts
    }
}
