mod action;
mod reducer;
mod state;

pub use action::{
    hide, mark_deleted, patch, patch_id, set_busy, set_selected, unhide, PostsAction,
};
pub use reducer::{apply_patch, reduce};
pub use state::State;

use crate::environment::Environment;
use crate::store::{Effect, Reducer};

pub struct PostsReducer;

impl Reducer for PostsReducer {
    type Action = PostsAction;
    type State = State;
    type Environment = Environment;

    fn reduce(
        action: Self::Action,
        state: &mut Self::State,
        environment: &Self::Environment,
    ) -> Effect<Self::Action> {
        reducer::reduce(action, state, environment)
    }

    fn initial_action() -> Option<Self::Action> {
        Some(PostsAction::Load)
    }
}
