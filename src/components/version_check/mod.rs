mod reducer;

pub use reducer::{reduce, Stage, State, VersionCheckAction, VersionCheckReducer};

use crate::environment::Environment;
use crate::store::{Effect, Reducer};

impl Reducer for VersionCheckReducer {
    type Action = VersionCheckAction;
    type State = State;
    type Environment = Environment;

    fn reduce(
        action: Self::Action,
        state: &mut Self::State,
        environment: &Self::Environment,
    ) -> Effect<Self::Action> {
        reducer::reduce(action, state, environment)
    }
}
