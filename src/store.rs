use std::collections::VecDeque;
use std::future::Future;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;

/// What a reducer hands back to the runtime once it is done with an
/// action. A `Future` effect resolves into the action dispatched next.
pub enum Effect<Action> {
    None,
    Action(Action),
    Future(BoxFuture<'static, Action>),
}

impl<Action> std::fmt::Debug for Effect<Action> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effect::None => f.write_str("Effect::None"),
            Effect::Action(_) => f.write_str("Effect::Action"),
            Effect::Future(_) => f.write_str("Effect::Future"),
        }
    }
}

impl<Action: Send + 'static> Effect<Action> {
    pub const NONE: Self = Effect::None;

    pub fn action(action: Action) -> Self {
        Effect::Action(action)
    }

    pub fn future<F, Output>(
        future: F,
        handler: impl FnOnce(Output) -> Action + Send + 'static,
    ) -> Self
    where
        F: Future<Output = Output> + Send + 'static,
        Output: Send + 'static,
    {
        Effect::Future(async move { handler(future.await) }.boxed())
    }

    /// Lift this effect into a parent action space.
    pub fn map<Mapped, F>(self, mapper: F) -> Effect<Mapped>
    where
        Mapped: Send + 'static,
        F: FnOnce(Action) -> Mapped + Send + 'static,
    {
        match self {
            Effect::None => Effect::None,
            Effect::Action(action) => Effect::Action(mapper(action)),
            Effect::Future(future) => Effect::Future(async move { mapper(future.await) }.boxed()),
        }
    }
}

pub trait Reducer {
    type Action: Send + 'static;
    type State;
    type Environment;

    fn reduce(
        action: Self::Action,
        state: &mut Self::State,
        environment: &Self::Environment,
    ) -> Effect<Self::Action>;

    /// Dispatched once when the store starts running.
    fn initial_action() -> Option<Self::Action> {
        None
    }
}

/// Owns one reducer's state and drives its effects to completion.
/// All mutation flows through [`Store::dispatch`]; the state is only
/// ever read back via [`Store::state`].
pub struct Store<R: Reducer> {
    state: R::State,
    environment: R::Environment,
}

impl<R: Reducer> Store<R> {
    pub fn new(state: R::State, environment: R::Environment) -> Self {
        Self { state, environment }
    }

    pub async fn run(&mut self) {
        if let Some(action) = R::initial_action() {
            self.dispatch(action).await;
        }
    }

    /// Feed `action` through the reducer, then keep reducing whatever
    /// its effects produce until the queue drains. Future effects are
    /// awaited in place, so a dispatch that triggers a request only
    /// returns once the response action has been reduced as well.
    pub async fn dispatch(&mut self, action: R::Action) {
        let mut queue = VecDeque::new();
        queue.push_back(action);
        while let Some(next) = queue.pop_front() {
            match R::reduce(next, &mut self.state, &self.environment) {
                Effect::None => {}
                Effect::Action(action) => queue.push_back(action),
                Effect::Future(future) => queue.push_back(future.await),
            }
        }
    }

    pub fn state(&self) -> &R::State {
        &self.state
    }

    pub fn environment(&self) -> &R::Environment {
        &self.environment
    }
}
