use crate::components::{posts, version_check};
use crate::environment::Environment;
use crate::store::{Effect, Reducer, Store};

/// Every slice of application state, owned in one place. Nothing else
/// holds mutable post data; all changes arrive as dispatched actions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    pub posts: posts::State,
    pub version_check: version_check::State,
}

impl AppState {
    /// `version_check_form` is the admin form's serialized fields,
    /// captured at page load and forwarded verbatim on submit.
    pub fn new(version_check_form: Vec<(String, String)>) -> Self {
        Self {
            posts: posts::State::new(),
            version_check: version_check::State::new(version_check_form),
        }
    }
}

#[derive(Debug, Clone)]
pub enum AppAction {
    Posts(posts::PostsAction),
    VersionCheck(version_check::VersionCheckAction),
}

/// The root reducer. Slices are combined explicitly: each action
/// variant reaches exactly one slice, and no slice touches state
/// owned by another.
pub struct AppReducer;

impl Reducer for AppReducer {
    type Action = AppAction;
    type State = AppState;
    type Environment = Environment;

    fn reduce(
        action: Self::Action,
        state: &mut Self::State,
        environment: &Self::Environment,
    ) -> Effect<Self::Action> {
        match action {
            AppAction::Posts(action) => {
                posts::reduce(action, &mut state.posts, environment).map(AppAction::Posts)
            }
            AppAction::VersionCheck(action) => {
                version_check::reduce(action, &mut state.version_check, environment)
                    .map(AppAction::VersionCheck)
            }
        }
    }

    fn initial_action() -> Option<Self::Action> {
        Some(AppAction::Posts(posts::PostsAction::Load))
    }
}

pub type AppStore = Store<AppReducer>;

pub fn init_logging() {
    use env_logger::Env;
    use std::io::Write;
    env_logger::Builder::from_env(Env::default().default_filter_or("debug"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{}:{} {} [{}] - {}",
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .target(env_logger::Target::Stdout)
        .init();
}
