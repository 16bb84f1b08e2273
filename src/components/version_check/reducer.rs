use crate::environment::{Environment, VersionCheckResult};
use crate::loc;
use crate::store::Effect;

pub struct VersionCheckReducer;

const ICON_IDLE: &str = "fa fa-refresh";
const ICON_BUSY: &str = "fa fa-spinner fa-spin";
const ICON_SUCCESS: &str = "fa fa-check";
const ICON_FAILURE: &str = "fa fa-times";

/// One admin page load drives exactly one of these machines. Once it
/// settles it stays settled; the form that could resubmit is gone, and
/// only a fresh page (a fresh `State`) can check again.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub enum Stage {
    #[default]
    Idle,
    Checking,
    Settled(VersionCheckResult),
}

impl Stage {
    pub fn is_busy(&self) -> bool {
        matches!(self, Stage::Checking)
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, Stage::Settled(_))
    }

    /// Whether the triggering form is still on screen.
    pub fn shows_form(&self) -> bool {
        !self.is_settled()
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Stage::Idle => ICON_IDLE,
            Stage::Checking => ICON_BUSY,
            Stage::Settled(result) if result.is_error => ICON_FAILURE,
            Stage::Settled(_) => ICON_SUCCESS,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Stage::Settled(result) if result.is_error => "check-error",
            Stage::Settled(_) => "check-success",
            _ => "check-pending",
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Stage::Settled(result) => Some(&result.message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct State {
    pub stage: Stage,
    /// Serialized fields of the triggering form, CSRF token included.
    /// Opaque here; forwarded verbatim on submit.
    pub form_fields: Vec<(String, String)>,
}

impl State {
    pub fn new(form_fields: Vec<(String, String)>) -> Self {
        Self {
            stage: Stage::Idle,
            form_fields,
        }
    }
}

#[derive(Debug, Clone)]
pub enum VersionCheckAction {
    Submit,
    Response(Result<VersionCheckResult, String>),
}

pub fn reduce(
    action: VersionCheckAction,
    state: &mut State,
    environment: &Environment,
) -> Effect<VersionCheckAction> {
    log::trace!("{action:?}");
    match action {
        VersionCheckAction::Submit => {
            // disabled while checking, removed once settled; a second
            // submit can only be a stray event
            if state.stage != Stage::Idle {
                return Effect::NONE;
            }
            state.stage = Stage::Checking;
            let model = environment.model.clone();
            let fields = state.form_fields.clone();
            Effect::future(
                async move { model.check_version(fields).await },
                VersionCheckAction::Response,
            )
        }
        VersionCheckAction::Response(result) => {
            let settled = match result {
                Ok(result) => result,
                Err(error) => {
                    log::error!("version check failed: {error}");
                    VersionCheckResult {
                        is_error: true,
                        message: loc!("The site's server could not be reached.").to_string(),
                    }
                }
            };
            state.stage = Stage::Settled(settled);
            Effect::NONE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::stub_environment;

    fn form() -> Vec<(String, String)> {
        vec![
            ("csrfmiddlewaretoken".to_string(), "token123".to_string()),
            ("check".to_string(), "1".to_string()),
        ]
    }

    #[test]
    fn submit_moves_idle_to_checking_and_issues_request() {
        let environment = stub_environment();
        let mut state = State::new(form());
        let effect = reduce(VersionCheckAction::Submit, &mut state, &environment);
        assert_eq!(state.stage, Stage::Checking);
        assert!(state.stage.is_busy());
        assert!(matches!(effect, Effect::Future(_)));
    }

    #[test]
    fn submit_while_checking_is_ignored() {
        let environment = stub_environment();
        let mut state = State::new(form());
        reduce(VersionCheckAction::Submit, &mut state, &environment);
        let effect = reduce(VersionCheckAction::Submit, &mut state, &environment);
        assert!(matches!(effect, Effect::None));
        assert_eq!(state.stage, Stage::Checking);
    }

    #[test]
    fn success_response_settles_with_success_styling() {
        let environment = stub_environment();
        let mut state = State::new(form());
        reduce(VersionCheckAction::Submit, &mut state, &environment);
        reduce(
            VersionCheckAction::Response(Ok(VersionCheckResult {
                is_error: false,
                message: "Up to date".to_string(),
            })),
            &mut state,
            &environment,
        );
        assert!(state.stage.is_settled());
        assert!(!state.stage.shows_form());
        assert_eq!(state.stage.icon(), "fa fa-check");
        assert_eq!(state.stage.css_class(), "check-success");
        assert_eq!(state.stage.message(), Some("Up to date"));
    }

    #[test]
    fn error_response_settles_with_error_styling() {
        let environment = stub_environment();
        let mut state = State::new(form());
        reduce(VersionCheckAction::Submit, &mut state, &environment);
        reduce(
            VersionCheckAction::Response(Ok(VersionCheckResult {
                is_error: true,
                message: "Check failed".to_string(),
            })),
            &mut state,
            &environment,
        );
        assert_eq!(state.stage.icon(), "fa fa-times");
        assert_eq!(state.stage.css_class(), "check-error");
        assert_eq!(state.stage.message(), Some("Check failed"));
    }

    #[test]
    fn transport_failure_settles_as_error() {
        let environment = stub_environment();
        let mut state = State::new(form());
        reduce(VersionCheckAction::Submit, &mut state, &environment);
        reduce(
            VersionCheckAction::Response(Err("API Error: check_version".to_string())),
            &mut state,
            &environment,
        );
        let Stage::Settled(result) = &state.stage else {
            panic!("expected settled stage")
        };
        assert!(result.is_error);
        assert!(!result.message.is_empty());
    }

    #[test]
    fn settled_is_terminal() {
        let environment = stub_environment();
        let mut state = State::new(form());
        reduce(VersionCheckAction::Submit, &mut state, &environment);
        reduce(
            VersionCheckAction::Response(Ok(VersionCheckResult::default())),
            &mut state,
            &environment,
        );
        let settled = state.stage.clone();
        let effect = reduce(VersionCheckAction::Submit, &mut state, &environment);
        assert!(matches!(effect, Effect::None));
        assert_eq!(state.stage, settled);
    }
}
