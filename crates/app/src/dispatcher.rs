//! View dispatcher: navigation events in, displayed screen out.

use std::collections::VecDeque;

use thiserror::Error;

use crudops_client::RestApi;
use crudops_core::{Entity, EntityId};

use crate::actions::{self, Action, ActionKind, ActionOutcome};
use crate::context::AppContext;
use crate::guard::{self, GuardDecision};
use crate::location::Location;
use crate::routes::ViewKind;
use crate::screen::{Alert, FormError, Screen};
use crate::views;

/// Upper bound on redirect hops followed by [`Dispatcher::navigate`].
const MAX_REDIRECTS: usize = 4;

/// Result of one navigation event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The view rendered and replaced the screen.
    Rendered(ViewKind),
    /// The guard redirected; the screen is unchanged.
    Redirected(&'static str),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("action '{0}' is not available on this screen")]
    ActionNotRegistered(ActionKind),

    #[error("an alert is waiting to be acknowledged")]
    AlertPending,

    #[error("redirect loop at '{0}'")]
    RedirectLoop(String),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error("student {submitted} is not the one being edited ({loaded})")]
    TargetMismatch { submitted: String, loaded: String },
}

#[derive(Debug)]
pub struct Dispatcher<A> {
    ctx: AppContext<A>,
    location: Location,
    screen: Option<Screen>,
    alerts: VecDeque<Alert>,
}

impl<A: RestApi> Dispatcher<A> {
    pub fn new(ctx: AppContext<A>) -> Self {
        Self {
            ctx,
            location: Location::parse("/"),
            screen: None,
            alerts: VecDeque::new(),
        }
    }

    pub fn context(&self) -> &AppContext<A> {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut AppContext<A> {
        &mut self.ctx
    }

    /// The location of the last navigation event (after any redirect).
    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn screen(&self) -> Option<&Screen> {
        self.screen.as_ref()
    }

    pub fn pending_alert(&self) -> Option<&Alert> {
        self.alerts.front()
    }

    /// Dismiss the oldest alert.
    pub fn acknowledge(&mut self) -> Option<Alert> {
        self.alerts.pop_front()
    }

    /// Handle one navigation event.
    ///
    /// A redirect only updates the location; the caller delivers it as the
    /// next event (see [`Dispatcher::navigate`]).
    pub async fn handle_navigation(&mut self, raw: &str) -> Navigation {
        let location = Location::parse(raw);
        let decision = guard::evaluate(location.path(), self.ctx.principal());

        match decision {
            GuardDecision::Redirect(to) => {
                self.location = Location::parse(to);
                Navigation::Redirected(to)
            }
            GuardDecision::Allow(view) => {
                let rendered = views::render(view, &self.ctx, &location).await;
                let mut screen = rendered.screen;
                if self.ctx.principal().is_some() {
                    screen.register(ActionKind::Logout);
                }
                tracing::debug!(path = location.path(), ?view, "rendered");

                self.alerts.extend(rendered.alerts);
                self.screen = Some(screen);
                self.location = location;
                Navigation::Rendered(view)
            }
        }
    }

    /// Deliver a navigation event and any redirects it triggers.
    pub async fn navigate(&mut self, raw: &str) -> Result<ViewKind, DispatchError> {
        let mut target = raw.to_string();
        for _ in 0..=MAX_REDIRECTS {
            match self.handle_navigation(&target).await {
                Navigation::Rendered(view) => return Ok(view),
                Navigation::Redirected(to) => target = to.to_string(),
            }
        }
        Err(DispatchError::RedirectLoop(target))
    }

    /// Run an action registered by the current screen.
    ///
    /// Returns the view rendered afterwards, or `None` when the action failed:
    /// the failure becomes an alert and the screen stays as it is.
    pub async fn submit(&mut self, action: Action) -> Result<Option<ViewKind>, DispatchError> {
        if !self.alerts.is_empty() {
            return Err(DispatchError::AlertPending);
        }
        let kind = action.kind();
        let Some(screen) = self.screen.as_ref().filter(|s| s.accepts(kind)) else {
            return Err(DispatchError::ActionNotRegistered(kind));
        };
        if let Action::UpdateStudent(student) = &action {
            ensure_same_target(screen, student.id())?;
        }

        match actions::perform(&mut self.ctx, action).await {
            Ok(ActionOutcome::Navigate(to)) => self.navigate(to).await.map(Some),
            Ok(ActionOutcome::Refresh) => {
                let current = self.location.to_string();
                self.navigate(&current).await.map(Some)
            }
            Err(e) => {
                tracing::warn!(action = %kind, error = %e, "action failed");
                self.alerts.push_back(Alert::new(e.to_string()));
                Ok(None)
            }
        }
    }

    /// Set one field of the current screen's form.
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), DispatchError> {
        let screen = self.screen.as_mut().ok_or(FormError::NoForm)?;
        screen.set_field(field, value)?;
        Ok(())
    }

    /// Submit the current screen's form as the action its view accepts.
    pub async fn save(&mut self) -> Result<Option<ViewKind>, DispatchError> {
        let action = self.form_action()?;
        self.submit(action).await
    }

    fn form_action(&self) -> Result<Action, DispatchError> {
        let screen = self.screen.as_ref().ok_or(FormError::NoForm)?;
        let form = screen.form.clone().ok_or(FormError::NoForm)?;
        let incomplete = |e: serde_json::Error| FormError::Incomplete(e.to_string());

        let action = match screen.view {
            ViewKind::StudentCreate => Action::CreateStudent(serde_json::from_value(form).map_err(incomplete)?),
            ViewKind::StudentEdit => Action::UpdateStudent(serde_json::from_value(form).map_err(incomplete)?),
            ViewKind::Payments => Action::CreatePayment(serde_json::from_value(form).map_err(incomplete)?),
            _ => return Err(FormError::NoForm.into()),
        };
        Ok(action)
    }
}

/// An update must target the record the edit screen loaded.
fn ensure_same_target(screen: &Screen, submitted: Option<&EntityId>) -> Result<(), DispatchError> {
    let loaded = screen
        .form
        .as_ref()
        .and_then(|f| f.get("id"))
        .and_then(|id| serde_json::from_value::<EntityId>(id.clone()).ok());

    match (submitted, loaded) {
        (Some(submitted), Some(loaded)) if *submitted == loaded => Ok(()),
        (submitted, loaded) => Err(DispatchError::TargetMismatch {
            submitted: submitted.map_or_else(|| "(none)".to_string(), EntityId::to_string),
            loaded: loaded.map_or_else(|| "(none)".to_string(), |id| id.to_string()),
        }),
    }
}
