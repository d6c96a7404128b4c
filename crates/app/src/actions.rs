//! User actions (form submissions and buttons) and their effects.

use thiserror::Error;

use crudops_auth::{AuthError, NewPrincipal};
use crudops_client::{ApiError, RestApi, RestApiExt};
use crudops_core::{DomainError, Entity, EntityId, Payment, Student};

use crate::context::AppContext;
use crate::routes;

/// Tag of an [`Action`], used for per-screen registration.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Login,
    Register,
    Logout,
    CreateStudent,
    UpdateStudent,
    DeleteStudent,
    CreatePayment,
    DeletePayment,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Login => "login",
            ActionKind::Register => "register",
            ActionKind::Logout => "logout",
            ActionKind::CreateStudent => "create-student",
            ActionKind::UpdateStudent => "update-student",
            ActionKind::DeleteStudent => "delete-student",
            ActionKind::CreatePayment => "create-payment",
            ActionKind::DeletePayment => "delete-payment",
        }
    }
}

impl core::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Login { email: String, password: String },
    Register(NewPrincipal),
    Logout,
    CreateStudent(Student),
    UpdateStudent(Student),
    DeleteStudent(EntityId),
    CreatePayment(Payment),
    DeletePayment(EntityId),
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Login { .. } => ActionKind::Login,
            Action::Register(_) => ActionKind::Register,
            Action::Logout => ActionKind::Logout,
            Action::CreateStudent(_) => ActionKind::CreateStudent,
            Action::UpdateStudent(_) => ActionKind::UpdateStudent,
            Action::DeleteStudent(_) => ActionKind::DeleteStudent,
            Action::CreatePayment(_) => ActionKind::CreatePayment,
            Action::DeletePayment(_) => ActionKind::DeletePayment,
        }
    }
}

/// What the dispatcher does after a successful action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Navigate(&'static str),
    /// Re-render the current location.
    Refresh,
}

/// An action failure, surfaced to the user as an alert.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Run one action against the context.
pub async fn perform<A: RestApi>(ctx: &mut AppContext<A>, action: Action) -> Result<ActionOutcome, ActionError> {
    match action {
        Action::Login { email, password } => {
            ctx.auth.authenticate(&email, &password).await?;
            Ok(ActionOutcome::Navigate(routes::DASHBOARD))
        }
        Action::Register(new) => {
            ctx.auth.register(new).await?;
            Ok(ActionOutcome::Navigate(routes::DASHBOARD))
        }
        Action::Logout => {
            ctx.auth.end_session();
            Ok(ActionOutcome::Navigate(routes::LOGIN))
        }
        Action::CreateStudent(mut student) => {
            student.id = None;
            save_student(ctx.api(), &student).await?;
            Ok(ActionOutcome::Navigate(routes::STUDENTS))
        }
        Action::UpdateStudent(student) => {
            if student.id().is_none() {
                return Err(DomainError::invalid_id("student id is missing").into());
            }
            save_student(ctx.api(), &student).await?;
            Ok(ActionOutcome::Navigate(routes::STUDENTS))
        }
        Action::DeleteStudent(id) => {
            ctx.api().remove(&Student::item_path(&id)).await?;
            Ok(ActionOutcome::Refresh)
        }
        Action::CreatePayment(mut payment) => {
            payment.id = None;
            payment.validate()?;
            let _: Payment = ctx.api().create_as(&Payment::collection_path(), &payment).await?;
            Ok(ActionOutcome::Refresh)
        }
        Action::DeletePayment(id) => {
            ctx.api().remove(&Payment::item_path(&id)).await?;
            Ok(ActionOutcome::Refresh)
        }
    }
}

/// Create or replace a student after the uniqueness check.
async fn save_student<A: RestApi>(api: &A, student: &Student) -> Result<Student, ActionError> {
    student.validate()?;

    let existing: Vec<Student> = api.read_as(&Student::collection_path()).await?;
    student.ensure_unique_email(&existing)?;

    let saved = match student.id() {
        Some(id) => api.replace_as(&Student::item_path(id), student).await?,
        None => api.create_as(&Student::collection_path(), student).await?,
    };
    Ok(saved)
}
