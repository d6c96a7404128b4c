//! Views: one render function per [`ViewKind`].
//!
//! Views load their own data and parse their own query parameters. API
//! failures are caught here and turned into alerts; the view still renders.

mod auth;
mod dashboard;
mod not_found;
mod payments;
mod students;

use crudops_client::RestApi;

use crate::context::AppContext;
use crate::location::Location;
use crate::routes::ViewKind;
use crate::screen::{Alert, Screen};

/// Output of one render: the new screen plus any alerts raised while loading.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub screen: Screen,
    pub alerts: Vec<Alert>,
}

impl Rendered {
    pub fn ok(screen: Screen) -> Self {
        Self {
            screen,
            alerts: Vec::new(),
        }
    }

    pub fn with_alert(screen: Screen, message: impl Into<String>) -> Self {
        Self {
            screen,
            alerts: vec![Alert::new(message)],
        }
    }
}

pub async fn render<A: RestApi>(view: ViewKind, ctx: &AppContext<A>, location: &Location) -> Rendered {
    match view {
        ViewKind::Login => auth::login(),
        ViewKind::Register => auth::register(),
        ViewKind::Dashboard => dashboard::render(ctx).await,
        ViewKind::Students => students::list(ctx).await,
        ViewKind::StudentCreate => students::create_form(),
        ViewKind::StudentEdit => students::edit_form(ctx, location).await,
        ViewKind::Payments => payments::list(ctx).await,
        ViewKind::NotFound => not_found::render(location),
    }
}
