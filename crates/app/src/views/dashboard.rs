use crudops_client::{RestApi, RestApiExt};
use crudops_core::{Entity, Payment, Student};

use crate::context::AppContext;
use crate::routes::ViewKind;
use crate::screen::{Alert, Screen};

use super::Rendered;

pub(super) async fn render<A: RestApi>(ctx: &AppContext<A>) -> Rendered {
    let mut screen = Screen::new(ViewKind::Dashboard, "Dashboard");
    let mut alerts = Vec::new();

    if let Some(p) = ctx.principal() {
        screen.push_line(format!("Welcome, {} ({})", p.name, p.role));
    }

    match ctx.api().read_as::<Vec<Student>>(&Student::collection_path()).await {
        Ok(students) => screen.push_line(format!("Students: {}", students.len())),
        Err(e) => {
            screen.push_line("Students: -");
            alerts.push(Alert::new(format!("Failed to load students: {e}")));
        }
    }

    match ctx.api().read_as::<Vec<Payment>>(&Payment::collection_path()).await {
        Ok(payments) => {
            let total: u64 = payments.iter().map(|p| p.amount_paid).sum();
            screen.push_line(format!("Payments: {} (total paid {})", payments.len(), total));
        }
        Err(e) => {
            screen.push_line("Payments: -");
            alerts.push(Alert::new(format!("Failed to load payments: {e}")));
        }
    }

    Rendered { screen, alerts }
}
