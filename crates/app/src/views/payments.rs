use crudops_client::{RestApi, RestApiExt};
use crudops_core::{Entity, EntityId, Payment};
use serde_json::json;

use crate::actions::ActionKind;
use crate::context::AppContext;
use crate::routes::ViewKind;
use crate::screen::Screen;

use super::Rendered;

pub(super) async fn list<A: RestApi>(ctx: &AppContext<A>) -> Rendered {
    let mut screen = Screen::new(ViewKind::Payments, "Payments");
    if ctx.is_admin() {
        screen.register(ActionKind::CreatePayment);
        screen.register(ActionKind::DeletePayment);
        screen.form = Some(json!({
            "name": "",
            "paymentSchedule": "",
            "billNumber": "",
            "amountPaid": 0,
            "balanceAmount": 0,
            "date": ""
        }));
    }

    let payments = match ctx.api().read_as::<Vec<Payment>>(&Payment::collection_path()).await {
        Ok(payments) => payments,
        Err(e) => return Rendered::with_alert(screen, format!("Failed to load payments: {e}")),
    };

    if payments.is_empty() {
        screen.push_line("No payments recorded.");
    }
    for p in &payments {
        screen.push_line(format!(
            "#{} {} [{}] bill {} paid {} balance {} on {}",
            p.id.as_ref().map_or("?", EntityId::as_str),
            p.name,
            p.payment_schedule,
            p.bill_number,
            p.amount_paid,
            p.balance_amount,
            p.date
        ));
    }
    Rendered::ok(screen)
}
