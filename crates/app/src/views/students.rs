use crudops_client::{RestApi, RestApiExt};
use crudops_core::{Entity, EntityId, Student};
use serde_json::json;

use crate::actions::ActionKind;
use crate::context::AppContext;
use crate::location::Location;
use crate::routes::ViewKind;
use crate::screen::Screen;

use super::Rendered;

fn row(s: &Student) -> String {
    format!(
        "#{} {} <{}> phone {} enroll {} admitted {}",
        s.id.as_ref().map_or("?", EntityId::as_str),
        s.name,
        s.email,
        s.phone,
        s.enroll_number,
        s.date_of_admission
    )
}

pub(super) async fn list<A: RestApi>(ctx: &AppContext<A>) -> Rendered {
    let mut screen = Screen::new(ViewKind::Students, "Students");
    if ctx.is_admin() {
        screen.push_line("Add a student at /students/create.");
        screen.register(ActionKind::DeleteStudent);
    }

    match ctx.api().read_as::<Vec<Student>>(&Student::collection_path()).await {
        Ok(students) if students.is_empty() => {
            screen.push_line("No students yet.");
            Rendered::ok(screen)
        }
        Ok(students) => {
            for s in &students {
                screen.push_line(row(s));
            }
            Rendered::ok(screen)
        }
        Err(e) => Rendered::with_alert(screen, format!("Failed to load students: {e}")),
    }
}

pub(super) fn create_form() -> Rendered {
    let mut screen = Screen::new(ViewKind::StudentCreate, "Add student")
        .line("Fill in name, email, phone, enroll number and admission date.")
        .on(ActionKind::CreateStudent);
    screen.form = Some(json!({
        "name": "",
        "email": "",
        "phone": "",
        "enrollNumber": "",
        "dateOfAdmission": ""
    }));
    Rendered::ok(screen)
}

pub(super) async fn edit_form<A: RestApi>(ctx: &AppContext<A>, location: &Location) -> Rendered {
    let screen = Screen::new(ViewKind::StudentEdit, "Edit student");

    let id = match location.param("id").map(str::parse::<EntityId>) {
        Some(Ok(id)) => id,
        _ => {
            return Rendered::with_alert(
                screen.line("No student selected."),
                "Missing or invalid student id",
            );
        }
    };

    match ctx.api().read_as::<Student>(&Student::item_path(&id)).await {
        Ok(student) => {
            let mut screen = screen.line(row(&student)).on(ActionKind::UpdateStudent);
            screen.form = serde_json::to_value(&student).ok();
            Rendered::ok(screen)
        }
        Err(e) => Rendered::with_alert(
            screen.line(format!("Student {id} could not be loaded.")),
            format!("Failed to load student: {e}"),
        ),
    }
}
