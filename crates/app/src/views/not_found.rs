use crate::location::Location;
use crate::routes::ViewKind;
use crate::screen::Screen;

use super::Rendered;

pub(super) fn render(location: &Location) -> Rendered {
    Rendered::ok(
        Screen::new(ViewKind::NotFound, "Page not found")
            .line(format!("Nothing lives at {}.", location.path()))
            .line("Go back to /dashboard."),
    )
}
