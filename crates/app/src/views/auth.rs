use crate::actions::ActionKind;
use crate::routes::ViewKind;
use crate::screen::Screen;

use super::Rendered;

pub(super) fn login() -> Rendered {
    Rendered::ok(
        Screen::new(ViewKind::Login, "Sign in")
            .line("Enter your email and password.")
            .line("No account yet? Go to /register.")
            .on(ActionKind::Login),
    )
}

pub(super) fn register() -> Rendered {
    Rendered::ok(
        Screen::new(ViewKind::Register, "Create an account")
            .line("Name, email and password are required.")
            .line("Already registered? Go to /login.")
            .on(ActionKind::Register),
    )
}
