//! The displayed content: what a view rendered and which actions it accepts.

use serde_json::Value;
use thiserror::Error;

use crate::actions::ActionKind;
use crate::routes::ViewKind;

/// One rendered view. Replaced wholesale on every allowed navigation.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub view: ViewKind,
    pub title: String,
    pub lines: Vec<String>,
    /// Current form values (edit views).
    pub form: Option<Value>,
    /// Actions this screen registered; anything else is rejected.
    pub actions: Vec<ActionKind>,
}

impl Screen {
    pub fn new(view: ViewKind, title: impl Into<String>) -> Self {
        Self {
            view,
            title: title.into(),
            lines: Vec::new(),
            form: None,
            actions: Vec::new(),
        }
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn on(mut self, action: ActionKind) -> Self {
        self.register(action);
        self
    }

    pub fn register(&mut self, action: ActionKind) {
        if !self.actions.contains(&action) {
            self.actions.push(action);
        }
    }

    pub fn accepts(&self, action: ActionKind) -> bool {
        self.actions.contains(&action)
    }

    /// Plain-text rendering for the console shell.
    pub fn render_text(&self) -> String {
        let mut out = format!("== {} ==\n", self.title);
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        if !self.actions.is_empty() {
            let names: Vec<&str> = self.actions.iter().map(ActionKind::as_str).collect();
            out.push_str(&format!("[actions: {}]\n", names.join(", ")));
        }
        out
    }
}

/// A rejected form edit or submission.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("this screen has no form")]
    NoForm,

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("field '{0}' is read-only")]
    ReadOnly(String),

    #[error("field '{field}' expects {expected}")]
    InvalidValue { field: String, expected: &'static str },

    #[error("incomplete form: {0}")]
    Incomplete(String),
}

impl Screen {
    /// Overwrite one form field, keeping its JSON type.
    ///
    /// Only fields present in the rendered form can be set; `id` never can.
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        if field == "id" {
            return Err(FormError::ReadOnly(field.to_string()));
        }
        let slot = self
            .form
            .as_mut()
            .ok_or(FormError::NoForm)?
            .get_mut(field)
            .ok_or_else(|| FormError::UnknownField(field.to_string()))?;

        *slot = if slot.is_number() {
            value
                .trim()
                .parse::<u64>()
                .map(Value::from)
                .map_err(|_| FormError::InvalidValue {
                    field: field.to_string(),
                    expected: "a whole number",
                })?
        } else {
            Value::String(value.to_string())
        };
        Ok(())
    }
}

/// A blocking message the user must acknowledge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
}

impl Alert {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
