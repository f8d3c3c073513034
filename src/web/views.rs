//! HTML rendering.
//!
//! Templates are compiled into the binary and registered once at startup.
//! Every page is rendered inside the `layout` partial, which shows the
//! navigation for a logged-in user and the flash messages of the current
//! response.

use super::auth::CurrentUser;
use super::error::AppError;
use super::forms::FormErrors;
use crate::libs::messages::Message;
use anyhow::Result;
use axum::response::Html;
use handlebars::{handlebars_helper, Handlebars};
use serde::Serialize;
use serde_json::{json, Map, Value};

const LAYOUT: &str = include_str!("../../templates/layout.hbs");

const TEMPLATES: &[(&str, &str)] = &[
    ("auth/register", include_str!("../../templates/auth/register.hbs")),
    ("auth/login", include_str!("../../templates/auth/login.hbs")),
    ("index", include_str!("../../templates/index.hbs")),
    ("position_add", include_str!("../../templates/position_add.hbs")),
    ("positions", include_str!("../../templates/positions.hbs")),
    ("department_add", include_str!("../../templates/department_add.hbs")),
    ("department_stats", include_str!("../../templates/department_stats.hbs")),
    ("employee_add", include_str!("../../templates/employee_add.hbs")),
    ("employee_update", include_str!("../../templates/employee_update.hbs")),
    ("employees", include_str!("../../templates/employees.hbs")),
];

pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();

        handlebars_helper!(indent: |level: i64| format!("padding-left: {}em", level.max(0) * 2));
        registry.register_helper("indent", Box::new(indent));

        registry.register_partial("layout", LAYOUT)?;
        for (name, source) in TEMPLATES {
            registry.register_template_string(name, source)?;
        }

        Ok(Self { registry })
    }

    pub fn render(&self, page: Page) -> Result<Html<String>, AppError> {
        if let Some(error) = page.error {
            return Err(AppError::Internal(anyhow::Error::new(error).context(format!("context for {}", page.template))));
        }
        let mut context = page.context;
        context.insert("flashes".into(), json!(page.flashes));
        Ok(Html(self.registry.render(page.template, &Value::Object(context))?))
    }
}

/// A template name plus the data it is rendered with.
pub struct Page {
    template: &'static str,
    context: Map<String, Value>,
    flashes: Vec<String>,
    /// First value that failed to serialize; reported by `Views::render`.
    error: Option<serde_json::Error>,
}

impl Page {
    pub fn new(template: &'static str) -> Self {
        Self {
            template,
            context: Map::new(),
            flashes: Vec::new(),
            error: None,
        }
    }

    pub fn user(self, user: &CurrentUser) -> Self {
        self.with("user", user)
    }

    pub fn with(mut self, key: &str, value: impl Serialize) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => {
                self.context.insert(key.to_string(), value);
            }
            Err(error) => {
                self.error.get_or_insert(error);
            }
        }
        self
    }

    pub fn errors(self, errors: &FormErrors) -> Self {
        self.with("errors", errors)
    }

    pub fn flash(mut self, message: Message) -> Self {
        self.flashes.push(message.to_string());
        self
    }
}

#[derive(Debug, Serialize)]
struct SelectOption<'a> {
    id: i64,
    name: &'a str,
    selected: bool,
}

/// `<option>` entries for a select field, marking the submitted value.
pub fn options(choices: &[(i64, String)], selected: &str) -> Value {
    let selected = selected.trim().parse::<i64>().ok();
    let options: Vec<SelectOption> = choices
        .iter()
        .map(|(id, name)| SelectOption {
            id: *id,
            name,
            selected: Some(*id) == selected,
        })
        .collect();
    json!(options)
}
