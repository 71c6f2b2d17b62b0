use handlebars::Handlebars;
use serde_json::json;

use crate::core::types::{CsrfToken, Scope};

const TEMPLATES: &[(&str, &str)] = &[
    ("index", include_str!("../../templates/index.hbs")),
    ("data", include_str!("../../templates/data.hbs")),
    ("error", include_str!("../../templates/error.hbs")),
    ("unauthorized", include_str!("../../templates/unauthorized.hbs")),
];

/// Compiled HTML templates. Every interpolation is HTML-escaped.
#[derive(Debug)]
pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    pub fn new() -> Result<Self, handlebars::TemplateError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        for (name, source) in TEMPLATES {
            registry.register_template_string(name, *source)?;
        }
        Ok(Self { registry })
    }

    pub fn landing(&self, csrf_token: &CsrfToken, scope: &Scope) -> Result<String, handlebars::RenderError> {
        self.registry.render(
            "index",
            &json!({ "csrf_token": csrf_token, "scope": scope }),
        )
    }

    /// Both payloads pretty-printed.
    pub fn data(
        &self,
        course_access: &serde_json::Value,
        course_info: &serde_json::Value,
    ) -> Result<String, handlebars::RenderError> {
        let course_access = serde_json::to_string_pretty(course_access)?;
        let course_info = serde_json::to_string_pretty(course_info)?;
        self.registry.render(
            "data",
            &json!({ "course_access": course_access, "course_info": course_info }),
        )
    }

    pub fn error(&self, error: &impl serde::Serialize) -> Result<String, handlebars::RenderError> {
        let error = serde_json::to_string_pretty(error)?;
        self.registry.render("error", &json!({ "error": error }))
    }

    pub fn unauthorized(&self, reason: &str) -> Result<String, handlebars::RenderError> {
        self.registry
            .render("unauthorized", &json!({ "reason": reason }))
    }
}
