//! HTML templates, embedded at build time and rendered with minijinja.

use std::sync::LazyLock;

use axum::response::Html;
use minijinja::Environment;
use serde::Serialize;

/// Built-in templates by name. Names ending in `.html` are auto-escaped.
const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../../templates/base.html")),
    ("_note_form.html", include_str!("../../templates/_note_form.html")),
    ("index.html", include_str!("../../templates/index.html")),
    ("single.html", include_str!("../../templates/single.html")),
    ("add.html", include_str!("../../templates/add.html")),
    ("edit.html", include_str!("../../templates/edit.html")),
    ("delete.html", include_str!("../../templates/delete.html")),
    ("login.html", include_str!("../../templates/login.html")),
    ("signup.html", include_str!("../../templates/signup.html")),
    ("403.html", include_str!("../../templates/403.html")),
    ("404.html", include_str!("../../templates/404.html")),
];

static ENV: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut env = Environment::new();
    env.set_loader(|name| Ok(template_source(name).map(str::to_string)));
    env
});

fn template_source(name: &str) -> Option<&'static str> {
    TEMPLATES
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, source)| *source)
}

/// Renders a built-in template.
pub fn render(name: &str, ctx: impl Serialize) -> Result<String, minijinja::Error> {
    ENV.get_template(name)?.render(ctx)
}

/// Renders a built-in template into an HTML response body.
pub fn page(name: &str, ctx: impl Serialize) -> Result<Html<String>, minijinja::Error> {
    render(name, ctx).map(Html)
}
