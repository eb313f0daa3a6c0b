#![cfg(feature = "web")]
use handlebars::Handlebars;

use crate::error::ClaimsError;
use crate::view::Page;

const TEMPLATES: [(&str, &str); 3] = [
    ("list", include_str!("./templates/list.hbs")),
    ("detail", include_str!("./templates/detail.hbs")),
    ("not_found", include_str!("./templates/not_found.hbs")),
];

const PARTIALS: [(&str, &str); 2] = [
    ("header", include_str!("./templates/header.hbs")),
    ("footer", include_str!("./templates/footer.hbs")),
];

/// HTML renderer for dashboard pages
///
/// Templates are compiled into the binary, so a renderer can always be built
/// without touching the filesystem. All interpolated values are HTML-escaped.
pub struct Renderer {
    registry: Handlebars<'static>,
}

impl Renderer {
    /// Register every page template and shared partial
    ///
    /// # Returns
    /// * `Result<Renderer, ClaimsError>` - The renderer, or a template syntax error
    pub fn new() -> Result<Self, ClaimsError> {
        let mut registry = Handlebars::new();

        for (name, source) in PARTIALS {
            registry
                .register_partial(name, source)
                .map_err(|e| ClaimsError::Template(e.to_string()))?;
        }
        for (name, source) in TEMPLATES {
            registry
                .register_template_string(name, source)
                .map_err(|e| ClaimsError::Template(e.to_string()))?;
        }

        Ok(Renderer { registry })
    }

    /// Render a page model to a complete HTML document
    pub fn render(&self, page: &Page) -> Result<String, ClaimsError> {
        let rendered = match page {
            Page::List(list) => self.registry.render("list", list),
            Page::Detail(detail) => self.registry.render("detail", detail),
            Page::NotFound(missing) => self.registry.render("not_found", missing),
        };

        rendered.map_err(|e| ClaimsError::Template(e.to_string()))
    }
}
