//! Markdown preview rendering.

use pulldown_cmark::{Event, Options, Parser, html};

/// Render a generated post as HTML for the preview pane.
///
/// Raw HTML in the post is escaped as text, so model output can never inject
/// markup into the page.
pub fn render_preview(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
