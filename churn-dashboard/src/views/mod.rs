//! HTML views
//!
//! Server-rendered pages sharing one layout: a head with embedded styles,
//! the horizontal navigation menu, and a centered content column.

pub mod home;
pub mod insights;
pub mod predict;

use churn_core::constants::APP_NAME;

/// Navigable views, in menu order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Insights,
    Predict,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Home, Page::Insights, Page::Predict];

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Insights => "Insights",
            Page::Predict => "Predict",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Page::Home => "/home",
            Page::Insights => "/insights",
            Page::Predict => "/predict",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Page::Home => "&#8962;",
            Page::Insights => "&#128200;",
            Page::Predict => "&#128202;",
        }
    }
}

/// Wrap page content in the shared layout
pub fn render_page(active: Page, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{app} - {page}</title>
    <style>
{css}
    </style>
</head>
<body>
{nav}
<main class="container">
{content}
</main>
</body>
</html>"#,
        app = APP_NAME,
        page = active.title(),
        css = CSS,
        nav = render_nav(active),
        content = content,
    )
}

fn render_nav(active: Page) -> String {
    let links: String = Page::ALL
        .iter()
        .map(|&page| {
            let class = if page == active { "nav-link selected" } else { "nav-link" };
            format!(
                r#"    <a class="{}" href="{}">{} {}</a>
"#,
                class,
                page.path(),
                page.icon(),
                page.title()
            )
        })
        .collect();

    format!("<nav class=\"menu\">\n{}</nav>", links)
}

/// URL of a file under the assets directory
pub fn asset_url(relative: &str) -> String {
    let encoded: String = relative
        .chars()
        .map(|c| match c {
            ' ' => "%20".to_string(),
            c => c.to_string(),
        })
        .collect();
    format!("/static/{}", encoded)
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const CSS: &str = r#"
        body { margin: 0; font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; color: #262730; }
        .menu { display: flex; background-color: #f8f9fa; padding: 0; }
        .nav-link { flex: 1; text-align: center; font-size: 20px; padding: 12px 0; color: #262730; text-decoration: none; }
        .nav-link:hover { background-color: #eee; }
        .nav-link.selected { background-color: #0d6efd; color: white; }
        .container { max-width: 1100px; margin: 0 auto; padding: 24px; }
        .row { display: flex; gap: 32px; align-items: flex-start; }
        .row .wide { flex: 2.5; }
        .row .narrow { flex: 1; }
        .row .half { flex: 1; }
        .lead { font-size: 22px; }
        .text { font-size: 20px; }
        .justify { font-size: 18px; text-align: justify; padding: 20px; }
        .accent { color: red; }
        hr.divider { border: 2px solid gray; }
        .insight img, .header-image { max-width: 100%; }
        form.predict label { display: block; margin-top: 12px; font-weight: 600; }
        form.predict input, form.predict select { width: 100%; padding: 6px; font-size: 16px; }
        form.predict button { margin-top: 20px; padding: 8px 24px; font-size: 16px; }
        .banner { color: white; padding: 15px; font-size: 18px; }
        .banner.error { background-color: #b45309; }
"#;
