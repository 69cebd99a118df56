//! Page shell shared by public and admin pages

use crate::models::ResourceKind;
use crate::utils::helpers::escape_html;

/// Which navigation entry is highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Home,
    Section(ResourceKind),
    Admin,
    Login,
}

const STYLE: &str = r#"
    * { box-sizing: border-box; }
    body { margin: 0; font-family: system-ui, sans-serif; color: #1f2937; background: #f9fafb; }
    header { background: #1e3a8a; color: #fff; }
    header nav { max-width: 72rem; margin: 0 auto; display: flex; gap: 1.5rem; padding: 1rem; align-items: center; }
    header a { color: #dbeafe; text-decoration: none; }
    header a.active { color: #fff; font-weight: 600; }
    header .brand { font-weight: 700; margin-right: auto; color: #fff; }
    main { max-width: 72rem; margin: 0 auto; padding: 2rem 1rem; }
    .chips { display: flex; flex-wrap: wrap; gap: .5rem; margin-bottom: 1.5rem; }
    .chip { padding: .35rem .9rem; border-radius: 999px; background: #e5e7eb; color: #1f2937; text-decoration: none; }
    .chip.selected { background: #1d4ed8; color: #fff; }
    .grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(16rem, 1fr)); gap: 1.5rem; }
    .card { background: #fff; border-radius: .5rem; box-shadow: 0 1px 3px rgba(0,0,0,.1); overflow: hidden; }
    .card img { width: 100%; height: 12rem; object-fit: cover; }
    .card .body { padding: 1rem; }
    .card .meta { color: #6b7280; font-size: .9rem; }
    .state { padding: 3rem; text-align: center; color: #6b7280; }
    .notice { padding: .75rem 1rem; border-radius: .375rem; margin-bottom: 1rem; }
    .notice.success { background: #dcfce7; color: #166534; }
    .notice.error { background: #fee2e2; color: #991b1b; }
    form.record label { display: block; margin-top: .75rem; font-weight: 500; }
    form.record input, form.record select, form.record textarea { width: 100%; padding: .5rem; }
    .tabs { display: flex; gap: 1rem; margin-bottom: 1.5rem; }
    .tabs a.active { font-weight: 700; }
    table.records { width: 100%; border-collapse: collapse; margin-top: 2rem; }
    table.records td, table.records th { padding: .5rem; border-bottom: 1px solid #e5e7eb; text-align: left; }
    table.records img { width: 4rem; height: 3rem; object-fit: cover; }
"#;

fn nav_link(href: &str, label: &str, active: bool) -> String {
    format!(
        r#"<a href="{}"{}>{}</a>"#,
        href,
        if active { r#" class="active""# } else { "" },
        label
    )
}

/// Wrap `body` in the full HTML document
pub fn render_page(title: &str, nav: Nav, body: &str) -> String {
    let links: String = [
        nav_link("/", "Home", nav == Nav::Home),
        nav_link("/events", "Events", nav == Nav::Section(ResourceKind::Event)),
        nav_link("/team", "Team", nav == Nav::Section(ResourceKind::TeamMember)),
        nav_link("/gallery", "Gallery", nav == Nav::Section(ResourceKind::GalleryImage)),
        nav_link("/admin", "Admin", nav == Nav::Admin || nav == Nav::Login),
    ]
    .concat();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | CETA</title>
    <style>{style}</style>
</head>
<body>
    <header><nav><a class="brand" href="/">CETA</a>{links}</nav></header>
    <main>
{body}
    </main>
</body>
</html>"#,
        title = escape_html(title),
        style = STYLE,
        links = links,
        body = body
    )
}
