//! Admin dashboard

use super::forms::render_record_form;
use super::list::filter_chips_with;
use crate::models::{Category, Resource, ResourceKind};
use crate::state::{FormDraft, Notification, NotificationLevel};
use crate::utils::helpers::{escape_html, truncate_text};

fn render_notifications(notifications: &[Notification]) -> String {
    notifications
        .iter()
        .map(|n| {
            let class = match n.level {
                NotificationLevel::Success => "success",
                NotificationLevel::Error => "error",
            };
            format!(
                r#"<div class="notice {}" role="status">{}</div>"#,
                class,
                escape_html(&n.message)
            )
        })
        .collect()
}

fn render_tabs(active: ResourceKind) -> String {
    let tabs: String = ResourceKind::ALL
        .iter()
        .map(|kind| {
            format!(
                r#"<a href="/admin?tab={slug}"{class}>{label}</a>"#,
                slug = kind.slug(),
                class = if *kind == active { r#" class="active""# } else { "" },
                label = match kind {
                    ResourceKind::Event => "Events",
                    ResourceKind::TeamMember => "Team",
                    ResourceKind::GalleryImage => "Gallery",
                }
            )
        })
        .collect();
    format!(r#"<nav class="tabs">{}</nav>"#, tabs)
}

fn render_rows<R: Resource>(records: &[R]) -> String {
    if records.is_empty() {
        return r#"<tr><td colspan="4" class="state empty">Nothing here yet</td></tr>"#.to_string();
    }

    records
        .iter()
        .map(|record| {
            format!(
                r#"<tr>
    <td><img src="{image}" alt=""></td>
    <td>{name}</td>
    <td>{category}</td>
    <td>
        <a href="/admin/{slug}/{id}/edit">Edit</a>
        <form method="post" action="/admin/{slug}/{id}/delete" style="display:inline" onsubmit="return confirm('Delete this record?')">
            <button type="submit">Delete</button>
        </form>
    </td>
</tr>"#,
                image = escape_html(record.image_url()),
                name = escape_html(&truncate_text(record.display_name(), 60)),
                category = record.category().label(),
                slug = R::KIND.slug(),
                id = record.id(),
            )
        })
        .collect()
}

/// Everything the dashboard needs for one tab
pub struct AdminView<'a, R: Resource> {
    pub email: &'a str,
    pub records: &'a [R],
    pub selected: Option<R::Category>,
    pub draft: Option<&'a FormDraft>,
    pub notifications: &'a [Notification],
}

impl<R: Resource> AdminView<'_, R> {
    pub fn render(&self) -> String {
        format!(
            r#"<h1>Admin panel</h1>
<p>Signed in as {email}. <form method="post" action="/logout" style="display:inline"><button type="submit">Sign out</button></form></p>
{notifications}
{tabs}
{form}
<h2>{heading}</h2>
{chips}
<table class="records">
    <thead><tr><th>Image</th><th>Name</th><th>Category</th><th></th></tr></thead>
    <tbody>{rows}</tbody>
</table>"#,
            email = escape_html(self.email),
            notifications = render_notifications(self.notifications),
            tabs = render_tabs(R::KIND),
            form = render_record_form(R::KIND, self.draft),
            heading = format!("{} records ({})", R::KIND.label(), self.records.len()),
            chips = filter_chips_with(self.selected, |category: Option<R::Category>| match category {
                Some(c) => format!("/admin?tab={}&category={}", R::KIND.slug(), urlencoding::encode(c.as_str())),
                None => format!("/admin?tab={}", R::KIND.slug()),
            }),
            rows = render_rows(self.records),
        )
    }
}
