//! Public cards for each resource

use crate::models::{Category, Event, GalleryImage, Resource, TeamMember};
use crate::utils::helpers::escape_html;

/// A record that can be shown as a card in a public list
pub trait Card: Resource {
    fn render_card(&self) -> String;
}

fn link_button(href: Option<&str>, label: &str) -> String {
    href.map(|href| {
        format!(
            r#"<a class="chip" href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
            escape_html(href),
            label
        )
    })
    .unwrap_or_default()
}

impl Card for Event {
    fn render_card(&self) -> String {
        format!(
            r#"<article class="card">
    <img src="{image}" alt="{title}">
    <div class="body">
        <h3>{title}</h3>
        <p class="meta">{date} &middot; {time} &middot; {venue}</p>
        <p>{description}</p>
        <p>{register}{chat}</p>
    </div>
</article>"#,
            image = escape_html(&self.image_url),
            title = escape_html(&self.title),
            date = self.date.format("%d %b %Y"),
            time = self.time.format("%H:%M"),
            venue = escape_html(&self.venue),
            description = escape_html(&self.description),
            register = link_button(self.form_link.as_deref(), "Register"),
            chat = link_button(self.chat_link.as_deref(), "Join Group"),
        )
    }
}

impl Card for TeamMember {
    fn render_card(&self) -> String {
        format!(
            r#"<article class="card">
    <img src="{image}" alt="{name}">
    <div class="body">
        <h3>{name}</h3>
        <p class="meta">{role} &middot; {tier}</p>
        {description}
        {linkedin}
    </div>
</article>"#,
            image = escape_html(&self.image_url),
            name = escape_html(&self.name),
            role = escape_html(&self.role),
            tier = self.category.label(),
            description = self
                .description
                .as_deref()
                .map(|d| format!("<p>{}</p>", escape_html(d)))
                .unwrap_or_default(),
            linkedin = link_button(self.linkedin_url.as_deref(), "LinkedIn"),
        )
    }
}

impl Card for GalleryImage {
    fn render_card(&self) -> String {
        format!(
            r#"<figure class="card">
    <img src="{image}" alt="{title}">
    <figcaption class="body">
        <h3>{title}</h3>
        <p class="meta">{theme}{event}</p>
        {description}
    </figcaption>
</figure>"#,
            image = escape_html(&self.image_url),
            title = escape_html(&self.title),
            theme = self.category.label(),
            event = self
                .event_name
                .as_deref()
                .map(|e| format!(" &middot; {}", escape_html(e)))
                .unwrap_or_default(),
            description = self
                .description
                .as_deref()
                .map(|d| format!("<p>{}</p>", escape_html(d)))
                .unwrap_or_default(),
        )
    }
}
