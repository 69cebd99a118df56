//! Admin record forms

use crate::models::{Category, EventCategory, FormFields, ResourceKind, TeamCategory};
use crate::state::FormDraft;
use crate::utils::helpers::escape_html;

#[derive(Debug, Clone, Copy)]
enum Input {
    Text,
    TextArea,
    Url,
    Date,
    Time,
    Select(fn() -> Vec<(&'static str, &'static str)>),
}

struct Field {
    name: &'static str,
    label: &'static str,
    input: Input,
    required: bool,
}

const fn field(name: &'static str, label: &'static str, input: Input, required: bool) -> Field {
    Field {
        name,
        label,
        input,
        required,
    }
}

fn options<C: Category>() -> Vec<(&'static str, &'static str)> {
    C::all().iter().map(|c| (c.as_str(), c.label())).collect()
}

fn fields_for(kind: ResourceKind) -> Vec<Field> {
    match kind {
        ResourceKind::Event => vec![
            field("title", "Title", Input::Text, true),
            field("description", "Description", Input::TextArea, true),
            field("date", "Date", Input::Date, true),
            field("time", "Time", Input::Time, true),
            field("venue", "Venue", Input::Text, true),
            field("category", "Category", Input::Select(options::<EventCategory>), true),
            field("form_link", "Registration form link", Input::Url, false),
            field("chat_link", "Chat group link", Input::Url, false),
        ],
        ResourceKind::TeamMember => vec![
            field("name", "Name", Input::Text, true),
            field("role", "Role", Input::Text, true),
            field("category", "Category", Input::Select(options::<TeamCategory>), true),
            field("description", "Description", Input::TextArea, false),
            field("linkedin_url", "LinkedIn profile", Input::Url, false),
        ],
        ResourceKind::GalleryImage => vec![
            field("title", "Title", Input::Text, true),
            field("category", "Category", Input::Select(options::<EventCategory>), true),
            field("event_name", "Event name", Input::Text, false),
            field("description", "Description", Input::TextArea, false),
        ],
    }
}

fn render_field(field: &Field, values: &FormFields) -> String {
    let value = escape_html(values.raw(field.name));
    let required = if field.required { " required" } else { "" };
    let control = match field.input {
        Input::Text | Input::Url | Input::Date | Input::Time => {
            let kind = match field.input {
                Input::Url => "url",
                Input::Date => "date",
                Input::Time => "time",
                _ => "text",
            };
            format!(
                r#"<input type="{kind}" id="{name}" name="{name}" value="{value}"{required}>"#,
                kind = kind,
                name = field.name,
                value = value,
                required = required
            )
        }
        Input::TextArea => format!(
            r#"<textarea id="{name}" name="{name}" rows="3"{required}>{value}</textarea>"#,
            name = field.name,
            value = value,
            required = required
        ),
        Input::Select(choices) => {
            let current = values.raw(field.name);
            let mut opts = String::from(r#"<option value="">Choose...</option>"#);
            for (stored, label) in choices() {
                let selected = stored.eq_ignore_ascii_case(current) || label.eq_ignore_ascii_case(current);
                opts.push_str(&format!(
                    r#"<option value="{}"{}>{}</option>"#,
                    escape_html(stored),
                    if selected { " selected" } else { "" },
                    escape_html(label)
                ));
            }
            format!(
                r#"<select id="{name}" name="{name}"{required}>{opts}</select>"#,
                name = field.name,
                required = required,
                opts = opts
            )
        }
    };

    format!(
        r#"<label for="{}">{}</label>{}"#,
        field.name, field.label, control
    )
}

/// Create or edit form for `kind`, populated from the session draft
pub fn render_record_form(kind: ResourceKind, draft: Option<&FormDraft>) -> String {
    let empty = FormFields::new();
    let values = draft.map(|d| &d.fields).unwrap_or(&empty);
    let editing = draft.and_then(|d| d.id).is_some();

    let inputs: String = fields_for(kind)
        .iter()
        .map(|f| render_field(f, values))
        .collect();

    let heading = if editing {
        format!("Edit {}", kind.label().to_lowercase())
    } else {
        format!("Add {}", kind.label().to_lowercase())
    };
    let image_note = if editing {
        "Image (leave empty to keep the current one)"
    } else {
        "Image"
    };
    let cancel = if editing || draft.is_some() {
        format!(
            r#"<button type="submit" form="cancel-{slug}" formnovalidate>Cancel</button>"#,
            slug = kind.slug()
        )
    } else {
        String::new()
    };

    format!(
        r#"<h2>{heading}</h2>
<form class="record" method="post" action="/admin/{slug}" enctype="multipart/form-data">
    {inputs}
    <label for="image">{image_note}</label><input type="file" id="image" name="image" accept="image/*"{image_required}>
    <p><button type="submit">{submit}</button> {cancel}</p>
</form>
<form id="cancel-{slug}" method="post" action="/admin/{slug}/cancel"></form>"#,
        heading = heading,
        slug = kind.slug(),
        inputs = inputs,
        image_note = image_note,
        image_required = if editing { "" } else { " required" },
        submit = if editing { "Save changes" } else { "Create" },
        cancel = cancel,
    )
}
