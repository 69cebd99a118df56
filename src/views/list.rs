//! List view with category filter chips
//!
//! A list region shows one of three states. Pages are rendered with the
//! records already in place; filter changes swap the region to the loading
//! state and fetch the fragment endpoint. Only the response to the latest
//! request is applied, older ones are dropped.

use super::cards::Card;
use crate::models::Category;
use crate::utils::helpers::{category_query, escape_html};

/// What the list region currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum ListState<R> {
    Loading,
    Empty,
    Populated(Vec<R>),
}

impl<R> ListState<R> {
    pub fn from_records(records: Vec<R>) -> Self {
        if records.is_empty() {
            ListState::Empty
        } else {
            ListState::Populated(records)
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ListState::Populated(records) => records.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub const LOADING_MARKUP: &str = r#"<div class="state loading" aria-busy="true">Loading...</div>"#;

/// Inner markup of the list region
pub fn render_list<R: Card>(state: &ListState<R>, empty_message: &str) -> String {
    match state {
        ListState::Loading => LOADING_MARKUP.to_string(),
        ListState::Empty => format!(r#"<div class="state empty">{}</div>"#, escape_html(empty_message)),
        ListState::Populated(records) => {
            let cards: String = records.iter().map(Card::render_card).collect();
            format!(r#"<div class="grid">{}</div>"#, cards)
        }
    }
}

/// Filter chips linking to `?category=`, with "All" first
pub fn filter_chips<C: Category>(base_path: &str, selected: Option<C>) -> String {
    filter_chips_with(selected, |category: Option<C>| {
        format!("{}{}", base_path, category_query(category.map(|c| c.as_str())))
    })
}

/// Filter chips whose links are built by `href`
pub fn filter_chips_with<C: Category>(selected: Option<C>, href: impl Fn(Option<C>) -> String) -> String {
    let chip = |category: Option<C>, label: &str| {
        format!(
            r#"<a class="chip{}" href="{}" data-filter>{}</a>"#,
            if selected == category { " selected" } else { "" },
            escape_html(&href(category)),
            escape_html(label)
        )
    };

    let mut chips = chip(None, "All");
    for category in C::all() {
        chips.push_str(&chip(Some(*category), category.label()));
    }
    format!(r#"<nav class="chips">{}</nav>"#, chips)
}

/// Script driving filter changes through the fragment endpoint
const FRAGMENT_SCRIPT: &str = r#"<script>
(function () {
    var region = document.getElementById('list-region');
    var loading = document.getElementById('list-loading');
    var latest = 0;
    document.querySelectorAll('a[data-filter]').forEach(function (chip) {
        chip.addEventListener('click', function (event) {
            event.preventDefault();
            var request = ++latest;
            var url = new URL(chip.href, window.location.href);
            document.querySelectorAll('a[data-filter]').forEach(function (c) {
                c.classList.toggle('selected', c === chip);
            });
            region.innerHTML = loading.innerHTML;
            fetch(region.dataset.fragment + url.search)
                .then(function (response) {
                    // Error pages never replace the list
                    if (!response.ok) { throw new Error(response.status); }
                    return response.text();
                })
                .then(function (html) {
                    if (request !== latest) { return; }
                    region.innerHTML = html;
                    history.replaceState(null, '', url.pathname + url.search);
                })
                .catch(function () {
                    if (request === latest) { window.location = url.href; }
                });
        });
    });
})();
</script>"#;

/// Chips, the list region and its loading template
pub fn render_filtered_list<R: Card>(
    base_path: &str,
    selected: Option<R::Category>,
    state: &ListState<R>,
    empty_message: &str,
) -> String {
    format!(
        r#"{chips}
<template id="list-loading">{loading}</template>
<section id="list-region" data-fragment="{base}/list">{list}</section>
{script}"#,
        chips = filter_chips(base_path, selected),
        loading = LOADING_MARKUP,
        base = escape_html(base_path),
        list = render_list(state, empty_message),
        script = FRAGMENT_SCRIPT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventCategory, GalleryImage, TeamCategory};

    #[test]
    fn test_state_from_records() {
        let state: ListState<u8> = ListState::from_records(vec![]);
        assert_eq!(state, ListState::Empty);
        assert!(state.is_empty());
        assert_eq!(ListState::from_records(vec![1u8, 2]).len(), 2);
    }

    #[test]
    fn test_chips_mark_selection() {
        let html = filter_chips("/team", Some(TeamCategory::Faculty));
        assert!(html.contains(r#"<a class="chip" href="/team" data-filter>All</a>"#));
        assert!(html.contains(r#"<a class="chip selected" href="/team?category=faculty" data-filter>Faculty</a>"#));

        let html = filter_chips::<EventCategory>("/events", None);
        assert!(html.contains("/events?category=PIXEL%20FUSION"));
        assert!(html.contains(r#"<a class="chip selected" href="/events" data-filter>All</a>"#));
    }

    #[test]
    fn test_render_states() {
        let loading: ListState<GalleryImage> = ListState::Loading;
        assert_eq!(render_list(&loading, "none"), LOADING_MARKUP);
        let empty: ListState<GalleryImage> = ListState::Empty;
        assert!(render_list(&empty, "No photos yet").contains("No photos yet"));

        let page = render_filtered_list("/gallery", None, &empty, "No photos yet");
        assert!(page.contains(r#"data-fragment="/gallery/list""#));
        assert!(page.contains(r#"<template id="list-loading">"#));
    }

    #[test]
    fn test_failed_fragment_falls_back_to_navigation() {
        let page = render_filtered_list::<GalleryImage>("/gallery", None, &ListState::Empty, "none");
        let status_check = page.find("if (!response.ok)").unwrap();
        let swap = page.find("region.innerHTML = html").unwrap();
        assert!(status_check < swap);
        assert!(page.contains("window.location = url.href"));
    }
}
