//! Landing page

use super::cards::Card;
use crate::models::{Category, Event, EventCategory};

const CLUBS: [(EventCategory, &str); 4] = [
    (EventCategory::Technova, "Technology, innovation and emerging trends."),
    (EventCategory::BrainMasters, "Logical reasoning, coding contests and problem solving."),
    (EventCategory::PixelFusion, "Graphic design, UI/UX and visual storytelling."),
    (EventCategory::SportsAndCulturals, "Sports, music, dance and cultural activities."),
];

/// Hero, club overview and the most recent events
pub fn render_home(recent_events: &[Event]) -> String {
    let clubs: String = CLUBS
        .iter()
        .map(|(category, blurb)| {
            format!(
                r#"<a class="card" href="/events?category={query}"><div class="body"><h3>{label}</h3><p>{blurb}</p></div></a>"#,
                query = urlencoding::encode(category.as_str()),
                label = category.label(),
                blurb = blurb
            )
        })
        .collect();

    let recent = if recent_events.is_empty() {
        r#"<div class="state empty">No events announced yet</div>"#.to_string()
    } else {
        let cards: String = recent_events.iter().map(Card::render_card).collect();
        format!(r#"<div class="grid">{}</div>"#, cards)
    };

    format!(
        r#"<section>
    <h1>Welcome to CETA</h1>
    <p>Empowering students to innovate, create and lead in the world of technology.</p>
</section>
<h2>Our clubs</h2>
<div class="grid">{clubs}</div>
<h2>Latest events</h2>
{recent}"#,
        clubs = clubs,
        recent = recent
    )
}
