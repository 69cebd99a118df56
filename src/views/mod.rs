//! Server-rendered HTML views
//!
//! Views are plain functions from data to markup. Every interpolated value
//! goes through `escape_html`.

pub mod admin;
pub mod cards;
pub mod forms;
pub mod home;
pub mod layout;
pub mod list;
pub mod login;

pub use admin::AdminView;
pub use cards::Card;
pub use layout::{render_page, Nav};
pub use list::{render_filtered_list, render_list, ListState};
