//! Raw form values and field validation shared by the record forms

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::category::Category;
use crate::utils::errors::{Result, TechClubError};
use crate::utils::helpers::is_http_url;

/// Submitted text fields of a record form, keyed by column name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormFields(BTreeMap<String, String>);

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Builder form of [`FormFields::insert`]
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.insert(name, value);
        self
    }

    /// Trimmed value, `None` when absent or blank
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Raw value as submitted, for re-populating a form
    pub fn raw(&self, name: &str) -> &str {
        self.0.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|v| v.trim().is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }

    pub fn required(&self, name: &str, label: &str) -> Result<String> {
        self.get(name)
            .map(str::to_string)
            .ok_or_else(|| TechClubError::Validation(format!("{} is required", label)))
    }

    pub fn optional(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_string)
    }

    pub fn required_category<C: Category>(&self, name: &str) -> Result<C> {
        let raw = self.required(name, "Category")?;
        C::parse(&raw)
            .ok_or_else(|| TechClubError::Validation(format!("Unknown category: {}", raw)))
    }

    /// Optional link, rejected unless it is an absolute http(s) URL
    pub fn optional_link(&self, name: &str, label: &str) -> Result<Option<String>> {
        match self.get(name) {
            Some(link) if is_http_url(link) => Ok(Some(link.to_string())),
            Some(_) => Err(TechClubError::Validation(format!(
                "{} must be an http(s) link",
                label
            ))),
            None => Ok(None),
        }
    }

    pub fn required_date(&self, name: &str, label: &str) -> Result<NaiveDate> {
        let raw = self.required(name, label)?;
        NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map_err(|_| TechClubError::Validation(format!("{} must look like 2024-09-21", label)))
    }

    /// Accepts `HH:MM` as sent by time inputs, or `HH:MM:SS`
    pub fn required_time(&self, name: &str, label: &str) -> Result<NaiveTime> {
        let raw = self.required(name, label)?;
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(|_| TechClubError::Validation(format!("{} must look like 18:30", label)))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TeamCategory;
    use assert_matches::assert_matches;

    #[test]
    fn test_blank_values_count_as_missing() {
        let form = FormFields::new().with("title", "   ").with("venue", " Hall A ");
        assert_eq!(form.get("title"), None);
        assert_eq!(form.get("venue"), Some("Hall A"));
        assert_eq!(form.raw("venue"), " Hall A ");
        assert_matches!(form.required("title", "Title"), Err(TechClubError::Validation(msg)) if msg == "Title is required");
    }

    #[test]
    fn test_category_parsing() {
        let form = FormFields::new().with("category", "Faculty");
        assert_eq!(form.required_category::<TeamCategory>("category").unwrap(), TeamCategory::Faculty);

        let form = FormFields::new().with("category", "Alumni");
        assert!(form.required_category::<TeamCategory>("category").is_err());
    }

    #[test]
    fn test_links_and_times() {
        let form = FormFields::new()
            .with("form_link", "https://forms.example.com/x")
            .with("chat_link", "ftp://example.com")
            .with("date", "2025-02-14")
            .with("time", "18:30");
        assert!(form.optional_link("form_link", "Form link").unwrap().is_some());
        assert!(form.optional_link("chat_link", "Chat link").is_err());
        assert!(form.optional_link("missing", "Missing").unwrap().is_none());
        assert_eq!(form.required_date("date", "Date").unwrap().to_string(), "2025-02-14");
        assert_eq!(form.required_time("time", "Time").unwrap().to_string(), "18:30:00");
    }
}
