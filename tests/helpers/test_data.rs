//! Generated form data and multipart bodies

use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::Name;
use fake::Fake;

pub const BOUNDARY: &str = "techclub-test-boundary";

/// A tiny PNG header, enough for anything that only looks at names and sizes
pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0, 0, 0];

/// An image file attached to a form
pub struct TestFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl TestFile {
    pub fn png(file_name: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            content_type: "image/png".to_string(),
            bytes: PNG_BYTES.to_vec(),
        }
    }
}

/// Multipart form body as a browser would send it
pub fn multipart_body(fields: &[(String, String)], file: Option<&TestFile>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some(file) = file {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                BOUNDARY, file.file_name, file.content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(&file.bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}

fn pairs(fields: &[(&str, &str)]) -> Vec<(String, String)> {
    fields
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn event_fields(title: &str, category: &str) -> Vec<(String, String)> {
    let description: String = Sentence(4..8).fake();
    let mut fields = pairs(&[
        ("title", title),
        ("date", "2025-03-01"),
        ("time", "18:30"),
        ("venue", "Seminar Hall"),
        ("category", category),
    ]);
    fields.push(("description".to_string(), description));
    fields
}

pub fn team_fields(name: &str, role: &str, category: &str) -> Vec<(String, String)> {
    pairs(&[("name", name), ("role", role), ("category", category)])
}

/// Team member with a generated name
pub fn random_team_fields(category: &str) -> (String, Vec<(String, String)>) {
    let name: String = Name().fake();
    let fields = team_fields(&name, "Coordinator", category);
    (name, fields)
}

pub fn gallery_fields(title: &str, category: &str) -> Vec<(String, String)> {
    pairs(&[("title", title), ("category", category), ("event_name", "Tech Fest")])
}
