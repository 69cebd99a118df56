//! Sign-in page

use crate::utils::helpers::escape_html;

pub fn render_login(email: &str, error: Option<&str>) -> String {
    let error = error
        .map(|message| format!(r#"<div class="notice error" role="alert">{}</div>"#, escape_html(message)))
        .unwrap_or_default();

    format!(
        r#"<h1>Admin sign in</h1>
{error}
<form class="record" method="post" action="/login">
    <label for="email">Email</label><input type="email" id="email" name="email" value="{email}" required autofocus>
    <label for="password">Password</label><input type="password" id="password" name="password" required>
    <p><button type="submit">Sign in</button></p>
</form>"#,
        error = error,
        email = escape_html(email)
    )
}
