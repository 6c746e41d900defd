//! Server-rendered pages.
//!
//! Deliberately small: enough HTML for the login/register/dashboard flows to
//! work in a browser against the JSON API. The interception layer has already
//! run by the time any of these handlers execute, so dashboard handlers trust
//! the attached identity and never touch the token themselves.

use axum::{
    extract::State,
    response::Html,
};

use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::auth::CurrentIdentity;

/// Posts the enclosing form as JSON to `data-action`, then navigates to
/// `data-destination`. Shared by the login and register pages.
const SUBMIT_SCRIPT: &str = r#"<script>
const form = document.getElementById('credential-form');
form.addEventListener('submit', async (event) => {
  event.preventDefault();
  const body = JSON.stringify(Object.fromEntries(new FormData(form)));
  const response = await fetch(form.dataset.action, {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    credentials: 'same-origin',
    body,
  });
  if (response.ok) {
    window.location.href = form.dataset.destination;
  } else {
    const payload = await response.json().catch(() => ({}));
    document.getElementById('form-error').textContent =
      payload.message || 'Something went wrong.';
  }
});
</script>"#;

/// Logout button: POST to `data-action`, then back to `data-destination`.
const LOGOUT_SCRIPT: &str = r#"<script>
const button = document.getElementById('logout');
button.addEventListener('click', async () => {
  await fetch(button.dataset.action, { method: 'POST', credentials: 'same-origin' });
  window.location.href = button.dataset.destination;
});
</script>"#;

/// Escape a user-derived value for interpolation into HTML text or
/// double-quoted attributes.
fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Wrap page content in the shared document shell.
fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title} · Wayfare</title>\n</head>\n<body>\n<main>\n{body}\n</main>\n</body>\n</html>\n"
    ))
}

fn credential_form(action: &str, destination: &str, fields: &str, submit_label: &str) -> String {
    format!(
        "<form id=\"credential-form\" data-action=\"{action}\" data-destination=\"{destination}\">\n\
         {fields}\n\
         <button type=\"submit\">{submit_label}</button>\n\
         <p id=\"form-error\" role=\"alert\"></p>\n\
         </form>\n{SUBMIT_SCRIPT}"
    )
}

fn login_fields() -> &'static str {
    "<label>Email <input type=\"email\" name=\"email\" required></label>\n\
     <label>Password <input type=\"password\" name=\"password\" required></label>"
}

fn logout_button(action: &str, destination: &str) -> String {
    format!(
        "<button id=\"logout\" data-action=\"{action}\" data-destination=\"{destination}\">Log out</button>\n{LOGOUT_SCRIPT}"
    )
}

/// GET / — public landing page.
pub async fn landing() -> Html<String> {
    page(
        "Welcome",
        "<h1>Wayfare</h1>\n\
         <p>Discover destinations, events, and tickets.</p>\n\
         <nav>\n\
         <a href=\"/consumer/login\">Sign in</a>\n\
         <a href=\"/consumer/register\">Create an account</a>\n\
         <a href=\"/admin/login\">Staff sign-in</a>\n\
         </nav>",
    )
}

/// GET /consumer/login
pub async fn consumer_login_page() -> Html<String> {
    let body = format!(
        "<h1>Sign in</h1>\n{}\n<p><a href=\"/consumer/register\">Need an account?</a></p>",
        credential_form(
            "/api/consumer/login",
            "/consumer/dashboard",
            login_fields(),
            "Sign in",
        )
    );
    page("Sign in", &body)
}

/// GET /consumer/register
pub async fn consumer_register_page() -> Html<String> {
    let fields = "<label>Name <input type=\"text\" name=\"name\"></label>\n\
                  <label>Email <input type=\"email\" name=\"email\" required></label>\n\
                  <label>Password <input type=\"password\" name=\"password\" required minlength=\"6\"></label>";
    let body = format!(
        "<h1>Create an account</h1>\n{}\n<p><a href=\"/consumer/login\">Already registered?</a></p>",
        credential_form(
            "/api/consumer/register",
            "/consumer/dashboard",
            fields,
            "Register",
        )
    );
    page("Register", &body)
}

/// GET /admin/login
pub async fn admin_login_page() -> Html<String> {
    let body = format!(
        "<h1>Staff sign-in</h1>\n{}",
        credential_form(
            "/api/admin/login",
            "/admin/dashboard",
            login_fields(),
            "Sign in",
        )
    );
    page("Staff sign-in", &body)
}

/// GET /consumer/dashboard
pub async fn consumer_dashboard(CurrentIdentity(user): CurrentIdentity) -> Html<String> {
    let body = format!(
        "<h1>Welcome, {name}</h1>\n\
         <p>Signed in as {email} ({role}).</p>\n\
         <p>Your saved destinations and tickets will appear here.</p>\n\
         {logout}",
        name = escape_html(user.display_name()),
        email = escape_html(&user.email),
        role = user.role,
        logout = logout_button("/api/consumer/logout", "/consumer/login"),
    );
    page("Dashboard", &body)
}

/// GET /admin/dashboard
pub async fn admin_dashboard(
    State(state): State<AppState>,
    CurrentIdentity(user): CurrentIdentity,
) -> ApiResult<Html<String>> {
    let stats = state.users.get_stats().await?;

    let body = format!(
        "<h1>Administration</h1>\n\
         <p>Signed in as {name} ({role}).</p>\n\
         <h2>Accounts</h2>\n\
         <table>\n\
         <tr><th>Total</th><td>{total}</td></tr>\n\
         <tr><th>Super admins</th><td>{supers}</td></tr>\n\
         <tr><th>Tourism admins</th><td>{tourism}</td></tr>\n\
         <tr><th>Consumers</th><td>{consumers}</td></tr>\n\
         </table>\n\
         {logout}",
        name = escape_html(user.display_name()),
        role = user.role,
        total = stats.total,
        supers = stats.super_admins,
        tourism = stats.tourism_admins,
        consumers = stats.consumers,
        logout = logout_button("/api/admin/logout", "/admin/login"),
    );
    Ok(page("Administration", &body))
}
