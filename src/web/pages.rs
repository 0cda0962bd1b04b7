//! Server-rendered HTML pages for Shelf.
//!
//! Pages are built as plain strings with a shared layout. All dynamic
//! values pass through `escape_html` before interpolation.

use crate::db::Resource;

/// Escape a string for safe interpolation into HTML text or attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap page content in the shared HTML layout.
fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{} - Shelf</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        body
    )
}

/// The about page.
pub fn about_page() -> String {
    layout(
        "About",
        "<h1>About Shelf</h1>\n\
         <p>Shelf is a personal file storage service. Sign up, upload files, \
         organize them into folders, and download them from anywhere.</p>\n\
         <p><a href=\"/signup\">Sign up</a> | <a href=\"/login\">Log in</a></p>",
    )
}

/// The signup form, optionally with an error message above it.
pub fn signup_page(error: Option<&str>) -> String {
    let error_html = match error {
        Some(msg) => format!("<p class=\"error\">{}</p>\n", escape_html(msg)),
        None => String::new(),
    };

    let body = format!(
        "<h1>Sign Up</h1>\n{}\
         <form method=\"post\" action=\"/signup\">\n\
         <label>Username <input type=\"text\" name=\"username\" required></label><br>\n\
         <label>Email <input type=\"email\" name=\"email\"></label><br>\n\
         <label>Password <input type=\"password\" name=\"password\" required></label><br>\n\
         <button type=\"submit\">Sign Up</button>\n\
         </form>\n\
         <p>Already have an account? <a href=\"/login\">Log in</a></p>",
        error_html
    );

    layout("Sign Up", &body)
}

/// The login form, optionally with an error message above it.
pub fn login_page(error: Option<&str>) -> String {
    let error_html = match error {
        Some(msg) => format!("<p class=\"error\">{}</p>\n", escape_html(msg)),
        None => String::new(),
    };

    let body = format!(
        "<h1>Log In</h1>\n{}\
         <form method=\"post\" action=\"/login\">\n\
         <label>Username <input type=\"text\" name=\"username\" required></label><br>\n\
         <label>Password <input type=\"password\" name=\"password\" required></label><br>\n\
         <button type=\"submit\">Log In</button>\n\
         </form>\n\
         <p>No account yet? <a href=\"/signup\">Sign up</a></p>",
        error_html
    );

    layout("Log In", &body)
}

/// Translate a dashboard `?error=` code into user-facing text.
///
/// Unknown codes fall back to a generic message rather than echoing the
/// query parameter.
pub fn dashboard_error_message(code: &str) -> &'static str {
    match code {
        "NoFileUploaded" => "No file was uploaded.",
        "DatabaseError" => "A database error occurred. Please try again.",
        "FolderNameRequired" => "Folder name is required.",
        "DeleteFailed" => "Could not delete the item.",
        _ => "Something went wrong.",
    }
}

/// The dashboard: the caller's root listing plus upload and folder forms.
pub fn dashboard_page(username: &str, entries: &[Resource], error: Option<&str>) -> String {
    let error_html = match error {
        Some(code) => format!(
            "<p class=\"error\">{}</p>\n",
            escape_html(dashboard_error_message(code))
        ),
        None => String::new(),
    };

    let mut listing = String::new();
    if entries.is_empty() {
        listing.push_str("<p>Nothing here yet. Upload a file or create a folder.</p>\n");
    } else {
        listing.push_str("<ul>\n");
        for entry in entries {
            let name = escape_html(&entry.name);
            let actions = if entry.is_folder() {
                format!(
                    "<form method=\"post\" action=\"/delete/{}\" style=\"display:inline\">\
                     <button type=\"submit\">Delete</button></form>",
                    entry.id
                )
            } else {
                let key = entry.storage_key.as_deref().unwrap_or("");
                format!(
                    "<a href=\"/download/{}\">Download</a> \
                     <form method=\"post\" action=\"/delete/{}\" style=\"display:inline\">\
                     <button type=\"submit\">Delete</button></form>",
                    escape_html(&urlencoding::encode(key)),
                    entry.id
                )
            };
            let icon = if entry.is_folder() { "&#128193;" } else { "&#128196;" };
            listing.push_str(&format!(
                "<li>{} {} {}</li>\n",
                icon, name, actions
            ));
        }
        listing.push_str("</ul>\n");
    }

    let body = format!(
        "<h1>{}'s Shelf</h1>\n\
         <p><a href=\"/logout\">Log out</a></p>\n\
         {}\
         {}\
         <h2>Upload a file</h2>\n\
         <form method=\"post\" action=\"/upload\" enctype=\"multipart/form-data\">\n\
         <input type=\"file\" name=\"file\">\n\
         <button type=\"submit\">Upload</button>\n\
         </form>\n\
         <h2>Create a folder</h2>\n\
         <form method=\"post\" action=\"/create-folder\">\n\
         <input type=\"text\" name=\"folder_name\">\n\
         <button type=\"submit\">Create</button>\n\
         </form>",
        escape_html(username),
        error_html,
        listing
    );

    layout("Dashboard", &body)
}

/// A bare error page used by `PageError`.
pub fn error_page(message: &str) -> String {
    let body = format!(
        "<h1>Error</h1>\n<p>{}</p>\n<p><a href=\"/dashboard\">Back to dashboard</a></p>",
        escape_html(message)
    );
    layout("Error", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ResourceKind;

    fn resource(id: i64, kind: ResourceKind, name: &str, key: Option<&str>) -> Resource {
        Resource {
            id,
            user_id: 1,
            kind,
            name: name.to_string(),
            storage_key: key.map(|k| k.to_string()),
            parent_id: None,
            created_at: "2026-01-01 00:00:00".to_string(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("a & b \"c\""), "a &amp; b &quot;c&quot;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_signup_page_shows_error() {
        let page = signup_page(Some("That username or email is already taken."));
        assert!(page.contains("That username or email is already taken."));
        assert!(page.contains("action=\"/signup\""));

        let clean = signup_page(None);
        assert!(!clean.contains("class=\"error\""));
    }

    #[test]
    fn test_login_page_shows_error() {
        let page = login_page(Some("Incorrect username or password."));
        assert!(page.contains("Incorrect username or password."));
    }

    #[test]
    fn test_dashboard_empty() {
        let page = dashboard_page("alice", &[], None);
        assert!(page.contains("alice"));
        assert!(page.contains("Nothing here yet"));
    }

    #[test]
    fn test_dashboard_lists_entries() {
        let entries = vec![
            resource(1, ResourceKind::Folder, "Docs", None),
            resource(2, ResourceKind::File, "a.txt", Some("100-a.txt")),
        ];
        let page = dashboard_page("bob", &entries, None);
        assert!(page.contains("Docs"));
        assert!(page.contains("a.txt"));
        assert!(page.contains("/download/100-a.txt"));
        assert!(page.contains("/delete/1"));
        assert!(page.contains("/delete/2"));
    }

    #[test]
    fn test_dashboard_escapes_names() {
        let entries = vec![resource(
            1,
            ResourceKind::File,
            "<img src=x>",
            Some("100-img"),
        )];
        let page = dashboard_page("eve", &entries, None);
        assert!(!page.contains("<img src=x>"));
        assert!(page.contains("&lt;img src=x&gt;"));
    }

    #[test]
    fn test_dashboard_error_codes() {
        assert_eq!(
            dashboard_error_message("NoFileUploaded"),
            "No file was uploaded."
        );
        assert_eq!(
            dashboard_error_message("FolderNameRequired"),
            "Folder name is required."
        );
        assert_eq!(dashboard_error_message("bogus"), "Something went wrong.");

        let page = dashboard_page("carl", &[], Some("DeleteFailed"));
        assert!(page.contains("Could not delete the item."));
    }
}
