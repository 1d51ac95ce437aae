//! Server-rendered HTML views
//!
//! Pages are assembled as plain strings; all user-provided content goes
//! through [`escape_html`] before it reaches the page.

use crate::auth::CurrentUser;
use crate::flash::Flash;
use crate::models::{Product, ProductView};

/// Escape text for safe interpolation into HTML
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, flash: Option<Flash>, body: &str) -> String {
    let banner = match flash {
        Some(flash) => format!(r#"<p class="flash">{}</p>"#, flash.message()),
        None => String::new(),
    };
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>{title} - Shelflife</title></head>
<body>
<h1>{title}</h1>
{banner}
{body}
</body>
</html>"#
    )
}

/// Login page with the post-redirect flash, if any
pub fn login_page(flash: Option<Flash>) -> String {
    layout(
        "Login",
        flash,
        r#"<form method="post" action="/login">
<label>Username <input name="username"></label>
<label>Password <input name="password" type="password"></label>
<button type="submit">Login</button>
</form>
<p><a href="/register">Register</a></p>"#,
    )
}

/// Registration page
pub fn register_page(flash: Option<Flash>) -> String {
    layout(
        "Register",
        flash,
        r#"<form method="post" action="/register">
<label>Username <input name="username"></label>
<label>Password <input name="password" type="password"></label>
<button type="submit">Register</button>
</form>
<p><a href="/login">Login</a></p>"#,
    )
}

/// Dashboard listing the user's products with days remaining
pub fn dashboard_page(
    user: &CurrentUser,
    products: &[ProductView],
    search: &str,
    flash: Option<Flash>,
) -> String {
    let mut rows = String::new();
    for view in products {
        let p = &view.product;
        rows.push_str(&format!(
            r#"<tr><td>{}</td><td>{}</td><td>{:.2}</td><td>{}</td><td>{}</td><td><a href="/edit/{id}">Edit</a> <a href="/delete/{id}">Delete</a></td></tr>
"#,
            escape_html(&p.name),
            escape_html(&p.kind),
            p.price,
            p.expiry_date.format("%Y-%m-%d"),
            view.days_remaining,
            id = p.id,
        ));
    }

    let body = format!(
        r#"<p>Logged in as {} | <a href="/logout">Logout</a></p>
<form method="get" action="/dashboard">
<input name="search" value="{}" placeholder="Search by name">
<button type="submit">Search</button>
</form>
<p><a href="/add">Add product</a></p>
<table>
<tr><th>Name</th><th>Type</th><th>Price</th><th>Expiry date</th><th>Days remaining</th><th></th></tr>
{rows}</table>"#,
        escape_html(&user.username),
        escape_html(search),
    );
    layout("Dashboard", flash, &body)
}

/// Empty add-product form
pub fn add_product_page(flash: Option<Flash>) -> String {
    layout("Add product", flash, &product_form("/add", None))
}

/// Edit form pre-filled with the product's current fields
pub fn edit_product_page(product: &Product, flash: Option<Flash>) -> String {
    layout(
        "Edit product",
        flash,
        &product_form(&format!("/edit/{}", product.id), Some(product)),
    )
}

fn product_form(action: &str, existing: Option<&Product>) -> String {
    let (name, kind, price, expiry_date) = match existing {
        Some(p) => (
            escape_html(&p.name),
            escape_html(&p.kind),
            format!("{}", p.price),
            p.expiry_date.format("%Y-%m-%d").to_string(),
        ),
        None => (String::new(), String::new(), String::new(), String::new()),
    };
    format!(
        r#"<form method="post" action="{action}">
<label>Name <input name="name" value="{name}"></label>
<label>Type <input name="type" value="{kind}"></label>
<label>Price <input name="price" value="{price}"></label>
<label>Expiry date <input name="expiry_date" value="{expiry_date}" placeholder="YYYY-MM-DD"></label>
<button type="submit">Save</button>
</form>
<p><a href="/dashboard">Back to dashboard</a></p>"#
    )
}

/// 404 page for unknown product ids
pub fn not_found_page() -> String {
    layout("Not found", None, r#"<p>The requested item does not exist.</p>
<p><a href="/dashboard">Back to dashboard</a></p>"#)
}

/// Generic 500 page
pub fn error_page() -> String {
    layout(
        "Something went wrong",
        None,
        r#"<p>An internal error occurred. Please try again.</p>"#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x&y")</script>"#),
            "&lt;script&gt;alert(&quot;x&amp;y&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("Milk"), "Milk");
    }

    #[test]
    fn test_dashboard_escapes_user_content() {
        let user = CurrentUser {
            id: 1,
            username: "alice".to_string(),
        };
        let product = Product {
            id: 3,
            name: "<b>Milk</b>".to_string(),
            kind: "Dairy".to_string(),
            price: 3.5,
            expiry_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            user_id: 1,
        };
        let views = vec![ProductView {
            days_remaining: 5,
            product,
        }];
        let page = dashboard_page(&user, &views, "", None);

        assert!(page.contains("&lt;b&gt;Milk&lt;/b&gt;"));
        assert!(!page.contains("<b>Milk</b>"));
        assert!(page.contains("/edit/3"));
        assert!(page.contains("/delete/3"));
    }

    #[test]
    fn test_flash_banner_renders_message() {
        let page = login_page(Some(Flash::InvalidCredentials));
        assert!(page.contains("Invalid credentials"));
    }

    #[test]
    fn test_edit_form_is_prefilled() {
        let product = Product {
            id: 9,
            name: "Eggs".to_string(),
            kind: "Dairy".to_string(),
            price: 4.0,
            expiry_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            user_id: 1,
        };
        let page = edit_product_page(&product, None);
        assert!(page.contains(r#"action="/edit/9""#));
        assert!(page.contains(r#"value="Eggs""#));
        assert!(page.contains(r#"value="2025-06-01""#));
    }
}
