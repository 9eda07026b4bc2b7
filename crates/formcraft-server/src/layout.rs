// File: src/layout.rs
// Purpose: Page shell shared by every HTML response

use maud::{html, Markup, PreEscaped, DOCTYPE};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; background: #f5f6f8; color: #1f2328; margin: 0; }
main { max-width: 44rem; margin: 3rem auto; background: #fff; padding: 2rem; border-radius: 12px; box-shadow: 0 4px 16px rgba(0,0,0,.06); }
.field { margin-bottom: 1.25rem; display: flex; flex-direction: column; gap: .4rem; }
.field input[type=text], .field input[type=email], .field input[type=number], .field select, .field textarea { padding: .55rem .7rem; border: 1px solid #d0d7de; border-radius: 6px; font: inherit; }
.required { color: #cf222e; }
.field-error { color: #cf222e; font-size: .875rem; margin: 0; }
.form-notice { background: #ffebe9; border: 1px solid #ff8182; padding: .75rem 1rem; border-radius: 6px; margin-bottom: 1rem; }
.preview-banner { background: #ddf4ff; border: 1px solid #54aeff; padding: .75rem 1rem; border-radius: 6px; margin-bottom: 1rem; }
button.submit { width: 100%; padding: .7rem; border: 0; border-radius: 6px; background: #0969da; color: #fff; font: inherit; cursor: pointer; }
button.submit[disabled] { opacity: .6; cursor: progress; }
table { border-collapse: collapse; width: 100%; font-size: .9rem; }
th, td { border: 1px solid #d0d7de; padding: .4rem .6rem; text-align: left; }
pre { background: #f6f8fa; padding: 1rem; border-radius: 6px; overflow-x: auto; }
"#;

/// Renders a full HTML page around `body`.
pub fn page(site_title: &str, title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | " (site_title) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                main { (body) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_shell() {
        let html = page("Formcraft", "Signup", html! { h1 { "Hello" } }).into_string();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Signup | Formcraft</title>"));
        assert!(html.contains("<main><h1>Hello</h1></main>"));
    }

    #[test]
    fn test_title_is_escaped() {
        let html = page("Formcraft", "<script>", html! {}).into_string();

        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<title><script>"));
    }
}
