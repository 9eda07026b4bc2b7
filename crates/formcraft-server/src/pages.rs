// File: src/pages.rs
// Purpose: Maud views for every page the server returns

use crate::layout::page;
use crate::routes::form_path;
use crate::routes::responses::ResponseTable;
use formcraft::config::SiteConfig;
use formcraft::{Answers, FormDocument, FormInstance, RenderOptions};
use maud::{html, Markup};

/// Public form: title, description and the live form.
pub fn form_page(site: &SiteConfig, form: &FormDocument, instance: &FormInstance, action: &str) -> Markup {
    page(
        &site.title,
        &form.title,
        html! {
            (form_header(form))
            (instance.render(RenderOptions::new(action)))
        },
    )
}

fn form_header(form: &FormDocument) -> Markup {
    html! {
        h1 { (form.title) }
        @if let Some(description) = form.description.as_deref().filter(|d| !d.trim().is_empty()) {
            p class="description" { (description) }
        }
    }
}

/// Shown after a persisted submission is accepted.
pub fn thank_you_page(site: &SiteConfig, form: &FormDocument, reset_href: &str) -> Markup {
    page(
        &site.title,
        &form.title,
        html! {
            h1 { "Thank you!" }
            p { "Your response to " strong { (form.title) } " has been recorded." }
            a class="reset" href=(reset_href) { "Submit another response" }
        },
    )
}

/// Builder preview; answers are echoed instead of stored.
pub fn preview_page(
    site: &SiteConfig,
    form: &FormDocument,
    instance: &FormInstance,
    action: &str,
    echoed: Option<&Answers>,
) -> Markup {
    page(
        &site.title,
        &format!("Preview: {}", form.title),
        html! {
            div class="preview-banner" { "Preview mode. Submissions are not saved." }
            (form_header(form))
            (instance.render(RenderOptions::new(action).submit_label("Submit preview")))
            @if let Some(answers) = echoed {
                section class="preview-answers" {
                    h2 { "Submitted answers" }
                    pre { (serde_json::to_string_pretty(answers).unwrap_or_default()) }
                }
            }
        },
    )
}

/// A form the backend just generated, ready to try out and share.
pub struct Generated<'a> {
    pub form: &'a FormDocument,
    pub preview: &'a FormInstance,
    pub share_url: String,
}

/// AI generation prompt, plus the generated form once there is one.
pub fn generate_page(
    site: &SiteConfig,
    instance: &FormInstance,
    notice: Option<&str>,
    generated: Option<&Generated<'_>>,
) -> Markup {
    page(
        &site.title,
        "Generate a form",
        html! {
            h1 { "Generate a form" }
            p { "Describe the form you need and give it a title." }
            (instance.render(
                RenderOptions::new("/generate")
                    .submit_label("Generate")
                    .notice(notice.map(str::to_string)),
            ))
            @if let Some(generated) = generated {
                section class="generated" {
                    h2 { (generated.form.title) }
                    p class="share" {
                        "Share link: "
                        a href=(generated.share_url) { (generated.share_url) }
                    }
                    (generated.preview.render(
                        RenderOptions::new(format!("{}/preview", form_path(&generated.form.id)))
                            .submit_label("Submit preview"),
                    ))
                }
            }
        },
    )
}

/// Stored responses as a table.
pub fn responses_page(site: &SiteConfig, form: &FormDocument, table: &ResponseTable) -> Markup {
    page(
        &site.title,
        &format!("Responses: {}", form.title),
        html! {
            h1 { "Responses" }
            p { (form.title) " (" (table.rows.len()) " responses)" }
            @if table.rows.is_empty() {
                p class="empty" { "No responses yet." }
            } @else {
                table {
                    thead {
                        tr {
                            th { "Response ID" }
                            th { "Submitted At" }
                            @for column in &table.columns {
                                th { (column.label) }
                            }
                        }
                    }
                    tbody {
                        @for row in &table.rows {
                            tr {
                                td { (row.id) }
                                td { (row.submitted_at) }
                                @for cell in &row.cells {
                                    td { (cell) }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn not_found_page(site_title: &str) -> Markup {
    page(
        site_title,
        "Form Not Found",
        html! {
            h1 { "Form Not Found" }
            p { "The form you are looking for does not exist or has been removed." }
        },
    )
}

pub fn unavailable_page(site_title: &str, form_title: &str) -> Markup {
    page(
        site_title,
        "Form Not Available",
        html! {
            h1 { "Form Not Available" }
            p {
                "This form is currently unpublished and not accepting responses. "
                "Please contact the form owner for more information."
            }
            @if !form_title.is_empty() {
                p class="status" { (form_title) ": Unpublished" }
            }
        },
    )
}

pub fn error_page(site_title: &str, heading: &str, message: &str) -> Markup {
    page(
        site_title,
        heading,
        html! {
            h1 { (heading) }
            p { (message) }
        },
    )
}
