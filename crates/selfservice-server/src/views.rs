//! HTML Views
//!
//! Server-rendered pages for the wizard. Templates are plain functions
//! building escaped HTML; the error summary and inline field messages
//! follow the `{href, text}` anchor convention from `wizard_core::form`.

use std::collections::HashMap;

use psp_onboarding::step_names;
use wizard_core::form::FormErrors;
use wizard_core::{ProgressFlags, WizardPlan};

/// Escape text for HTML interpolation
pub fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Base path of the wizard for one account
pub fn wizard_path(account_id: &str) -> String {
    format!("/account/{}/stripe-setup", account_id)
}

/// Path of one step page
pub fn step_path(account_id: &str, slug: &str) -> String {
    format!("{}/{}", wizard_path(account_id), slug)
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{} - Self-service</title></head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    )
}

/// Human-readable title for a step
pub fn step_title(step: &str) -> &'static str {
    match step {
        step_names::BANK_DETAILS => "Bank details",
        step_names::RESPONSIBLE_PERSON => "Responsible person",
        step_names::VAT_NUMBER => "VAT number",
        step_names::COMPANY_NUMBER => "Company registration number",
        step_names::DIRECTOR => "Director",
        step_names::GOVERNMENT_ENTITY_DOCUMENT => "Government entity document",
        _ => "Stripe setup",
    }
}

fn error_summary(errors: &FormErrors) -> String {
    if errors.is_empty() {
        return String::new();
    }

    let items: String = errors
        .summary
        .iter()
        .map(|e| format!("<li><a href=\"{}\">{}</a></li>", escape(&e.href), escape(&e.text)))
        .collect();

    format!(
        "<div class=\"error-summary\" role=\"alert\"><h2>There is a problem</h2><ul>{}</ul></div>",
        items
    )
}

fn text_input(
    name: &str,
    label: &str,
    values: &HashMap<String, String>,
    errors: &FormErrors,
) -> String {
    let id = format!("{}-input", name.replace('_', "-"));
    let value = values.get(name).map(String::as_str).unwrap_or("");
    let message = errors
        .field(name)
        .map(|m| format!("<span class=\"field-error\">{}</span>", escape(m)))
        .unwrap_or_default();

    format!(
        "<div class=\"form-group\"><label for=\"{id}\">{label}</label>{message}<input id=\"{id}\" name=\"{name}\" type=\"text\" value=\"{value}\"></div>",
        id = id,
        label = escape(label),
        message = message,
        name = name,
        value = escape(value),
    )
}

fn declaration_radios(values: &HashMap<String, String>, errors: &FormErrors) -> String {
    let chosen = values
        .get("company_number_declaration")
        .map(String::as_str)
        .unwrap_or("");
    let message = errors
        .field("company_number_declaration")
        .map(|m| format!("<span class=\"field-error\">{}</span>", escape(m)))
        .unwrap_or_default();

    // Only the first radio carries the anchor id the error summary links to
    let radio = |value: &str, label: &str, id: &str| {
        format!(
            "<label><input{id} type=\"radio\" name=\"company_number_declaration\" value=\"{value}\"{checked}> {label}</label>",
            id = if id.is_empty() { String::new() } else { format!(" id=\"{}\"", id) },
            value = value,
            checked = if chosen == value { " checked" } else { "" },
            label = label,
        )
    };

    format!(
        "<fieldset><legend>Does your organisation have a company registration number?</legend>{}{}{}</fieldset>",
        message,
        radio("yes", "Yes", "company-number-declaration-input"),
        radio("no", "No", ""),
    )
}

fn step_fields(step: &str, values: &HashMap<String, String>, errors: &FormErrors) -> String {
    match step {
        step_names::BANK_DETAILS => [
            text_input("sort_code", "Sort code", values, errors),
            text_input("account_number", "Account number", values, errors),
        ]
        .concat(),
        step_names::RESPONSIBLE_PERSON => [
            text_input("first_name", "First name", values, errors),
            text_input("last_name", "Last name", values, errors),
            text_input("telephone_number", "Telephone number", values, errors),
            text_input("email", "Email address", values, errors),
        ]
        .concat(),
        step_names::VAT_NUMBER => text_input("vat_number", "VAT number", values, errors),
        step_names::COMPANY_NUMBER => [
            declaration_radios(values, errors),
            text_input("company_number", "Company registration number", values, errors),
        ]
        .concat(),
        step_names::DIRECTOR => [
            text_input("first_name", "First name", values, errors),
            text_input("last_name", "Last name", values, errors),
            text_input("email", "Email address", values, errors),
        ]
        .concat(),
        step_names::GOVERNMENT_ENTITY_DOCUMENT => {
            text_input("document_reference", "Document reference", values, errors)
        }
        _ => String::new(),
    }
}

/// Render one step's form page
pub fn step_page(
    account_id: &str,
    step: &str,
    values: &HashMap<String, String>,
    errors: &FormErrors,
) -> String {
    let title = step_title(step);
    let body = format!(
        "{summary}<h1>{title}</h1><form method=\"post\" action=\"{action}\">{fields}<button type=\"submit\">Save and continue</button></form>",
        summary = error_summary(errors),
        title = escape(title),
        action = escape(&step_path(account_id, step)),
        fields = step_fields(step, values, errors),
    );
    layout(title, &body)
}

/// Render the task-list overview page
pub fn task_list_page(
    account_id: &str,
    plan: &WizardPlan,
    flags: &ProgressFlags,
    flash: Option<&str>,
) -> String {
    let banner = match flash {
        Some("already-completed") => {
            "<div class=\"notification\" role=\"status\">You\u{2019}ve already provided these details. You cannot change them here.</div>".to_string()
        }
        _ => String::new(),
    };

    let rows: String = plan
        .steps()
        .iter()
        .map(|step| {
            let status = if flags.is_complete(step.flag) {
                "Completed".to_string()
            } else {
                format!(
                    "<a href=\"{}\">Not started</a>",
                    escape(&step_path(account_id, step.slug))
                )
            };
            format!(
                "<li><span>{}</span> <span class=\"status\">{}</span></li>",
                escape(step_title(step.name)),
                status
            )
        })
        .collect();

    let body = format!(
        "{banner}<h1>Set up Stripe</h1><ol class=\"task-list\">{rows}</ol>",
        banner = banner,
        rows = rows
    );
    layout("Set up Stripe", &body)
}

/// Render the all-steps-complete page
pub fn complete_page(account_id: &str) -> String {
    let body = format!(
        "<h1>Stripe setup complete</h1><p>You have provided everything needed to take payments.</p><p><a href=\"{}\">View your setup</a></p>",
        escape(&wizard_path(account_id))
    );
    layout("Stripe setup complete", &body)
}

/// Render the generic failure page
pub fn error_page(message: &str) -> String {
    let body = format!(
        "<h1>Sorry, there is a problem</h1><p>{}</p>",
        escape(message)
    );
    layout("Sorry, there is a problem", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("<b>&\"</b>"), "&lt;b&gt;&amp;&quot;&lt;/b&gt;");
    }

    #[test]
    fn test_step_page_preserves_raw_input() {
        let mut values = HashMap::new();
        values.insert("sort_code".to_string(), "30-94-30".to_string());

        let html = step_page("acc-1", step_names::BANK_DETAILS, &values, &FormErrors::new());
        assert!(html.contains("value=\"30-94-30\""));
        assert!(html.contains("/account/acc-1/stripe-setup/bank-details"));
    }

    #[test]
    fn test_error_summary_rendered_with_anchors() {
        let mut errors = FormErrors::new();
        errors.add("sort_code", "Enter a sort code");

        let html = step_page("acc-1", step_names::BANK_DETAILS, &HashMap::new(), &errors);
        assert!(html.contains("href=\"#sort-code-input\""));
        assert!(html.contains("Enter a sort code"));
    }
}
