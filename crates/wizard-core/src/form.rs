//! Form Validation Errors
//!
//! Field-keyed error map plus an ordered summary list, the shape every step
//! view renders: the summary links to the offending input via an anchor
//! (`#<field>-input`), the map supplies the inline message next to the field.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One entry in the error summary list
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Anchor link to the input, e.g. `#sort-code-input`
    pub href: String,

    /// Summary message shown at the top of the page
    pub text: String,
}

/// Validation errors for one form submission
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FormErrors {
    /// Ordered summary entries, first error first
    pub summary: Vec<FieldError>,

    /// Inline message per field
    pub field_errors: HashMap<String, String>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an error where the summary and inline message are the same
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        let message = message.into();
        self.add_with_summary(field, message.clone(), message);
    }

    /// Add an error with distinct summary and inline messages
    pub fn add_with_summary(
        &mut self,
        field: &str,
        summary_text: impl Into<String>,
        field_message: impl Into<String>,
    ) {
        self.summary.push(FieldError {
            href: anchor(field),
            text: summary_text.into(),
        });
        self.field_errors
            .insert(field.to_string(), field_message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.summary.is_empty()
    }

    /// Inline message for a field, if any
    pub fn field(&self, field: &str) -> Option<&str> {
        self.field_errors.get(field).map(String::as_str)
    }
}

/// Anchor id convention for input elements
pub fn anchor(field: &str) -> String {
    format!("#{}-input", field.replace('_', "-"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_convention() {
        assert_eq!(anchor("sort_code"), "#sort-code-input");
    }

    #[test]
    fn test_summary_preserves_order() {
        let mut errors = FormErrors::new();
        errors.add("sort_code", "Enter a sort code");
        errors.add("account_number", "Enter an account number");

        assert_eq!(errors.summary.len(), 2);
        assert_eq!(errors.summary[0].href, "#sort-code-input");
        assert_eq!(errors.summary[1].text, "Enter an account number");
        assert_eq!(errors.field("sort_code"), Some("Enter a sort code"));
    }
}
