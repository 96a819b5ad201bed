//! Domain Error Code Mapping
//!
//! One shared lookup table from upstream error codes to field-level
//! messages, used by every step controller. A code missing from this table
//! is unrecognized and must bubble to the generic error handler instead of
//! being rendered as a field error.

use wizard_core::form::FormErrors;

/// Mapping from an upstream domain error code to a field error
#[derive(Clone, Copy, Debug)]
pub struct ErrorMapping {
    /// Upstream `code` value
    pub code: &'static str,

    /// Form field the error attaches to
    pub field: &'static str,

    /// Error-summary text
    pub summary_text: &'static str,

    /// Inline message next to the field
    pub field_message: &'static str,
}

impl ErrorMapping {
    /// Render this mapping as a one-entry form error set
    pub fn to_form_errors(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        errors.add_with_summary(self.field, self.summary_text, self.field_message);
        errors
    }
}

const MAPPINGS: &[ErrorMapping] = &[
    ErrorMapping {
        code: "bank_account_unusable",
        field: "sort_code",
        summary_text: "The bank account provided cannot be used. Contact GOV.UK Pay for assistance.",
        field_message: "The bank account provided cannot be used. Contact GOV.UK Pay for assistance.",
    },
    ErrorMapping {
        code: "invalid_sort_code",
        field: "sort_code",
        summary_text: "Enter a valid sort code like 309430",
        field_message: "Enter a valid sort code like 309430",
    },
    ErrorMapping {
        code: "invalid_account_number",
        field: "account_number",
        summary_text: "Enter a valid account number like 00733445",
        field_message: "Enter a valid account number like 00733445",
    },
    ErrorMapping {
        code: "telephone_number_invalid",
        field: "telephone_number",
        summary_text: "Enter a valid telephone number",
        field_message: "Enter a valid telephone number",
    },
    ErrorMapping {
        code: "vat_number_invalid",
        field: "vat_number",
        summary_text: "Enter a valid VAT registration number",
        field_message: "Enter a valid VAT registration number",
    },
];

/// Look up a recognized domain error code
pub fn map_domain_error(code: &str) -> Option<&'static ErrorMapping> {
    MAPPINGS.iter().find(|m| m.code == code)
}
