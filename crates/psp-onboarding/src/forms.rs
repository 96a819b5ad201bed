//! Step Form Payloads
//!
//! One typed payload per wizard step, produced from the raw submitted field
//! map. Parsing trims and normalizes first, then runs presence checks, then
//! format checks, and accumulates failures into [`FormErrors`]. The typed
//! payload always holds normalized values; the caller keeps the raw map for
//! re-display.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use wizard_core::form::FormErrors;

use crate::validate::{
    is_valid_account_number, is_valid_company_number, is_valid_email, is_valid_sort_code,
    is_valid_telephone_number, is_valid_vat_number, normalize_account_number,
    normalize_company_number, normalize_sort_code, normalize_telephone_number,
    normalize_vat_number,
};

fn field<'a>(raw: &'a HashMap<String, String>, name: &str) -> &'a str {
    raw.get(name).map(|v| v.trim()).unwrap_or("")
}

/// Bank details step payload (normalized)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankDetails {
    pub sort_code: String,
    pub account_number: String,
}

/// Parse and validate the bank details form
pub fn parse_bank_details(raw: &HashMap<String, String>) -> Result<BankDetails, FormErrors> {
    let mut errors = FormErrors::new();

    let sort_code = normalize_sort_code(field(raw, "sort_code"));
    if sort_code.is_empty() {
        errors.add("sort_code", "Enter a sort code");
    } else if !is_valid_sort_code(&sort_code) {
        errors.add("sort_code", "Enter a valid sort code like 309430");
    }

    let account_number = normalize_account_number(field(raw, "account_number"));
    if account_number.is_empty() {
        errors.add("account_number", "Enter an account number");
    } else if !is_valid_account_number(&account_number) {
        errors.add("account_number", "Enter a valid account number like 00733445");
    }

    if errors.is_empty() {
        Ok(BankDetails { sort_code, account_number })
    } else {
        Err(errors)
    }
}

/// Responsible person step payload (normalized)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsiblePerson {
    pub first_name: String,
    pub last_name: String,
    pub telephone_number: String,
    pub email: String,
}

/// Parse and validate the responsible person form
pub fn parse_responsible_person(
    raw: &HashMap<String, String>,
) -> Result<ResponsiblePerson, FormErrors> {
    let mut errors = FormErrors::new();

    let first_name = field(raw, "first_name").to_string();
    if first_name.is_empty() {
        errors.add("first_name", "Enter a first name");
    }

    let last_name = field(raw, "last_name").to_string();
    if last_name.is_empty() {
        errors.add("last_name", "Enter a last name");
    }

    let telephone_number = normalize_telephone_number(field(raw, "telephone_number"));
    if telephone_number.is_empty() {
        errors.add("telephone_number", "Enter a telephone number");
    } else if !is_valid_telephone_number(&telephone_number) {
        errors.add("telephone_number", "Enter a valid telephone number");
    }

    let email = field(raw, "email").to_string();
    if email.is_empty() {
        errors.add("email", "Enter an email address");
    } else if !is_valid_email(&email) {
        errors.add("email", "Enter a valid email address");
    }

    if errors.is_empty() {
        Ok(ResponsiblePerson { first_name, last_name, telephone_number, email })
    } else {
        Err(errors)
    }
}

/// VAT number step payload (normalized)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatNumber {
    pub vat_number: String,
}

/// Parse and validate the VAT number form
pub fn parse_vat_number(raw: &HashMap<String, String>) -> Result<VatNumber, FormErrors> {
    let mut errors = FormErrors::new();

    let vat_number = normalize_vat_number(field(raw, "vat_number"));
    if vat_number.is_empty() {
        errors.add("vat_number", "Enter a VAT number");
    } else if !is_valid_vat_number(&vat_number) {
        errors.add("vat_number", "Enter a valid VAT registration number");
    }

    if errors.is_empty() {
        Ok(VatNumber { vat_number })
    } else {
        Err(errors)
    }
}

/// Company number step payload (normalized).
///
/// The one branch-on-choice step: the declaration answer decides whether a
/// company number is required at all.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyNumber {
    pub declared: bool,
    pub company_number: Option<String>,
}

/// Parse and validate the company number form
pub fn parse_company_number(raw: &HashMap<String, String>) -> Result<CompanyNumber, FormErrors> {
    let mut errors = FormErrors::new();

    let declared = match field(raw, "company_number_declaration") {
        "yes" => Some(true),
        "no" => Some(false),
        _ => {
            errors.add(
                "company_number_declaration",
                "Select yes if your organisation has a company registration number",
            );
            None
        }
    };

    let company_number = match declared {
        Some(true) => {
            let number = normalize_company_number(field(raw, "company_number"));
            if number.is_empty() {
                errors.add("company_number", "Enter a company registration number");
                None
            } else if !is_valid_company_number(&number) {
                errors.add("company_number", "Enter a valid company registration number");
                None
            } else {
                Some(number)
            }
        }
        _ => None,
    };

    if errors.is_empty() {
        Ok(CompanyNumber {
            declared: declared.unwrap_or(false),
            company_number,
        })
    } else {
        Err(errors)
    }
}

/// Director step payload (normalized)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Director {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Parse and validate the director form
pub fn parse_director(raw: &HashMap<String, String>) -> Result<Director, FormErrors> {
    let mut errors = FormErrors::new();

    let first_name = field(raw, "first_name").to_string();
    if first_name.is_empty() {
        errors.add("first_name", "Enter a first name");
    }

    let last_name = field(raw, "last_name").to_string();
    if last_name.is_empty() {
        errors.add("last_name", "Enter a last name");
    }

    let email = field(raw, "email").to_string();
    if email.is_empty() {
        errors.add("email", "Enter an email address");
    } else if !is_valid_email(&email) {
        errors.add("email", "Enter a valid email address");
    }

    if errors.is_empty() {
        Ok(Director { first_name, last_name, email })
    } else {
        Err(errors)
    }
}

/// Government entity document step payload
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernmentEntityDocument {
    pub document_reference: String,
}

/// Parse and validate the government entity document form
pub fn parse_government_entity_document(
    raw: &HashMap<String, String>,
) -> Result<GovernmentEntityDocument, FormErrors> {
    let mut errors = FormErrors::new();

    let document_reference = field(raw, "document_reference").to_string();
    if document_reference.is_empty() {
        errors.add("document_reference", "Enter a document reference");
    }

    if errors.is_empty() {
        Ok(GovernmentEntityDocument { document_reference })
    } else {
        Err(errors)
    }
}
