//! # psp-onboarding
//!
//! The concrete "Stripe setup" onboarding wizard for a payments platform
//! self-service portal: the ordered step table, typed form payloads with
//! normalization and validation, the PSP side-effect client trait (with a
//! recording mock), and the shared mapping from upstream domain error codes
//! to field-level messages.

mod error_map;
mod forms;
mod service;
mod steps;
mod validate;

pub use error_map::{map_domain_error, ErrorMapping};
pub use forms::{
    parse_bank_details, parse_company_number, parse_director, parse_government_entity_document,
    parse_responsible_person, parse_vat_number, BankDetails, CompanyNumber, Director,
    GovernmentEntityDocument, ResponsiblePerson, VatNumber,
};
pub use service::{MockPspClient, PspClient, RecordedCall};
pub use steps::{flags, step_names, stripe_setup_plan, WIZARD_NAME};
