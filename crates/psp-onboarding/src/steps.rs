//! Stripe Setup Step Table
//!
//! The fixed priority order of the Stripe onboarding wizard. The guard
//! redirects to the earliest incomplete step in this order, so the order
//! here is the one the user is walked through.

use wizard_core::{StepDefinition, WizardPlan};

/// Session draft namespace and route area for this wizard
pub const WIZARD_NAME: &str = "stripe-setup";

/// Step names (also the URL slugs)
pub mod step_names {
    pub const BANK_DETAILS: &str = "bank-details";
    pub const RESPONSIBLE_PERSON: &str = "responsible-person";
    pub const VAT_NUMBER: &str = "vat-number";
    pub const COMPANY_NUMBER: &str = "company-number";
    pub const DIRECTOR: &str = "director";
    pub const GOVERNMENT_ENTITY_DOCUMENT: &str = "government-entity-document";
}

/// Progress flag keys, as stored by the account service
pub mod flags {
    pub const BANK_ACCOUNT: &str = "bank_account";
    pub const RESPONSIBLE_PERSON: &str = "responsible_person";
    pub const VAT_NUMBER: &str = "vat_number";
    pub const COMPANY_NUMBER: &str = "company_number";
    pub const DIRECTOR: &str = "director";
    pub const GOVERNMENT_ENTITY_DOCUMENT: &str = "government_entity_document";
}

/// Build the Stripe setup wizard plan
pub fn stripe_setup_plan() -> WizardPlan {
    WizardPlan::new(
        WIZARD_NAME,
        vec![
            StepDefinition {
                name: step_names::BANK_DETAILS,
                flag: flags::BANK_ACCOUNT,
                slug: step_names::BANK_DETAILS,
            },
            StepDefinition {
                name: step_names::RESPONSIBLE_PERSON,
                flag: flags::RESPONSIBLE_PERSON,
                slug: step_names::RESPONSIBLE_PERSON,
            },
            StepDefinition {
                name: step_names::VAT_NUMBER,
                flag: flags::VAT_NUMBER,
                slug: step_names::VAT_NUMBER,
            },
            StepDefinition {
                name: step_names::COMPANY_NUMBER,
                flag: flags::COMPANY_NUMBER,
                slug: step_names::COMPANY_NUMBER,
            },
            StepDefinition {
                name: step_names::DIRECTOR,
                flag: flags::DIRECTOR,
                slug: step_names::DIRECTOR,
            },
            StepDefinition {
                name: step_names::GOVERNMENT_ENTITY_DOCUMENT,
                flag: flags::GOVERNMENT_ENTITY_DOCUMENT,
                slug: step_names::GOVERNMENT_ENTITY_DOCUMENT,
            },
        ],
    )
}
