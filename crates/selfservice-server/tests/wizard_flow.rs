//! End-to-end wizard flow tests against the axum router, using the
//! in-memory stores and the recording mock PSP client.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use psp_onboarding::{flags, stripe_setup_plan, MockPspClient};
use selfservice_server::state::AppState;
use wizard_core::{
    CompletionRouting, MemoryDraftStore, MemoryProgressStore, ProgressFlags, ProgressStore,
    ServiceError, WizardConfig,
};

struct TestApp {
    app: Router,
    progress: Arc<MemoryProgressStore>,
    psp: Arc<MockPspClient>,
}

fn test_app(routing: CompletionRouting) -> TestApp {
    let progress = Arc::new(MemoryProgressStore::new());
    progress.insert_account("acc-1", ProgressFlags::new());

    let psp = Arc::new(MockPspClient::new());
    let drafts = Arc::new(MemoryDraftStore::new());

    let state = AppState {
        progress: progress.clone(),
        psp: psp.clone(),
        drafts,
        plan: Arc::new(stripe_setup_plan()),
        wizard_config: WizardConfig {
            completion_routing: routing,
        },
    };

    TestApp {
        app: selfservice_server::app(state),
        progress,
        psp,
    }
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &axum::response::Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[tokio::test]
async fn requesting_later_step_redirects_to_earliest_incomplete_predecessor() {
    let t = test_app(CompletionRouting::NextStep);

    let response = t
        .app
        .clone()
        .oneshot(get("/account/acc-1/stripe-setup/vat-number"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/account/acc-1/stripe-setup/bank-details");
}

#[tokio::test]
async fn completed_step_redirects_away_and_performs_no_side_effect() {
    let t = test_app(CompletionRouting::NextStep);
    t.progress.set_flag("acc-1", flags::BANK_ACCOUNT).await.unwrap();

    let response = t
        .app
        .clone()
        .oneshot(form_post(
            "/account/acc-1/stripe-setup/bank-details",
            "sort_code=309430&account_number=00733445",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        "/account/acc-1/stripe-setup?flash=already-completed"
    );
    assert!(t.psp.calls().is_empty());
}

#[tokio::test]
async fn missing_fields_rerender_with_exact_errors_and_no_external_call() {
    let t = test_app(CompletionRouting::NextStep);

    let response = t
        .app
        .clone()
        .oneshot(form_post(
            "/account/acc-1/stripe-setup/bank-details",
            "sort_code=&account_number=",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Enter a sort code"));
    assert!(html.contains("Enter an account number"));
    assert!(t.psp.calls().is_empty());
}

#[tokio::test]
async fn valid_submission_sends_normalized_values_and_sets_flag_once() {
    let t = test_app(CompletionRouting::NextStep);

    let response = t
        .app
        .clone()
        .oneshot(form_post(
            "/account/acc-1/stripe-setup/bank-details",
            "sort_code=30-94-30&account_number=00733445",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    // Sequential routing lands on the next incomplete step
    assert_eq!(
        location(&response),
        "/account/acc-1/stripe-setup/responsible-person"
    );

    let calls = t.psp.calls_to("update_bank_account");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].payload["sort_code"], "309430");
    assert_eq!(calls[0].payload["account_number"], "00733445");

    let progress = t.progress.get_progress("acc-1").await.unwrap();
    assert!(progress.is_complete(flags::BANK_ACCOUNT));
}

#[tokio::test]
async fn task_list_routing_returns_to_overview_after_step() {
    let t = test_app(CompletionRouting::TaskList);

    let response = t
        .app
        .clone()
        .oneshot(form_post(
            "/account/acc-1/stripe-setup/bank-details",
            "sort_code=309430&account_number=00733445",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/account/acc-1/stripe-setup");
}

#[tokio::test]
async fn recognized_domain_error_rerenders_and_never_sets_flag() {
    let t = test_app(CompletionRouting::NextStep);
    t.psp.fail_next(
        "update_bank_account",
        ServiceError::domain("bank_account_unusable", "account is unusable"),
    );

    let response = t
        .app
        .clone()
        .oneshot(form_post(
            "/account/acc-1/stripe-setup/bank-details",
            "sort_code=309430&account_number=00733445",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(
        "The bank account provided cannot be used. Contact GOV.UK Pay for assistance."
    ));

    let progress = t.progress.get_progress("acc-1").await.unwrap();
    assert!(!progress.is_complete(flags::BANK_ACCOUNT));
}

#[tokio::test]
async fn unrecognized_error_code_propagates_to_generic_handler() {
    let t = test_app(CompletionRouting::NextStep);
    t.psp.fail_next(
        "update_bank_account",
        ServiceError::domain("stripe_account_frozen", "no mapping for this"),
    );

    let response = t
        .app
        .clone()
        .oneshot(form_post(
            "/account/acc-1/stripe-setup/bank-details",
            "sort_code=309430&account_number=00733445",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let progress = t.progress.get_progress("acc-1").await.unwrap();
    assert!(!progress.is_complete(flags::BANK_ACCOUNT));
}

#[tokio::test]
async fn validation_failure_preserves_raw_input_in_form_and_draft() {
    let t = test_app(CompletionRouting::NextStep);

    let response = t
        .app
        .clone()
        .oneshot(form_post(
            "/account/acc-1/stripe-setup/bank-details",
            "sort_code=30-94-3&account_number=00733445",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    // The session cookie scopes the saved draft
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .unwrap()
        .to_string();

    let html = body_text(response).await;
    assert!(html.contains("value=\"30-94-3\""));

    // A follow-up GET re-displays the originally typed value
    let request = Request::builder()
        .uri("/account/acc-1/stripe-setup/bank-details")
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    let followup = t.app.clone().oneshot(request).await.unwrap();
    let html = body_text(followup).await;
    assert!(html.contains("value=\"30-94-3\""));
}

#[tokio::test]
async fn validation_errors_survive_one_redisplay_after_failed_post() {
    let t = test_app(CompletionRouting::NextStep);

    let response = t
        .app
        .clone()
        .oneshot(form_post(
            "/account/acc-1/stripe-setup/bank-details",
            "sort_code=30-94-3&account_number=00733445",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .unwrap()
        .to_string();
    body_text(response).await;

    let step_get = |cookie: String| {
        Request::builder()
            .uri("/account/acc-1/stripe-setup/bank-details")
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap()
    };

    // First GET after the failed POST shows the saved values and errors
    let followup = t.app.clone().oneshot(step_get(cookie.clone())).await.unwrap();
    let html = body_text(followup).await;
    assert!(html.contains("value=\"30-94-3\""));
    assert!(html.contains("Enter a valid sort code like 309430"));
    assert!(html.contains("There is a problem"));

    // A second GET keeps the values but not the stale errors
    let second = t.app.clone().oneshot(step_get(cookie)).await.unwrap();
    let html = body_text(second).await;
    assert!(html.contains("value=\"30-94-3\""));
    assert!(!html.contains("Enter a valid sort code like 309430"));
}

#[tokio::test]
async fn final_step_redirects_to_completion_page() {
    let t = test_app(CompletionRouting::NextStep);
    for flag in [
        flags::BANK_ACCOUNT,
        flags::RESPONSIBLE_PERSON,
        flags::VAT_NUMBER,
        flags::COMPANY_NUMBER,
        flags::DIRECTOR,
    ] {
        t.progress.set_flag("acc-1", flag).await.unwrap();
    }

    let response = t
        .app
        .clone()
        .oneshot(form_post(
            "/account/acc-1/stripe-setup/government-entity-document",
            "document_reference=doc-42",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/account/acc-1/stripe-setup/complete");

    let complete = t
        .app
        .clone()
        .oneshot(get("/account/acc-1/stripe-setup/complete"))
        .await
        .unwrap();
    assert_eq!(complete.status(), StatusCode::OK);
    let html = body_text(complete).await;
    assert!(html.contains("Stripe setup complete"));
}

#[tokio::test]
async fn unknown_account_renders_generic_error_page() {
    let t = test_app(CompletionRouting::NextStep);

    let response = t
        .app
        .clone()
        .oneshot(get("/account/nope/stripe-setup/bank-details"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let html = body_text(response).await;
    assert!(html.contains("Try again or contact support"));
}

#[tokio::test]
async fn task_list_shows_flash_after_already_completed_redirect() {
    let t = test_app(CompletionRouting::NextStep);

    let response = t
        .app
        .clone()
        .oneshot(get("/account/acc-1/stripe-setup?flash=already-completed"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("You cannot change them here"));
}

#[tokio::test]
async fn unknown_step_is_not_found() {
    let t = test_app(CompletionRouting::NextStep);

    let response = t
        .app
        .clone()
        .oneshot(get("/account/acc-1/stripe-setup/secret-step"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
