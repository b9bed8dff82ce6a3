//! Concurrency properties: verify operations for one identity serialize
//! under the store lock, so codes cannot be double-consumed and attempt
//! decrements are never lost.

mod common;

use common::TestHarness;
use server_core::domains::auth::AuthError;

const FARMER: &str = "+919999999999";

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn at_most_one_concurrent_verify_succeeds() {
    let harness = TestHarness::new();
    let deps = harness.deps.clone();

    deps.otp_issuer().issue(FARMER).await.unwrap();
    let code = harness.delivered_code(FARMER);

    let mut handles = Vec::new();
    for _ in 0..4 {
        let deps = deps.clone();
        let code = code.clone();
        handles.push(tokio::spawn(async move {
            deps.otp_verifier().verify(FARMER, &code).await
        }));
    }

    let mut successes = 0;
    let mut not_found = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(identity) => {
                assert_eq!(identity.as_str(), FARMER);
                successes += 1;
            }
            Err(AuthError::NotFound) => not_found += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(successes, 1, "the code must be consumed exactly once");
    assert_eq!(not_found, 3);
    assert_eq!(deps.otp_store.len().await, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_failures_decrement_exactly_once_each() {
    let harness = TestHarness::new();
    let deps = harness.deps.clone();

    deps.otp_issuer().issue(FARMER).await.unwrap();
    let code = harness.delivered_code(FARMER);
    let wrong = if code == "000000" {
        "000001".to_string()
    } else {
        "000000".to_string()
    };

    // Exactly as many wrong attempts as the budget allows
    let mut handles = Vec::new();
    for _ in 0..3 {
        let deps = deps.clone();
        let wrong = wrong.clone();
        handles.push(tokio::spawn(async move {
            deps.otp_verifier().verify(FARMER, &wrong).await
        }));
    }

    let mut remaining_seen = Vec::new();
    let mut exhausted = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Err(AuthError::InvalidCode { attempts_remaining }) => {
                remaining_seen.push(attempts_remaining)
            }
            Err(AuthError::TooManyAttempts) => exhausted += 1,
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    // Three attempts produce exactly three decrements: 3→2, 2→1, 1→0.
    remaining_seen.sort_unstable();
    assert_eq!(remaining_seen, vec![1, 2]);
    assert_eq!(exhausted, 1);
    assert_eq!(deps.otp_store.len().await, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn identities_do_not_interfere() {
    let harness = TestHarness::new();
    let deps = harness.deps.clone();

    let identities: Vec<String> = (0..8).map(|i| format!("+9198765432{i:02}")).collect();
    for identity in &identities {
        deps.otp_issuer().issue(identity).await.unwrap();
    }

    let mut handles = Vec::new();
    for identity in identities.clone() {
        let deps = deps.clone();
        let code = harness.delivered_code(&identity);
        handles.push(tokio::spawn(async move {
            deps.otp_verifier().verify(&identity, &code).await
        }));
    }

    for handle in handles {
        handle.await.unwrap().unwrap();
    }
    assert_eq!(deps.otp_store.len().await, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_assign_elects_exactly_one_expert() {
    let harness = TestHarness::new();
    let repo = harness.deps.consultations.clone();

    let id = repo
        .create("F1".to_string(), "Tomato".to_string(), "Blight".to_string(), 0.9)
        .await
        .id;

    let mut handles = Vec::new();
    for i in 0..4 {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move {
            repo.assign(id, &format!("E{i}")).await
        }));
    }

    let mut winners = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => winners += 1,
            Err(server_core::domains::consultation::ConsultationError::InvalidTransition {
                ..
            }) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(winners, 1, "double assignment must be rejected");
    let consultation = repo.get(id).await.unwrap();
    assert!(consultation.expert_id.is_some());
}
