use chrono::{Duration, Utc};

use carelink_identity::domain::types::{AccountRole, AccountStatus, ResourceType};
use carelink_identity::error::IdentityServiceError;
use carelink_identity::usecase::issue::{IssueCodeInput, IssueCodeUseCase};
use carelink_identity::usecase::register::{RedeemInput, RedeemUseCase};

use crate::helpers::{
    MockAccessCodeRepo, MockAccountRepo, MockResourceLinker, account_with, active_code,
    test_policy,
};

fn redeem_input(code: &str, email: &str) -> RedeemInput {
    RedeemInput {
        code: code.to_owned(),
        email: email.to_owned(),
        password: "s3curepass".to_owned(),
        name: "Pat Example".to_owned(),
    }
}

#[tokio::test]
async fn issue_then_redeem_links_account_to_issued_resource() {
    let accounts = MockAccountRepo::empty();
    let codes = MockAccessCodeRepo::empty();
    let linker = MockResourceLinker::new();
    let accounts_handle = accounts.accounts_handle();
    let codes_handle = codes.codes_handle();

    let issued = IssueCodeUseCase {
        accounts: accounts.clone(),
        codes: codes.clone(),
        linker,
        default_ttl_secs: 86_400,
        max_ttl_secs: 604_800,
    }
    .execute(IssueCodeInput {
        resource_type: ResourceType::Patient,
        attributes: serde_json::json!({ "name": [{ "family": "Example" }] }),
        email: "p@x.com".to_owned(),
        ttl_secs: None,
    })
    .await
    .unwrap();

    let account_id = RedeemUseCase {
        accounts,
        codes,
        policy: test_policy(),
    }
    .execute(redeem_input(&issued.code, "p@x.com"))
    .await
    .unwrap();

    let accounts = accounts_handle.lock().unwrap();
    assert_eq!(accounts.len(), 1);
    let account = &accounts[0];
    assert_eq!(account.id, account_id);
    assert_eq!(account.role, AccountRole::ClinicalSubject);
    assert_eq!(account.status, AccountStatus::Active);
    let link = account.resource_link.as_ref().unwrap();
    assert_eq!(link.resource_type, ResourceType::Patient);
    assert_eq!(link.resource_id, issued.resource_id);
    // Hash is set, cleartext is not stored.
    assert!(account.password_hash.starts_with("$argon2"));

    let codes = codes_handle.lock().unwrap();
    assert!(codes[0].consumed_at.is_some());
}

#[tokio::test]
async fn unknown_code_creates_no_account() {
    let accounts = MockAccountRepo::empty();
    let accounts_handle = accounts.accounts_handle();

    let result = RedeemUseCase {
        accounts,
        codes: MockAccessCodeRepo::empty(),
        policy: test_policy(),
    }
    .execute(redeem_input("NEVERISSUEDCODEVALUE000000000000", "p@x.com"))
    .await;

    assert!(matches!(result, Err(IdentityServiceError::CodeNotFound)));
    assert!(accounts_handle.lock().unwrap().is_empty());
}

#[tokio::test]
async fn expired_code_is_rejected_even_if_never_redeemed() {
    let mut code = active_code("p@x.com", ResourceType::Patient);
    code.expires_at = Utc::now() - Duration::seconds(1);
    let value = code.code.clone();

    let result = RedeemUseCase {
        accounts: MockAccountRepo::empty(),
        codes: MockAccessCodeRepo::new(vec![code]),
        policy: test_policy(),
    }
    .execute(redeem_input(&value, "p@x.com"))
    .await;

    assert!(matches!(result, Err(IdentityServiceError::CodeExpired)));
}

#[tokio::test]
async fn consumed_code_stays_consumed() {
    let mut code = active_code("p@x.com", ResourceType::Patient);
    code.consumed_at = Some(Utc::now());
    let value = code.code.clone();

    let result = RedeemUseCase {
        accounts: MockAccountRepo::empty(),
        codes: MockAccessCodeRepo::new(vec![code]),
        policy: test_policy(),
    }
    .execute(redeem_input(&value, "p@x.com"))
    .await;

    assert!(matches!(
        result,
        Err(IdentityServiceError::CodeAlreadyConsumed)
    ));
}

#[tokio::test]
async fn email_mismatch_leaves_code_active_for_rightful_owner() {
    let code = active_code("p@x.com", ResourceType::Patient);
    let value = code.code.clone();
    let codes = MockAccessCodeRepo::new(vec![code]);
    let codes_handle = codes.codes_handle();
    let accounts = MockAccountRepo::empty();

    let mismatch = RedeemUseCase {
        accounts: accounts.clone(),
        codes: codes.clone(),
        policy: test_policy(),
    }
    .execute(redeem_input(&value, "other@x.com"))
    .await;

    assert!(matches!(mismatch, Err(IdentityServiceError::EmailMismatch)));
    assert!(codes_handle.lock().unwrap()[0].consumed_at.is_none());

    // The rightful owner can still redeem; comparison is case-insensitive.
    let redeemed = RedeemUseCase {
        accounts,
        codes,
        policy: test_policy(),
    }
    .execute(redeem_input(&value, "P@x.com"))
    .await;

    assert!(redeemed.is_ok());
    assert!(codes_handle.lock().unwrap()[0].consumed_at.is_some());
}

#[tokio::test]
async fn case_variant_of_taken_email_cannot_register_a_second_account() {
    // p@x.com already owns an account, currently disabled. A code issued
    // for P@x.com must not mint a second login for the same mailbox.
    let existing = account_with(
        "p@x.com",
        "$argon2id$test",
        AccountRole::ClinicalSubject,
        AccountStatus::Disabled,
    );
    let accounts = MockAccountRepo::new(vec![existing]);
    let accounts_handle = accounts.accounts_handle();

    let code = active_code("P@x.com", ResourceType::Patient);
    let value = code.code.clone();
    let codes = MockAccessCodeRepo::new(vec![code]);
    let codes_handle = codes.codes_handle();

    let result = RedeemUseCase {
        accounts,
        codes,
        policy: test_policy(),
    }
    .execute(redeem_input(&value, "P@x.com"))
    .await;

    assert!(matches!(result, Err(IdentityServiceError::InvalidEmail)));
    // Rejected before consumption, so the code is not burned.
    assert!(codes_handle.lock().unwrap()[0].consumed_at.is_none());
    assert_eq!(accounts_handle.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn weak_password_is_rejected_before_any_mutation() {
    let code = active_code("p@x.com", ResourceType::Patient);
    let value = code.code.clone();
    let codes = MockAccessCodeRepo::new(vec![code]);
    let codes_handle = codes.codes_handle();

    let mut input = redeem_input(&value, "p@x.com");
    input.password = "short1".to_owned();

    let result = RedeemUseCase {
        accounts: MockAccountRepo::empty(),
        codes,
        policy: test_policy(),
    }
    .execute(input)
    .await;

    assert!(matches!(result, Err(IdentityServiceError::WeakPassword)));
    assert!(codes_handle.lock().unwrap()[0].consumed_at.is_none());
}

#[tokio::test]
async fn practitioner_code_grants_clinical_provider_role() {
    let code = active_code("dr@x.com", ResourceType::Practitioner);
    let value = code.code.clone();
    let accounts = MockAccountRepo::empty();
    let accounts_handle = accounts.accounts_handle();

    RedeemUseCase {
        accounts,
        codes: MockAccessCodeRepo::new(vec![code]),
        policy: test_policy(),
    }
    .execute(redeem_input(&value, "dr@x.com"))
    .await
    .unwrap();

    assert_eq!(
        accounts_handle.lock().unwrap()[0].role,
        AccountRole::ClinicalProvider
    );
}

#[tokio::test]
async fn account_failure_after_consume_burns_the_code() {
    let code = active_code("p@x.com", ResourceType::Patient);
    let value = code.code.clone();
    let codes = MockAccessCodeRepo::new(vec![code]);
    let codes_handle = codes.codes_handle();

    let result = RedeemUseCase {
        accounts: MockAccountRepo::failing_create(),
        codes,
        policy: test_policy(),
    }
    .execute(redeem_input(&value, "p@x.com"))
    .await;

    assert!(matches!(
        result,
        Err(IdentityServiceError::AccountCreationFailed)
    ));
    // Deliberately not rolled back: a fresh code must be issued instead.
    assert!(codes_handle.lock().unwrap()[0].consumed_at.is_some());
}

#[tokio::test]
async fn concurrent_redemptions_consume_exactly_once() {
    let code = active_code("p@x.com", ResourceType::Patient);
    let value = code.code.clone();
    let accounts = MockAccountRepo::empty();
    let codes = MockAccessCodeRepo::new(vec![code]);
    let accounts_handle = accounts.accounts_handle();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let usecase = RedeemUseCase {
            accounts: accounts.clone(),
            codes: codes.clone(),
            policy: test_policy(),
        };
        let input = redeem_input(&value, "p@x.com");
        handles.push(tokio::spawn(async move { usecase.execute(input).await }));
    }

    let mut successes = 0;
    let mut already_consumed = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(IdentityServiceError::CodeAlreadyConsumed) => already_consumed += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(already_consumed, 7);
    assert_eq!(accounts_handle.lock().unwrap().len(), 1);
}
