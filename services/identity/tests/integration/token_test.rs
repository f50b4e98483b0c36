use carelink_identity::domain::types::{AccountRole, AccountStatus};
use carelink_identity::error::IdentityServiceError;
use carelink_identity::password;
use carelink_identity::usecase::login::{AuthenticateInput, AuthenticateUseCase};
use carelink_identity::usecase::token::verify_session_token;

use crate::helpers::{MockAccountRepo, TEST_JWT_SECRET, account_with};

#[tokio::test]
async fn repeated_verify_returns_identical_claims() {
    let hash = password::hash("s3curepass").unwrap();
    let account = account_with(
        "dr@x.com",
        &hash,
        AccountRole::ClinicalProvider,
        AccountStatus::Active,
    );

    let out = AuthenticateUseCase {
        accounts: MockAccountRepo::new(vec![account]),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    }
    .execute(AuthenticateInput {
        email: "dr@x.com".to_owned(),
        password: "s3curepass".to_owned(),
    })
    .await
    .unwrap();

    let first = verify_session_token(&out.token, TEST_JWT_SECRET).unwrap();
    let second = verify_session_token(&out.token, TEST_JWT_SECRET).unwrap();
    let third = verify_session_token(&out.token, TEST_JWT_SECRET).unwrap();

    for info in [&second, &third] {
        assert_eq!(info.account_id, first.account_id);
        assert_eq!(info.role, first.role);
        assert_eq!(info.exp, first.exp);
    }
}

#[tokio::test]
async fn token_signed_with_another_secret_is_rejected() {
    let hash = password::hash("s3curepass").unwrap();
    let account = account_with(
        "dr@x.com",
        &hash,
        AccountRole::ClinicalProvider,
        AccountStatus::Active,
    );

    let out = AuthenticateUseCase {
        accounts: MockAccountRepo::new(vec![account]),
        jwt_secret: "some-other-signing-secret".to_owned(),
    }
    .execute(AuthenticateInput {
        email: "dr@x.com".to_owned(),
        password: "s3curepass".to_owned(),
    })
    .await
    .unwrap();

    let err = verify_session_token(&out.token, TEST_JWT_SECRET).unwrap_err();
    assert!(matches!(err, IdentityServiceError::TokenInvalid));
}
