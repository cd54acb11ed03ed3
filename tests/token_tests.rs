// Integration tests for join token minting
//
// Tokens are decoded with the test secret to check what was signed.

mod test_helpers;

use chrono::Utc;
use jsonwebtoken::{decode, DecodingKey, Validation};
use livekit_rooms::livekit::Claims;
use livekit_rooms::{mint_join_token, LiveKitConfig, LiveKitError};
use test_helpers::*;

fn decode_claims(token: &str) -> Claims {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(TEST_SECRET.as_bytes()),
        &Validation::default(),
    )
    .expect("token should verify with the API secret")
    .claims
}

#[test]
fn test_minting_twice_gives_distinct_identities_and_tokens() {
    let cfg = livekit_config();

    let first = mint_join_token(&cfg, "weekly-sync").unwrap();
    let second = mint_join_token(&cfg, "weekly-sync").unwrap();

    assert_ne!(first.identity, second.identity);
    assert_ne!(first.token, second.token);

    for creds in [&first, &second] {
        let claims = decode_claims(&creds.token);
        assert_eq!(claims.video.room, "weekly-sync");
        assert!(claims.video.room_join);
        assert_eq!(claims.sub, creds.identity);
        assert_eq!(claims.iss, TEST_KEY);
    }
}

#[test]
fn test_token_expires_one_hour_after_minting() {
    let before = Utc::now().timestamp();
    let creds = mint_join_token(&livekit_config(), "room").unwrap();
    let after = Utc::now().timestamp();

    let claims = decode_claims(&creds.token);
    assert!(claims.exp >= before + 3600);
    assert!(claims.exp <= after + 3600);
}

#[test]
fn test_ws_url_passed_through_unchanged() {
    let creds = mint_join_token(&livekit_config(), "room").unwrap();
    assert_eq!(creds.ws_url.as_deref(), Some(TEST_WS_URL));

    let cfg = LiveKitConfig {
        ws_url: None,
        ..livekit_config()
    };
    let creds = mint_join_token(&cfg, "room").unwrap();
    assert_eq!(creds.ws_url, None);
}

#[test]
fn test_missing_key_is_reported() {
    let cfg = LiveKitConfig {
        api_key: None,
        ..livekit_config()
    };

    let result = mint_join_token(&cfg, "room");
    assert!(matches!(result, Err(LiveKitError::MissingCredentials)));
}

#[test]
fn test_missing_secret_is_reported() {
    let cfg = LiveKitConfig {
        api_secret: None,
        ..livekit_config()
    };

    let err = mint_join_token(&cfg, "room").unwrap_err();
    assert!(matches!(err, LiveKitError::MissingCredentials));
    assert!(err.to_string().contains("LIVEKIT_API_SECRET"));
}

#[test]
fn test_token_rejected_with_wrong_secret() {
    let creds = mint_join_token(&livekit_config(), "room").unwrap();

    let result = decode::<Claims>(
        &creds.token,
        &DecodingKey::from_secret(b"some-other-secret"),
        &Validation::default(),
    );
    assert!(result.is_err());
}
