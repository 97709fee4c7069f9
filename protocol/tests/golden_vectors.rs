//! Pinned regression vectors for encodings, hashes, key hashes and ed25519
//! signatures.
//!
//! The expected values are fixed hex captured for this crate's encoding
//! rules, so a change in any layer of the hash chain shows up as a byte
//! mismatch.

use accu_protocol::codec::{encode_header, BodyEncoder, ExtendedEncoder};
use accu_protocol::crypto::{sha256, Algorithm, KeyPair};
use accu_protocol::identity::lite_data_account_url;
use accu_protocol::transaction::{
    body_hash, sign_transaction, AccountAuthOperation, AccountAuthOperationType, AcmeFaucet,
    BurnCredits, CreditRecipient, DataEntry, Payload, SigningRequest, TransactionBody,
    TransferCredits, UpdateAccountAuth, WriteDataTo,
};

const SEED: [u8; 32] = [0x01; 32];
const TIMESTAMP: u64 = 1_700_000_000_000_000;
const SIGNER: &str = "acc://alice.acme/book/1";

fn encode(payload: Payload) -> Vec<u8> {
    ExtendedEncoder::new()
        .encode_body(&TransactionBody::new(payload))
        .unwrap()
}

fn key(algorithm: Algorithm) -> KeyPair {
    KeyPair::from_secret_bytes(algorithm, &SEED).unwrap()
}

// ---------------------------------------------------------------------------
// Body encodings
// ---------------------------------------------------------------------------

#[test]
fn test_burn_credits_bytes_and_hash() {
    let bytes = encode(Payload::BurnCredits(BurnCredits { amount: 17 }));
    assert_eq!(hex::encode(&bytes), "01110211");
    assert_eq!(
        hex::encode(sha256(&bytes)),
        "c14d0abe685f79c2355f3f3a76a08d111e70a2458e4531c4ceffc441dc740066"
    );

    let zero = encode(Payload::BurnCredits(BurnCredits { amount: 0 }));
    assert_eq!(hex::encode(zero), "0111");
}

#[test]
fn test_transfer_credits_bytes_and_hash() {
    let bytes = encode(Payload::TransferCredits(TransferCredits {
        to: vec![
            CreditRecipient {
                url: "acc://a".into(),
                amount: 5,
            },
            CreditRecipient {
                url: "acc://b".into(),
                amount: 0,
            },
        ],
    }));
    assert_eq!(
        hex::encode(&bytes),
        "0112020b01076163633a2f2f610205020901076163633a2f2f62"
    );
    assert_eq!(
        hex::encode(sha256(&bytes)),
        "b48c5c44f6a5b3259eef8656e0b3de6300c577a80b449898e39a5d68f8e6573e"
    );
}

#[test]
fn test_update_account_auth_bytes_and_hash() {
    let bytes = encode(Payload::UpdateAccountAuth(UpdateAccountAuth {
        operations: vec![AccountAuthOperation {
            kind: AccountAuthOperationType::AddAuthority,
            authority: "acc://x/book".into(),
        }],
    }));
    assert_eq!(hex::encode(&bytes), "011502100103020c6163633a2f2f782f626f6f6b");
    assert_eq!(
        hex::encode(sha256(&bytes)),
        "32f4bcf416079faaa3bd0daad5811e258a91e7a0fe38793009861c82ccb42a97"
    );
}

// ---------------------------------------------------------------------------
// Data entries
// ---------------------------------------------------------------------------

fn data_entry() -> DataEntry {
    DataEntry::double_hash_from_strings(&["hello world", "id-1", "id-2"])
}

#[test]
fn test_three_item_entry_hash() {
    assert_eq!(
        hex::encode(data_entry().hash()),
        "0d2321cd37890313970ab8e0ae321f4432abd2585b181d2d4459f2ccb80a44ef"
    );
}

#[test]
fn test_write_data_to_body_hash_is_two_leaf_merkle() {
    let body = TransactionBody::new(Payload::WriteDataTo(WriteDataTo {
        recipient: "acc://lite-data".into(),
        entry: Some(data_entry()),
    }));
    let encoder = ExtendedEncoder::new();
    let bytes = encoder.encode_body(&body).unwrap();
    assert_eq!(
        hex::encode(&bytes),
        "0106020f6163633a2f2f6c6974652d64617461031b0103020b68656c6c6f20776f726c64\
         020469642d31020469642d32"
    );

    let hash = body_hash(&encoder, &body, &bytes).unwrap();
    assert_eq!(
        hex::encode(hash),
        "e616b79809cf4da1bed40ed4e04dc50cd9ace769b13e9a035ccb2ff28e49101e"
    );
    assert_ne!(hash, sha256(&bytes));
}

#[test]
fn test_lite_data_account_url_skips_content() {
    assert_eq!(
        lite_data_account_url(&data_entry().data),
        "acc://750e2295f7d3e855b0080d5a3de12803f7a0bc26dc84c1ccbf2aa46a8b61f314"
    );
}

// ---------------------------------------------------------------------------
// Keys and lite identities
// ---------------------------------------------------------------------------

#[test]
fn test_key_hashes_and_lite_identities() {
    let cases = [
        (
            Algorithm::Ed25519,
            "8a88e3dd7409f195fd52db2d3cba5d72ca6709bf1d94121bf3748801b40f6f5c",
            "34750f98bd59fcfc946da45aaabe933be154a4b5094e1c4abf42866505f3c97e",
            "acc://34750f98bd59fcfc946da45aaabe933be154a4b5127bc39c",
        ),
        (
            Algorithm::Rcd1,
            "8a88e3dd7409f195fd52db2d3cba5d72ca6709bf1d94121bf3748801b40f6f5c",
            "d6ef0d0edbfcba01000afa5de08c92dc809b488499abbf1700a865362003ddb6",
            "acc://d6ef0d0edbfcba01000afa5de08c92dc809b4884b306beec",
        ),
        (
            Algorithm::Btc,
            "031b84c5567b126440995d3ed5aaba0565d71e1834604819ff9c17f5e9d5dd078f",
            "79b000887626b294a914501a4cd226b58b235983",
            "acc://79b000887626b294a914501a4cd226b58b2359835192d2c6",
        ),
        (
            Algorithm::Eth,
            "041b84c5567b126440995d3ed5aaba0565d71e1834604819ff9c17f5e9d5dd078f\
             70beaf8f588b541507fed6a642c5ab42dfdf8120a7f639de5122d47a69a8e8d1",
            "1a642f0e3c3af545e7acbd38b07251b3990914f1",
            "acc://1a642f0e3c3af545e7acbd38b07251b3990914f16f3081e7",
        ),
    ];

    for (algorithm, public_key, key_hash, lite) in cases {
        let key = key(algorithm);
        assert_eq!(hex::encode(key.public_key_bytes()), public_key, "{algorithm}");
        assert_eq!(hex::encode(key.key_hash()), key_hash, "{algorithm}");
        assert_eq!(key.lite_identity().url(), lite, "{algorithm}");
    }
}

#[test]
fn test_lite_token_account() {
    assert_eq!(
        key(Algorithm::Ed25519).lite_identity().token_account(),
        "acc://34750f98bd59fcfc946da45aaabe933be154a4b5127bc39c/ACME"
    );
}

// ---------------------------------------------------------------------------
// Full signing runs (ed25519 and rcd1 are deterministic)
// ---------------------------------------------------------------------------

fn burn_request() -> SigningRequest {
    SigningRequest::new(
        "acc://alice.acme/credits",
        SIGNER,
        Payload::BurnCredits(BurnCredits { amount: 17 }),
    )
    .memo("golden")
    .timestamp(TIMESTAMP)
}

#[test]
fn test_ed25519_signing_vector() {
    let signed = sign_transaction(&key(Algorithm::Ed25519), burn_request()).unwrap();
    assert_eq!(
        hex::encode(signed.initiator),
        "9f0b200abef2304e34f841f95db60f178d72bfa75f7ec6ec9892aa1a1f30f683"
    );
    assert_eq!(
        hex::encode(signed.hashes.transaction),
        "fc2a01ca43888ba8ba9796e37242e7727c69bfb4b7c59aaae8b124228af43073"
    );
    assert_eq!(
        hex::encode(&signed.envelope.signatures[0].signature),
        "ea0e5ba1a63dcf6937fa0a4a4cfbb716c4f9220b52c4811e45226317e9a2b125\
         f1edbecb13248ed8e77435939357d75f1afd535a7e0febe7291b76cbce262504"
    );
}

#[test]
fn test_rcd1_signing_vector() {
    let signed = sign_transaction(&key(Algorithm::Rcd1), burn_request()).unwrap();
    assert_eq!(
        hex::encode(signed.initiator),
        "a003b93fb1f10730c7f451b02faefafc021d86b548120e80137ff3413c5930c1"
    );
    assert_eq!(
        hex::encode(signed.hashes.transaction),
        "b4702ee5104a9a94c76be3466c7d13dc656625743ad91d88cc3d6cc9630976ad"
    );
    assert_eq!(
        hex::encode(&signed.envelope.signatures[0].signature),
        "b69065d41174136bae77d5f7e7294c2134e661f84ab5886f2a765095e1951bad\
         e344cc3ce179ffa1be7fd8165adaa119905f7dadf81c41fb00582ef075d86b09"
    );
}

#[test]
fn test_header_hash_matches_encoded_header() {
    let signed = sign_transaction(&key(Algorithm::Ed25519), burn_request()).unwrap();
    let header = encode_header("acc://alice.acme/credits", &signed.initiator, Some("golden"));
    assert_eq!(signed.hashes.header, sha256(&header));
}

#[test]
fn test_padded_faucet_signing_vector() {
    let request = SigningRequest::new(
        "acc://alice.acme",
        SIGNER,
        Payload::AcmeFaucet(AcmeFaucet { url: "a".repeat(60) }),
    )
    .timestamp(TIMESTAMP);
    let signed = sign_transaction(&key(Algorithm::Ed25519), request).unwrap();

    assert!(signed.padded);
    assert_eq!(signed.body_bytes.len(), 65);
    assert_eq!(signed.body_bytes.last(), Some(&0x00));
    assert_eq!(
        hex::encode(signed.hashes.body),
        "f2f86f2b37e137769b9fb78c081e05e63270350c8a0ebff91b543b49bd29629d"
    );
    assert_eq!(
        hex::encode(signed.hashes.transaction),
        "13a920564350cf00e7edd9e7a797a3ff40a815ff04965bba44229e5175addd6b"
    );
    assert_eq!(
        hex::encode(&signed.envelope.signatures[0].signature),
        "68442dfdee133faa83d2ccfadc738f861063423e684c5cb1a0e92b42c8d2cf68\
         b05a41e6291384b863d1ebbe10a915f32c38322c1f499b2483413da399c29a0d"
    );
}

#[test]
fn test_write_data_to_transaction_vector() {
    let request = SigningRequest::new(
        "acc://alice.acme",
        SIGNER,
        Payload::WriteDataTo(WriteDataTo {
            recipient: "acc://lite-data".into(),
            entry: Some(data_entry()),
        }),
    )
    .timestamp(TIMESTAMP);
    let signed = sign_transaction(&key(Algorithm::Ed25519), request).unwrap();
    assert_eq!(
        hex::encode(signed.hashes.transaction),
        "2c618d4be219b76daa6a010bd9a48351fdc1a1286b7076cd56facd01e7ea7c29"
    );
}
