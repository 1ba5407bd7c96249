use scitt_cose::{
    HashAlgorithm, HashedStatementBuilder, MetaMap, SignedStatement, SigningKey, VerifyError,
};

// Test key from RFC 6979, section A.2.5.
const D: &str = "c9afa9d845ba75166b5c215767b1d6934e50c3db36e89b127b8a622b120f6721";
const X: &str = "60fed4ba255a9d31c961eb74c6356d68c049b8923b61fa6ce669622e60f29fb6";
const Y: &str = "7903fe1008b8bc99a41ae9e95628bc64f2f1b20c2d7e9f5177a3c294d4462299";

const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

/// `{1: -7, 4: h'testkey', 13: {1: iss, 2: "hello", 8: {1: COSE_Key}}, -6800: -16}`
const HELLO_PROTECTED: &str = "a401260447746573746b65790da301736469643a7765623a6578616d706c652e636f6d026568656c6c6f08a101a40102200121582060fed4ba255a9d31c961eb74c6356d68c049b8923b61fa6ce669622e60f29fb62258207903fe1008b8bc99a41ae9e95628bc64f2f1b20c2d7e9f5177a3c294d4462299391a8f2f";

/// Statement over "hello" with the header above, produced by an independent
/// COSE implementation.
const HELLO_STATEMENT: &str = "d284587ca401260447746573746b65790da301736469643a7765623a6578616d706c652e636f6d026568656c6c6f08a101a40102200121582060fed4ba255a9d31c961eb74c6356d68c049b8923b61fa6ce669622e60f29fb62258207903fe1008b8bc99a41ae9e95628bc64f2f1b20c2d7e9f5177a3c294d4462299391a8f2fa058202cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b982458401827759fed115c9651432ef46562d8e5e57c0a2c7083e14e760e6d70b65a9f478cbc8693680b65d93e0f9fb12d4f0ed0acf328e7dee649866184f6ee38703a52";

fn test_key() -> SigningKey {
    SigningKey::from_scalar_bytes(&hex::decode(D).unwrap()).unwrap()
}

#[test]
fn sign_hello() {
    let key = test_key();
    let statement = HashedStatementBuilder::new("did:web:example.com", "hello")
        .signing_key(&key)
        .sign(b"hello")
        .unwrap();

    let decoded = statement.verify(None).unwrap();
    assert_eq!(hex::encode(decoded.payload()), HELLO_SHA256);
    assert_eq!(hex::encode(decoded.protected_bytes().unwrap()), HELLO_PROTECTED);
    assert_eq!(decoded.header().hash_algorithm(), HashAlgorithm::Sha256);
    assert_eq!(decoded.header().key_id_str(), Some("testkey"));
    assert_eq!(hex::encode(decoded.header().confirmation_key().x()), X);
    assert_eq!(hex::encode(decoded.header().confirmation_key().y()), Y);
}

#[test]
fn verify_foreign_statement() {
    let statement = SignedStatement::new(hex::decode(HELLO_STATEMENT).unwrap());
    let decoded = statement.verify(None).unwrap();
    assert_eq!(decoded.header().issuer(), "did:web:example.com");
    assert_eq!(decoded.header().subject(), "hello");
    assert_eq!(hex::encode(decoded.payload()), HELLO_SHA256);

    let key = test_key().public_coordinates().unwrap();
    statement.verify(Some(&key)).unwrap();
}

#[test]
fn signatures_are_randomized() {
    let key = test_key();
    let builder = HashedStatementBuilder::new("did:web:example.com", "hello").signing_key(&key);

    let a = builder.sign(b"hello").unwrap();
    let b = builder.sign(b"hello").unwrap();
    assert_ne!(a, b);

    let a = a.verify(None).unwrap();
    let b = b.verify(None).unwrap();
    assert_eq!(a.protected_bytes(), b.protected_bytes());
    assert_eq!(a.payload(), b.payload());
    assert_ne!(a.signature(), b.signature());
}

#[test]
fn larger_digests() {
    let key = test_key();
    for (algorithm, size) in [(HashAlgorithm::Sha384, 48), (HashAlgorithm::Sha512, 64)] {
        let statement = HashedStatementBuilder::new("did:web:example.com", "hello")
            .signing_key(&key)
            .hash_algorithm(algorithm)
            .sign(b"hello")
            .unwrap();

        let decoded = statement.verify(None).unwrap();
        assert_eq!(decoded.payload().len(), size);
        assert_eq!(decoded.header().hash_algorithm(), algorithm);
    }
}

#[test]
fn full_envelope() {
    let key = SigningKey::generate();
    let meta_map = MetaMap::from_json(r#"{"version": "2.0.1", "team": "supply-chain"}"#).unwrap();
    let statement = HashedStatementBuilder::new("did:web:example.com", "sbom:acme")
        .signing_key(&key)
        .key_id("acme-2024")
        .payload_location("https://example.com/sbom.spdx.json")
        .pre_image_content_type("application/spdx+json")
        .meta_map(meta_map.clone())
        .sign(br#"{"spdxVersion": "SPDX-2.3"}"#)
        .unwrap();

    let decoded = statement.verify(None).unwrap();
    let envelope = decoded.header().envelope();
    assert_eq!(
        envelope.location.as_deref(),
        Some("https://example.com/sbom.spdx.json")
    );
    assert_eq!(
        envelope.pre_image_content_type.as_deref(),
        Some("application/spdx+json")
    );
    assert_eq!(envelope.meta_map.as_ref(), Some(&meta_map));
    assert_eq!(decoded.header().key_id(), b"acme-2024");
}

#[test]
fn tampered_header_fails() {
    let mut bytes = hex::decode(HELLO_STATEMENT).unwrap();
    // Flip the last byte of the subject ("hello" -> "hellp").
    let subject = bytes
        .windows(5)
        .position(|w| w == b"hello")
        .unwrap();
    bytes[subject + 4] = b'p';

    let statement = SignedStatement::new(bytes);
    assert!(matches!(
        statement.verify(None),
        Err(VerifyError::Signature(_))
    ));
}
