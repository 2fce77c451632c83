use kyberlink_envelope::{envelope, EnvelopeError, KemProvider, MlKem1024Provider, SharedSecret};

fn session_id() -> String {
    "ab".repeat(32)
}

fn other_session_id() -> String {
    "cd".repeat(32)
}

fn fresh_secret() -> SharedSecret {
    let (pk, sk) = MlKem1024Provider::keygen();
    let (ss, ct) = MlKem1024Provider::encapsulate(&pk).unwrap();
    let ss_peer = MlKem1024Provider::decapsulate(&sk, &ct).unwrap();
    assert_eq!(&ss[..], &ss_peer[..]);
    ss
}

#[test]
fn roundtrip_basic() {
    let ss = fresh_secret();
    let sid = session_id();
    let plaintext = b"hello post-quantum world";

    let frame = envelope::seal(plaintext, &ss, &sid).unwrap();
    let pt = envelope::open(&frame, &ss, &sid).unwrap();
    assert_eq!(&pt, plaintext);
}

#[test]
fn roundtrip_empty_plaintext() {
    let ss = fresh_secret();
    let sid = session_id();

    let frame = envelope::seal(b"", &ss, &sid).unwrap();
    let pt = envelope::open(&frame, &ss, &sid).unwrap();
    assert_eq!(pt, b"");
}

#[test]
fn roundtrip_large_plaintext() {
    let ss = fresh_secret();
    let sid = session_id();
    let plaintext = vec![0xABu8; 65536];

    let frame = envelope::seal(&plaintext, &ss, &sid).unwrap();
    let pt = envelope::open(&frame, &ss, &sid).unwrap();
    assert_eq!(pt, plaintext);
}

#[test]
fn nondeterministic_frames() {
    let ss = fresh_secret();
    let sid = session_id();

    let a = envelope::seal(b"data", &ss, &sid).unwrap();
    let b = envelope::seal(b"data", &ss, &sid).unwrap();
    assert_ne!(a, b);
}

#[test]
fn wrong_session_fails() {
    let ss = fresh_secret();

    let frame = envelope::seal(b"data", &ss, &session_id()).unwrap();
    let result = envelope::open(&frame, &ss, &other_session_id());
    assert_eq!(result, Err(EnvelopeError));
}

#[test]
fn wrong_secret_fails() {
    let ss = fresh_secret();
    let other = fresh_secret();
    let sid = session_id();

    let frame = envelope::seal(b"data", &ss, &sid).unwrap();
    let result = envelope::open(&frame, &other, &sid);
    assert_eq!(result, Err(EnvelopeError));
}

// reverse(ss) hands an attacker the salt/IV key of the *other* direction,
// never both layers of the same frame.
#[test]
fn reversed_secret_fails() {
    let ss = fresh_secret();
    let sid = session_id();

    let mut reversed = *ss;
    reversed.reverse();

    let frame = envelope::seal(b"data", &ss, &sid).unwrap();
    let result = envelope::open(&frame, &reversed, &sid);
    assert_eq!(result, Err(EnvelopeError));
}

#[test]
fn tamper_salt_iv_layer_fails() {
    let ss = fresh_secret();
    let sid = session_id();

    let mut frame = envelope::seal(b"data", &ss, &sid).unwrap();
    frame[2 + 5] ^= 0x01;
    assert_eq!(envelope::open(&frame, &ss, &sid), Err(EnvelopeError));
}

#[test]
fn tamper_payload_fails() {
    let ss = fresh_secret();
    let sid = session_id();

    let mut frame = envelope::seal(b"data", &ss, &sid).unwrap();
    let last = frame.len() - 1;
    frame[last] ^= 0x01;
    assert_eq!(envelope::open(&frame, &ss, &sid), Err(EnvelopeError));
}

#[test]
fn tamper_length_prefix_fails() {
    let ss = fresh_secret();
    let sid = session_id();

    let mut frame = envelope::seal(b"data", &ss, &sid).unwrap();
    frame[0] = 0xFF;
    frame[1] = 0xFF;
    assert_eq!(envelope::open(&frame, &ss, &sid), Err(EnvelopeError));
}

#[test]
fn truncated_fails() {
    let ss = fresh_secret();
    let sid = session_id();

    let frame = envelope::seal(b"data", &ss, &sid).unwrap();
    assert_eq!(envelope::open(&frame[..10], &ss, &sid), Err(EnvelopeError));
    assert_eq!(envelope::open(&frame[..1], &ss, &sid), Err(EnvelopeError));
    assert_eq!(envelope::open(b"", &ss, &sid), Err(EnvelopeError));
}

#[test]
fn all_errors_are_uniform() {
    let ss = fresh_secret();
    let other = fresh_secret();
    let sid = session_id();

    let frame = envelope::seal(b"data", &ss, &sid).unwrap();

    let err1 = envelope::open(&frame, &ss, &other_session_id()).unwrap_err();
    let err2 = envelope::open(&frame, &other, &sid).unwrap_err();
    let err3 = envelope::open(b"xx", &ss, &sid).unwrap_err();

    let mut tampered = frame.clone();
    tampered[4] ^= 0x01;
    let err4 = envelope::open(&tampered, &ss, &sid).unwrap_err();

    // All failures must be identical
    assert_eq!(err1, err2);
    assert_eq!(err2, err3);
    assert_eq!(err3, err4);
    assert_eq!(format!("{}", err1), "envelope operation failed");
}

#[test]
fn direct_key_roundtrip() {
    let ss = fresh_secret();

    let sealed = envelope::seal_direct(&ss, b"salt and iv go here").unwrap();
    let opened = envelope::open_direct(&ss, &sealed).unwrap();
    assert_eq!(opened, b"salt and iv go here");

    let mut tampered = sealed.clone();
    tampered[3] ^= 0x01;
    assert_eq!(envelope::open_direct(&ss, &tampered), Err(EnvelopeError));
    assert_eq!(envelope::open_direct(&ss, &sealed[..8]), Err(EnvelopeError));
}

#[test]
fn key_serialization_roundtrip() {
    let (pk, sk) = MlKem1024Provider::keygen();
    let sid = session_id();

    let pk2 = kyberlink_envelope::PublicKey::from_bytes(&pk.to_bytes()).unwrap();
    let sk2 = kyberlink_envelope::SecretKey::from_bytes(&sk.to_bytes()).unwrap();

    let (ss, ct) = MlKem1024Provider::encapsulate(&pk2).unwrap();
    let ss_peer = MlKem1024Provider::decapsulate(&sk2, &ct).unwrap();

    let frame = envelope::seal(b"key serialization test", &ss, &sid).unwrap();
    let pt = envelope::open(&frame, &ss_peer, &sid).unwrap();
    assert_eq!(pt, b"key serialization test");
}

#[test]
fn kem_rejects_malformed_input() {
    let (pk, sk) = MlKem1024Provider::keygen();

    assert!(kyberlink_envelope::PublicKey::from_bytes(&[0u8; 16]).is_err());
    assert!(kyberlink_envelope::SecretKey::from_bytes(&[0u8; 16]).is_err());
    assert!(MlKem1024Provider::decapsulate(&sk, &[0u8; 10]).is_err());

    // wrong-length ciphertext, even when close
    let (_, ct) = MlKem1024Provider::encapsulate(&pk).unwrap();
    assert!(MlKem1024Provider::decapsulate(&sk, &ct[..ct.len() - 1]).is_err());
}
