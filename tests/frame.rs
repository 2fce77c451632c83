//! Wire-shape and codec tests.

use kyberlink_envelope::{codec, envelope, wire, KemProvider, MlKem1024Provider};

#[test]
fn test_wire_constants() {
    assert_eq!(wire::KEM_PUBLIC_KEY_BYTES, 1568);
    assert_eq!(wire::KEM_SECRET_KEY_BYTES, 3168);
    assert_eq!(wire::KEM_CIPHERTEXT_BYTES, 1568);
    assert_eq!(wire::SHARED_SECRET_BYTES, 32);
    assert_eq!(wire::SALT_IV_BYTES, 28);
    assert_eq!(wire::ENC_SALT_IV_BYTES, 56);
    assert_eq!(wire::INFO_PREFIX, b"kyberlink:v1|session=");
}

#[test]
fn test_kem_component_sizes() {
    let (pk, sk) = MlKem1024Provider::keygen();
    assert_eq!(pk.to_bytes().len(), wire::KEM_PUBLIC_KEY_BYTES);
    assert_eq!(sk.to_bytes().len(), wire::KEM_SECRET_KEY_BYTES);

    let (ss, ct) = MlKem1024Provider::encapsulate(&pk).unwrap();
    assert_eq!(ct.len(), wire::KEM_CIPHERTEXT_BYTES);
    assert_eq!(ss.len(), wire::SHARED_SECRET_BYTES);
}

#[test]
fn test_session_info_layout() {
    let info = wire::session_info("abcd");
    assert_eq!(info, b"kyberlink:v1|session=abcd");
}

#[test]
fn test_frame_structure() {
    let ss = fresh_secret();
    let sid = "ef".repeat(32);
    let plaintext = b"frame layout probe";

    let frame = envelope::seal(plaintext, &ss, &sid).unwrap();

    let declared = ((frame[0] as usize) << 8) | frame[1] as usize;
    assert_eq!(declared, wire::ENC_SALT_IV_BYTES);
    assert_eq!(
        frame.len(),
        wire::LEN_PREFIX_BYTES + wire::ENC_SALT_IV_BYTES + plaintext.len() + wire::AEAD_TAG_BYTES
    );

    let parts = wire::decode_frame(&frame).unwrap();
    assert_eq!(parts.enc_salt_iv.len(), wire::ENC_SALT_IV_BYTES);
    assert_eq!(parts.enc_payload.len(), plaintext.len() + wire::AEAD_TAG_BYTES);
}

#[test]
fn test_decode_frame_rejects_short_input() {
    assert!(wire::decode_frame(b"").is_err());
    assert!(wire::decode_frame(b"\x00").is_err());

    // declared length exceeds what follows
    assert!(wire::decode_frame(&[0x00, 0x38, 0xAA, 0xBB]).is_err());
}

// The response leg sends the two parts unframed; a client that reassembles
// them with the length prefix must land on the same plaintext.
#[test]
fn test_split_matches_framed() {
    let ss = fresh_secret();
    let sid = "0123456789abcdef".repeat(4);

    let (enc_payload, enc_salt_iv) = envelope::seal_split(b"response body", &ss, &sid).unwrap();
    assert_eq!(enc_salt_iv.len(), wire::ENC_SALT_IV_BYTES);

    let frame = wire::encode_frame(&enc_salt_iv, &enc_payload).unwrap();
    let pt = envelope::open(&frame, &ss, &sid).unwrap();
    assert_eq!(pt, b"response body");
}

#[test]
fn test_hex_codec() {
    assert_eq!(codec::hex_encode(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
    assert_eq!(codec::hex_decode("deadbeef").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);

    // odd length
    assert!(codec::hex_decode("abc").is_err());
    // non-hex characters
    assert!(codec::hex_decode("zzzz").is_err());
    assert!(codec::hex_decode("12g4").is_err());
}

#[test]
fn test_base64_codec() {
    let data = b"any carnal pleasure";
    let encoded = codec::base64_encode(data);
    assert_eq!(codec::base64_decode(&encoded).unwrap(), data);

    assert!(codec::base64_decode("not/valid base64!!").is_err());
}

#[test]
fn test_random_bytes() {
    let a = codec::random_bytes(32).unwrap();
    let b = codec::random_bytes(32).unwrap();
    assert_eq!(a.len(), 32);
    assert_ne!(a, b);
}

fn fresh_secret() -> kyberlink_envelope::SharedSecret {
    let (pk, _) = MlKem1024Provider::keygen();
    let (ss, _) = MlKem1024Provider::encapsulate(&pk).unwrap();
    ss
}
