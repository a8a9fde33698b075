//! Property-based tests for the broadcast codecs

use broadcast_wire::*;
use proptest::prelude::*;

fn arb_pubkey() -> impl Strategy<Value = PubKey> {
    prop::collection::vec(any::<u8>(), 64).prop_map(|v| PubKey::try_from(v.as_slice()).unwrap())
}

prop_compose! {
    fn arb_envelope()(
        nonce in any::<u64>(),
        expiration in any::<i64>(),
        version in 0u64..12,
        stream in any::<u64>(),
        tag in prop::array::uniform32(any::<u8>()),
        encrypted in prop::collection::vec(any::<u8>(), 0..256),
    ) -> (u64, i64, u64, u64, [u8; 32], Vec<u8>) {
        (nonce, expiration, version, stream, tag, encrypted)
    }
}

prop_compose! {
    fn arb_sender()(
        from_address_version in any::<u64>(),
        from_stream in any::<u64>(),
        behavior in any::<u32>(),
        signing_key in arb_pubkey(),
        encryption_key in arb_pubkey(),
        pow in (any::<u64>(), any::<u64>()),
    ) -> (u64, u64, u32, PubKey, PubKey, (u64, u64)) {
        (from_address_version, from_stream, behavior, signing_key, encryption_key, pow)
    }
}

prop_compose! {
    fn arb_broadcast()(
        env in arb_envelope(),
        sender in arb_sender(),
        encoding in any::<u64>(),
        message in prop::collection::vec(any::<u8>(), 0..512),
        signature in prop::collection::vec(any::<u8>(), 0..80),
    ) -> Broadcast {
        let (nonce, expiration, version, stream, tag, encrypted) = env;
        let (
            from_address_version,
            from_stream,
            behavior,
            signing_key,
            encryption_key,
            (nonce_trials, extra_bytes),
        ) = sender;
        Broadcast::new(BroadcastParams {
            nonce,
            expiration,
            version,
            stream,
            tag: has_tag(version).then_some(Tag(tag)),
            encrypted,
            from_address_version,
            from_stream,
            behavior,
            signing_key,
            encryption_key,
            nonce_trials,
            extra_bytes,
            encoding,
            message,
            signature,
        })
    }
}

/// Only the fields the wire envelope carries.
fn envelope_of(b: &Broadcast) -> Broadcast {
    let mut out = Broadcast {
        tag: b.tag,
        encrypted: b.encrypted.clone(),
        ..Broadcast::default()
    };
    out.set_header(b.header());
    out
}

proptest! {
    #[test]
    fn var_int_roundtrip(x in any::<u64>()) {
        let mut buf = Vec::new();
        ser::write_var_int(&mut buf, x).unwrap();
        prop_assert_eq!(buf.len(), ser::var_int_serialize_size(x));
        prop_assert_eq!(ser::read_var_int(&mut buf.as_slice()).unwrap(), x);
    }

    #[test]
    fn wire_roundtrip(b in arb_broadcast()) {
        let bytes = b.to_bytes().unwrap();
        let decoded = Broadcast::from_bytes(&bytes).unwrap();
        prop_assert_eq!(decoded, envelope_of(&b));
    }

    #[test]
    fn wire_omits_tag_below_version_5(
        b in arb_broadcast(),
        tag in prop::array::uniform32(any::<u8>()),
    ) {
        let mut b = b;
        b.version %= TAGGED_BROADCAST_VERSION;
        b.tag = Some(Tag(tag));
        let with_tag = b.to_bytes().unwrap();
        b.tag = None;
        prop_assert_eq!(&with_tag, &b.to_bytes().unwrap());
        prop_assert_eq!(Broadcast::from_bytes(&with_tag).unwrap().tag, None);
    }

    #[test]
    fn encryption_roundtrip_independent_of_header(b in arb_broadcast(), other in arb_broadcast()) {
        let bytes = b.encryption_bytes().unwrap();
        let mut decoded = other.clone();
        decoded.decode_from_decrypted(&mut bytes.as_slice()).unwrap();
        // Header fields stay as they were.
        prop_assert_eq!(decoded.header(), other.header());
        prop_assert_eq!(decoded.tag, other.tag);
        prop_assert_eq!(&decoded.encrypted, &other.encrypted);
        // Plaintext fields come from `b`.
        decoded.set_header(b.header());
        decoded.tag = b.tag;
        decoded.encrypted = b.encrypted.clone();
        prop_assert_eq!(decoded, b);
    }

    #[test]
    fn signing_ignores_nonce_ciphertext_and_signature(
        b in arb_broadcast(),
        nonce in any::<u64>(),
        encrypted in prop::collection::vec(any::<u8>(), 0..64),
        signature in prop::collection::vec(any::<u8>(), 0..80),
    ) {
        let before = b.signing_bytes().unwrap();
        let mut c = b;
        c.nonce = nonce;
        c.encrypted = encrypted;
        c.signature = signature;
        prop_assert_eq!(before, c.signing_bytes().unwrap());
    }

    #[test]
    fn signing_is_header_tail_plus_plaintext_without_signature(b in arb_broadcast()) {
        let wire = b.to_bytes().unwrap();
        let header_len = wire.len() - b.encrypted.len();
        let plain = b.encryption_bytes().unwrap();
        let mut sig_field = Vec::new();
        ser::write_var_bytes(&mut sig_field, &b.signature).unwrap();

        let mut expected = wire[8..header_len].to_vec();
        expected.extend_from_slice(&plain[..plain.len() - sig_field.len()]);
        prop_assert_eq!(b.signing_bytes().unwrap(), expected);
    }

    #[test]
    fn plain_encoding_roundtrip(body in prop::collection::vec(any::<u8>(), 0..1024)) {
        let enc = Encoding::plain(body);
        let mut buf = Vec::new();
        format::encode(&mut buf, &enc).unwrap();
        prop_assert_eq!(format::decode(&mut buf.as_slice()).unwrap(), enc);
    }

    #[test]
    fn subject_body_roundtrip(
        subject in prop::collection::vec(
            any::<u8>().prop_filter("no newline", |b| *b != b'\n'),
            0..40,
        ),
        body in prop::collection::vec(any::<u8>(), 0..200),
    ) {
        let enc = Encoding::subject_body(subject, body);
        let mut buf = Vec::new();
        format::encode(&mut buf, &enc).unwrap();
        prop_assert_eq!(format::decode(&mut buf.as_slice()).unwrap(), enc);
    }

    #[test]
    fn wire_decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..128)) {
        let _ = Broadcast::from_bytes(&bytes);
        let _ = Broadcast::default().decode_from_decrypted(&mut bytes.as_slice());
    }
}
