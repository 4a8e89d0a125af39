use keydoc_core::{convert, CertificateError, Error, Jwks, KeyAlgorithm, KeyType, KeyUse};
use serde_json::Value;

mod common;

fn expected_key_id(certificate_pem: &str) -> String {
    let certificate = openssl::x509::X509::from_pem(certificate_pem.as_bytes()).unwrap();
    let der = certificate.public_key().unwrap().public_key_to_der().unwrap();
    base64::encode_config(openssl::sha::sha256(&der), base64::URL_SAFE_NO_PAD)
}

#[test_log::test]
fn rsa_certificate_produces_single_key_document() {
    let pem = common::certificate_pem(&common::rsa_key(2048));

    let conversion = convert(&pem).expect("conversion failed");
    let jwks: Jwks = conversion.document.parse().unwrap();

    assert_eq!(1, jwks.keys().len());
    let jwk = &jwks.keys()[0];
    assert_eq!(&KeyType::Rsa, jwk.key_type());
    assert_eq!(Some(&KeyAlgorithm::Rs256), jwk.algorithm());
    assert_eq!(Some(&KeyUse::Sig), jwk.key_use());
    assert_eq!(Some(expected_key_id(&pem).as_str()), jwk.key_id());
    assert_eq!(expected_key_id(&pem), conversion.key_id);
}

#[test_log::test]
fn document_has_exact_wire_shape() {
    let pem = common::certificate_pem(&common::rsa_key(2048));

    let conversion = convert(&pem).unwrap();
    let value: Value = serde_json::from_str(&conversion.document).unwrap();

    let root = value.as_object().unwrap();
    assert_eq!(vec!["keys"], root.keys().map(String::as_str).collect::<Vec<_>>());
    let key = root["keys"][0].as_object().unwrap();
    let mut fields: Vec<_> = key.keys().map(String::as_str).collect();
    fields.sort_unstable();
    assert_eq!(vec!["alg", "e", "kid", "kty", "n", "use"], fields);

    assert!(conversion.document.starts_with("{\n  \"keys\": [\n    {\n      \"kty\": \"RSA\",\n      \"use\": \"sig\",\n      \"kid\": "));
    let field = |name: &str| {
        conversion
            .document
            .find(&format!("\n      \"{}\": ", name))
            .unwrap_or_else(|| panic!("field {} missing", name))
    };
    let positions: Vec<_> = ["kty", "use", "kid", "alg", "n", "e"]
        .into_iter()
        .map(field)
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{:?}", positions);
    assert!(!conversion.document.ends_with('\n'));
}

#[test_log::test]
fn conversion_is_deterministic() {
    let pem = common::certificate_pem(&common::rsa_key(2048));

    let first = convert(&pem).unwrap();
    let second = convert(&pem).unwrap();

    assert_eq!(first, second);
}

#[test_log::test]
fn key_id_depends_only_on_public_key() {
    let key = common::rsa_key(2048);
    let first = common::pem_string(&common::certificate(&key, "a.example.com", 1, 30));
    let second = common::pem_string(&common::certificate(&key, "b.example.com", 99, 3650));
    assert_ne!(first, second);

    let first = convert(&first).unwrap();
    let second = convert(&second).unwrap();

    assert_eq!(first.key_id, second.key_id);
    assert_eq!(first.document, second.document);
}

#[test_log::test]
fn different_keys_have_different_ids() {
    let first = convert(&common::certificate_pem(&common::rsa_key(2048))).unwrap();
    let second = convert(&common::certificate_pem(&common::rsa_key(2048))).unwrap();

    assert_ne!(first.key_id, second.key_id);
}

#[test_log::test]
fn modulus_and_exponent_decode_to_original_key() {
    let key = common::rsa_key(4096);
    let rsa = key.rsa().unwrap();

    let conversion = convert(&common::certificate_pem(&key)).unwrap();
    let jwks: Jwks = conversion.document.parse().unwrap();
    let jwk = &jwks.keys()[0];

    let n = base64::decode_config(jwk.modulus(), base64::URL_SAFE_NO_PAD).unwrap();
    let e = base64::decode_config(jwk.exponent(), base64::URL_SAFE_NO_PAD).unwrap();
    assert_eq!(rsa.n().to_vec(), n);
    assert_eq!(rsa.e().to_vec(), e);
    assert_eq!(Some(&KeyAlgorithm::Rs256), jwk.algorithm());
}

#[test_log::test]
fn trailing_blocks_are_ignored() {
    let key = common::rsa_key(2048);
    let pem = common::certificate_pem(&key);
    let other = common::certificate_pem(&common::rsa_key(2048));
    let bundle = format!("{}{}", pem, other);

    assert_eq!(convert(&pem).unwrap(), convert(&bundle).unwrap());
}

#[test_log::test]
fn pem_label_is_not_checked() {
    let certificate = common::certificate(&common::rsa_key(2048), "keys.example.com", 7, 365);
    let relabelled = pem::encode(&pem::Pem::new("PUBLIC KEY", certificate.to_der().unwrap()));

    let conversion = convert(&relabelled).expect("payload is a certificate, label is irrelevant");

    assert_eq!(convert(&common::pem_string(&certificate)).unwrap(), conversion);
}

#[test_log::test]
fn empty_input_is_invalid_pem() {
    assert!(matches!(convert(""), Err(Error::InvalidPEM(_))));
}

#[test_log::test]
fn plain_text_is_invalid_pem() {
    assert!(matches!(
        convert("this is not a certificate"),
        Err(Error::InvalidPEM(_))
    ));
}

#[test_log::test]
fn non_certificate_payload_is_invalid_certificate() {
    let garbage = pem::encode(&pem::Pem::new("CERTIFICATE", b"hello world".to_vec()));
    assert!(matches!(
        convert(&garbage),
        Err(Error::InvalidCertificate(_))
    ));

    let public_key = common::rsa_key(2048).public_key_to_der().unwrap();
    let public_key = pem::encode(&pem::Pem::new("CERTIFICATE", public_key));
    assert!(matches!(
        convert(&public_key),
        Err(Error::InvalidCertificate(_))
    ));
}

#[test_log::test]
fn trailing_bytes_after_certificate_are_rejected() {
    let mut der = common::certificate(&common::rsa_key(2048), "keys.example.com", 3, 365)
        .to_der()
        .unwrap();
    der.extend_from_slice(b"trailing junk");
    let pem = pem::encode(&pem::Pem::new("CERTIFICATE", der));

    let err = convert(&pem).unwrap_err();

    assert!(
        matches!(
            err,
            Error::InvalidCertificate(CertificateError::TrailingData(13))
        ),
        "{:?}",
        err
    );
}

#[test_log::test]
fn malformed_block_before_certificate_is_skipped() {
    let pem = common::certificate_pem(&common::rsa_key(2048));
    let text = format!(
        "-----BEGIN CERTIFICATE-----\n!!!notbase64!!!\n-----END CERTIFICATE-----\n{}",
        pem
    );

    assert_eq!(convert(&pem).unwrap(), convert(&text).unwrap());
}

#[test_log::test]
fn ec_certificate_is_unsupported() {
    let result = convert(&common::certificate_pem(&common::ec_key()));

    match result {
        Err(Error::UnsupportedKeyType(name)) => assert_eq!("EC", name),
        other => panic!("expected UnsupportedKeyType, got {:?}", other),
    }
}

#[test_log::test]
fn ed25519_certificate_is_unsupported() {
    let result = convert(&common::certificate_pem(&common::ed25519_key()));

    assert!(matches!(result, Err(Error::UnsupportedKeyType(name)) if name == "Ed25519"));
}

#[test_log::test]
fn errors_describe_the_failure() {
    let err = convert(&common::certificate_pem(&common::ec_key())).unwrap_err();
    assert_eq!("unsupported public key type EC, must be RSA", err.to_string());

    let err = convert("").unwrap_err();
    assert!(err.to_string().starts_with("failed to decode PEM"));
}
