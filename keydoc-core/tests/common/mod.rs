#![allow(dead_code)]

use openssl::{
    asn1::Asn1Time,
    bn::BigNum,
    ec::{EcGroup, EcKey},
    hash::MessageDigest,
    nid::Nid,
    pkey::{Id, PKey, Private},
    rsa::Rsa,
    x509::{X509Name, X509},
};

pub fn rsa_key(bits: u32) -> PKey<Private> {
    PKey::from_rsa(Rsa::generate(bits).expect("failed to generate RSA key"))
        .expect("failed to wrap RSA key")
}

pub fn ec_key() -> PKey<Private> {
    let group = EcGroup::from_curve_name(Nid::X9_62_PRIME256V1).expect("unknown curve");
    PKey::from_ec_key(EcKey::generate(&group).expect("failed to generate EC key"))
        .expect("failed to wrap EC key")
}

pub fn ed25519_key() -> PKey<Private> {
    PKey::generate_ed25519().expect("failed to generate Ed25519 key")
}

/// Self-signed certificate for `key`. Subject, serial and validity vary with
/// the arguments so that two certificates for the same key differ.
pub fn certificate(key: &PKey<Private>, common_name: &str, serial: u32, expiry_days: u32) -> X509 {
    let mut name = X509Name::builder().unwrap();
    name.append_entry_by_nid(Nid::COMMONNAME, common_name)
        .unwrap();
    let name = name.build();

    let mut builder = X509::builder().unwrap();
    builder.set_version(2).unwrap();
    builder.set_subject_name(&name).unwrap();
    builder.set_issuer_name(&name).unwrap();
    builder
        .set_not_before(&Asn1Time::days_from_now(0).unwrap())
        .unwrap();
    builder
        .set_not_after(&Asn1Time::days_from_now(expiry_days).unwrap())
        .unwrap();
    builder.set_pubkey(key).unwrap();
    builder
        .set_serial_number(&BigNum::from_u32(serial).unwrap().to_asn1_integer().unwrap())
        .unwrap();

    // Ed25519 signs the message directly, without a separate digest.
    let digest = if key.id() == Id::ED25519 {
        MessageDigest::null()
    } else {
        MessageDigest::sha256()
    };
    builder.sign(key, digest).unwrap();

    builder.build()
}

pub fn certificate_pem(key: &PKey<Private>) -> String {
    pem_string(&certificate(key, "keys.example.com", 1, 365))
}

pub fn pem_string(certificate: &X509) -> String {
    String::from_utf8(certificate.to_pem().unwrap()).unwrap()
}
