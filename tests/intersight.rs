use {
    base64::{engine::general_purpose::STANDARD as BASE64, Engine},
    chrono::{TimeZone, Utc},
    intersight_signature::{
        authorization_header, sha256, sign_at, sign_digest, string_to_sign, ApiKey, ApiRequest, Endpoint, HeaderSet,
        KeyStore,
    },
    rsa::{
        pkcs1v15::{Signature, VerifyingKey},
        pkcs8::DecodePrivateKey,
        signature::Verifier,
        RsaPrivateKey,
    },
    serde_json::Value,
    sha2::Sha256,
    std::{env, fs, path::PathBuf},
};

const KEY_ID: &str = "59c84e4a16267c0001c23428/59c84d2816267c0001c23421/5a1f6a6e16267c0001cdd2ba";

fn data_path(parts: &[&str]) -> PathBuf {
    let mut path = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    path.push("tests");
    for part in parts {
        path.push(part);
    }
    path
}

fn private_key_pem() -> String {
    fs::read_to_string(data_path(&["data", "private_key_pkcs1.pem"])).unwrap()
}

#[test_log::test]
fn get_filter() {
    run("get-filter");
}

#[test_log::test]
fn post_create() {
    run("post-create");
}

#[test_log::test]
fn patch_update() {
    run("patch-update");
}

/// Sign the request described by `<basename>.json` as of `Mon, 19 Oct 2026 12:00:00 GMT` and
/// compare against `<basename>.sts` and `<basename>.authz`.
fn run(basename: &str) {
    let req_path = data_path(&["intersight-golden", basename]);
    let json_path = req_path.with_extension("json");
    let sts_path = req_path.with_extension("sts");
    let authz_path = req_path.with_extension("authz");

    let descriptor: Value = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    let mut request = ApiRequest::new(descriptor["resource_path"].as_str().unwrap())
        .with_query_params(descriptor["query_params"].clone())
        .with_body(descriptor["body"].clone());
    if let Some(moid) = descriptor["moid"].as_str() {
        request = request.with_moid(moid);
    }

    let expected_sts = fs::read_to_string(&sts_path).unwrap();
    let expected_authz = fs::read_to_string(&authz_path).unwrap();

    let keys = KeyStore::with_key(ApiKey::new(KEY_ID, private_key_pem()));
    let timestamp = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
    let signed = sign_at(&keys, &Endpoint::default(), &request, &timestamp).unwrap();

    assert_eq!(signed.string_to_sign(), expected_sts, "{:?}", sts_path);
    assert_eq!(signed.authorization(), expected_authz.trim_end(), "{:?}", authz_path);

    // The same value falls out of the individual building blocks.
    let first_line = expected_sts.lines().next().unwrap();
    let target = first_line.strip_prefix("(request-target): ").unwrap();
    let headers: HeaderSet = signed.signed_headers().iter().collect();
    assert_eq!(string_to_sign(target, &headers), expected_sts);

    let signature = sign_digest(&sha256(expected_sts.as_bytes()), &private_key_pem()).unwrap();
    assert_eq!(authorization_header(KEY_ID, &headers, &signature), expected_authz.trim_end());
}

#[test_log::test]
fn signature_verifies_with_public_key() {
    let pkcs8_pem = fs::read_to_string(data_path(&["data", "private_key_pkcs8.pem"])).unwrap();
    let public_key = RsaPrivateKey::from_pkcs8_pem(&pkcs8_pem).unwrap().to_public_key();
    let verifying_key = VerifyingKey::<Sha256>::new(public_key);

    // PKCS#8 keys sign the same way as PKCS#1 keys.
    let keys = KeyStore::with_key(ApiKey::new(KEY_ID, pkcs8_pem));
    let request = ApiRequest::get("/compute/PhysicalSummaries").with_query_param("$top", 1);
    let signed = sign_at(&keys, &Endpoint::default(), &request, &Utc::now()).unwrap();

    let authz = signed.authorization();
    let b64 = authz.rsplit("signature=\"").next().unwrap().trim_end_matches('"');
    let signature = Signature::try_from(BASE64.decode(b64).unwrap().as_slice()).unwrap();
    verifying_key.verify(signed.string_to_sign().as_bytes(), &signature).unwrap();
}

#[test_log::test]
fn appliance_endpoint() {
    let keys = KeyStore::with_key(ApiKey::new(KEY_ID, private_key_pem()));
    let endpoint = Endpoint::parse("https://appliance.example.com:8443/api/v1").unwrap();
    let timestamp = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
    let signed = sign_at(&keys, &endpoint, &ApiRequest::get("/ntp/Policies"), &timestamp).unwrap();

    assert_eq!(signed.url(), "https://appliance.example.com:8443/api/v1/ntp/Policies");
    assert_eq!(
        signed.string_to_sign(),
        "(request-target): get /api/v1/ntp/policies\n\
         date: Mon, 19 Oct 2026 12:00:00 GMT\n\
         host: appliance.example.com:8443\n\
         digest: SHA-256=RBNvo1WzZ4oRRq0W9+hknpT7T8If536DEMBg9hyq/4o="
    );
}
