use std::sync::Arc;

use argon2::{Params, PasswordHash};
use argon2_hasher::{Argon2Hasher, Error, HashOptions, HashParams, Hasher};

#[test]
fn hash_and_verify_round_trip() {
    let hasher = Argon2Hasher::default();

    for password in ["user_password_123", "", "„Éë„Çπ„ÉØ„Éº„Éâüîê"] {
        let hash = hasher.make(password).unwrap();
        assert!(hasher.check(password, &hash));
        assert!(!hasher.check("something else entirely", &hash));
    }
}

#[test]
fn empty_hash_never_verifies() {
    let hasher = Argon2Hasher::default();
    assert!(!hasher.check("any-password", ""));
}

#[test]
fn repeated_hashing_salts_differently() {
    let hasher = Argon2Hasher::default();
    let first = hasher.make("same-password").unwrap();
    let second = hasher.make("same-password").unwrap();

    assert_ne!(first, second);
    assert!(hasher.check("same-password", &first));
    assert!(hasher.check("same-password", &second));
}

#[test]
fn emitted_hash_embeds_resolved_parameters() {
    let hasher = Argon2Hasher::default();
    let options = HashOptions {
        memory_cost: Some(2048),
        time_cost: Some(4),
        threads: Some(4),
    };
    let hash = hasher.make_with("password", &options).unwrap();
    assert!(hash.starts_with("$argon2i$"));

    let parsed = PasswordHash::new(&hash).unwrap();
    let params = Params::try_from(&parsed).unwrap();
    assert_eq!(params.m_cost(), 2048);
    assert_eq!(params.t_cost(), 4);
    // The requested parallelism is never forwarded to derivation.
    assert_eq!(params.p_cost(), 1);
}

#[test]
fn rehash_is_parameter_comparison() {
    let hasher = Argon2Hasher::default();
    let options = HashOptions {
        memory_cost: Some(1024),
        time_cost: Some(3),
        ..Default::default()
    };
    let hash = hasher.make_with("password", &options).unwrap();

    // Matching targets: no rehash needed.
    assert!(!hasher.needs_rehash(&hash));
    assert!(!hasher.needs_rehash_with(&hash, &options));

    // Raising the memory cost makes the stored hash outdated.
    let raised = HashOptions {
        memory_cost: Some(2048),
        ..Default::default()
    };
    assert!(hasher.needs_rehash_with(&hash, &raised));
}

#[test]
fn rehash_tracks_instance_defaults() {
    let strong = Argon2Hasher::new(HashParams::new(2048, 4, 1).unwrap());
    let weak_hash = Argon2Hasher::default().make("password").unwrap();

    assert!(strong.needs_rehash(&weak_hash));
    assert!(!strong.needs_rehash(&strong.make("password").unwrap()));
}

#[test]
fn rehash_tolerates_malformed_hashes() {
    let hasher = Argon2Hasher::default();

    assert!(hasher.needs_rehash("not-a-valid-hash"));
    assert!(hasher.needs_rehash(""));
    // Well-formed PHC string whose cost parameters do not decode.
    assert!(hasher.needs_rehash("$argon2i$v=19$m=bad,t=3,p=1$c2FsdHNhbHQ"));
}

#[test]
fn rehash_flags_other_algorithms() {
    use argon2::password_hash::{PasswordHasher, SaltString};
    use rand::rngs::OsRng;

    // Argon2id hash with the facade's default cost parameters.
    let params = argon2::Params::new(1024, 3, 1, None).unwrap();
    let argon2id =
        argon2::Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2id
        .hash_password(b"password", &salt)
        .unwrap()
        .to_string();

    let hasher = Argon2Hasher::default();
    assert!(hasher.check("password", &hash));
    assert!(hasher.needs_rehash(&hash));
}

#[test]
fn out_of_range_parameters_fail_configuration() {
    assert!(matches!(
        HashParams::new(4, 3, 1),
        Err(Error::Configuration(_))
    ));

    let hasher = Argon2Hasher::default();
    let options = HashOptions {
        time_cost: Some(0),
        ..Default::default()
    };
    assert!(matches!(
        hasher.make_with("password", &options),
        Err(Error::Configuration(_))
    ));
}

#[test]
fn options_deserialize_from_host_config() {
    let options: HashOptions =
        serde_json::from_str(r#"{"memory_cost": 2048, "threads": 4}"#).unwrap();
    assert_eq!(options.memory_cost, Some(2048));
    assert_eq!(options.time_cost, None);
    assert_eq!(options.threads, Some(4));

    let empty: HashOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(empty, HashOptions::default());
}

#[test]
fn usable_as_generic_hashing_service() {
    let service: Arc<dyn Hasher> = Arc::new(Argon2Hasher::default());

    let hash = service.make("password").unwrap();
    assert!(service.check("password", &hash));
    assert!(!service.needs_rehash(&hash));
}
