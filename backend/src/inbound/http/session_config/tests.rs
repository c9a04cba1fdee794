//! Unit tests for session settings.

use std::collections::HashMap;
use std::io::Write;

use mockable::MockEnv;
use rstest::{fixture, rstest};
use tempfile::NamedTempFile;

use super::*;

fn key_file(len: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp key file");
    file.write_all(&vec![b'k'; len]).expect("write key");
    file
}

#[fixture]
fn long_key() -> NamedTempFile {
    key_file(MIN_KEY_BYTES)
}

fn env_with(vars: &[(&'static str, &str)]) -> MockEnv {
    let vars: HashMap<&'static str, String> = vars
        .iter()
        .map(|(name, value)| (*name, (*value).to_owned()))
        .collect();
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |name| vars.get(name).cloned());
    env
}

fn release_env(key: &NamedTempFile, overrides: &[(&'static str, &str)]) -> MockEnv {
    let path = key.path().to_str().expect("utf-8 temp path").to_owned();
    let mut vars: Vec<(&'static str, &str)> = vec![
        (KEY_FILE_ENV, path.as_str()),
        (COOKIE_SECURE_ENV, "1"),
        (SAMESITE_ENV, "Strict"),
        (ALLOW_EPHEMERAL_ENV, "0"),
    ];
    for (name, value) in overrides {
        vars.retain(|(existing, _)| existing != name);
        vars.push((*name, *value));
    }
    env_with(&vars)
}

#[rstest]
fn release_accepts_complete_configuration(long_key: NamedTempFile) {
    let settings = session_settings_from_env(&release_env(&long_key, &[]), BuildMode::Release)
        .expect("valid release settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
#[case::lax("lax", SameSite::Lax)]
#[case::none("None", SameSite::None)]
fn release_parses_same_site(
    long_key: NamedTempFile,
    #[case] raw: &str,
    #[case] expected: SameSite,
) {
    let settings = session_settings_from_env(
        &release_env(&long_key, &[(SAMESITE_ENV, raw)]),
        BuildMode::Release,
    )
    .expect("valid same-site");
    assert_eq!(settings.same_site, expected);
}

#[rstest]
#[case::cookie_secure(COOKIE_SECURE_ENV, "maybe")]
#[case::same_site(SAMESITE_ENV, "sometimes")]
#[case::ephemeral(ALLOW_EPHEMERAL_ENV, "perhaps")]
fn release_rejects_malformed_toggles(
    long_key: NamedTempFile,
    #[case] name: &'static str,
    #[case] value: &str,
) {
    let result =
        session_settings_from_env(&release_env(&long_key, &[(name, value)]), BuildMode::Release);
    assert!(matches!(
        result,
        Err(SessionConfigError::InvalidEnv { name: rejected, .. }) if rejected == name
    ));
}

#[rstest]
fn release_requires_every_toggle(long_key: NamedTempFile) {
    let path = long_key.path().to_str().expect("utf-8 temp path").to_owned();
    let env = env_with(&[(KEY_FILE_ENV, path.as_str())]);
    let result = session_settings_from_env(&env, BuildMode::Release);
    assert!(matches!(
        result,
        Err(SessionConfigError::MissingEnv {
            name: COOKIE_SECURE_ENV
        })
    ));
}

#[rstest]
fn release_rejects_insecure_same_site_none(long_key: NamedTempFile) {
    let env = release_env(&long_key, &[(SAMESITE_ENV, "None"), (COOKIE_SECURE_ENV, "0")]);
    let result = session_settings_from_env(&env, BuildMode::Release);
    assert!(matches!(result, Err(SessionConfigError::InsecureSameSiteNone)));
}

#[rstest]
fn release_rejects_ephemeral_keys(long_key: NamedTempFile) {
    let env = release_env(&long_key, &[(ALLOW_EPHEMERAL_ENV, "1")]);
    let result = session_settings_from_env(&env, BuildMode::Release);
    assert!(matches!(result, Err(SessionConfigError::EphemeralNotAllowed)));
}

#[rstest]
fn release_rejects_short_keys() {
    let short = key_file(MIN_KEY_BYTES - 1);
    let result = session_settings_from_env(&release_env(&short, &[]), BuildMode::Release);
    assert!(matches!(
        result,
        Err(SessionConfigError::KeyTooShort { length, .. }) if length == MIN_KEY_BYTES - 1
    ));
}

#[rstest]
fn release_rejects_missing_key_file() {
    let env = env_with(&[
        (KEY_FILE_ENV, "/nonexistent/analogy/session_key"),
        (COOKIE_SECURE_ENV, "1"),
        (SAMESITE_ENV, "Strict"),
        (ALLOW_EPHEMERAL_ENV, "0"),
    ]);
    let result = session_settings_from_env(&env, BuildMode::Release);
    assert!(matches!(result, Err(SessionConfigError::KeyRead { .. })));
}

#[rstest]
fn debug_defaults_everything() {
    let env = env_with(&[
        (KEY_FILE_ENV, "/nonexistent/analogy/session_key"),
        (COOKIE_SECURE_ENV, "garbage"),
    ]);
    let settings =
        session_settings_from_env(&env, BuildMode::Debug).expect("debug falls back");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn debug_tolerates_insecure_same_site_none() {
    let env = env_with(&[
        (KEY_FILE_ENV, "/nonexistent/analogy/session_key"),
        (COOKIE_SECURE_ENV, "0"),
        (SAMESITE_ENV, "none"),
    ]);
    let settings =
        session_settings_from_env(&env, BuildMode::Debug).expect("debug falls back");
    assert!(!settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::None);
}

#[rstest]
#[case("YES", Some(true))]
#[case(" 0 ", Some(false))]
#[case("on", None)]
fn parses_boolean_toggles(#[case] raw: &str, #[case] expected: Option<bool>) {
    assert_eq!(parse_bool(raw), expected);
}
