// SPDX-License-Identifier: Apache-2.0

use deprecheck_policies::{
    load_policy_from_workspace, policy_config_path, resolve_policy_path,
    ENV_DEPRECHECK_POLICY_PATH,
};

// Single test in this binary: it mutates process environment.
#[test]
fn env_override_redirects_policy_lookup() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::create_dir_all(dir.path().join("alt")).expect("mkdir");
    std::fs::write(
        dir.path().join("alt/policy.toml"),
        "schema_version = \"1\"\nignored_codes = [\"PB118\"]\n[codes]\nintegration = \"IN153\"\nscript = \"SC107\"\nplaybook = \"PB118\"\n",
    )
    .expect("write policy");

    std::env::remove_var(ENV_DEPRECHECK_POLICY_PATH);
    assert_eq!(resolve_policy_path(dir.path()), policy_config_path(dir.path()));
    assert!(load_policy_from_workspace(dir.path()).is_err());

    std::env::set_var(ENV_DEPRECHECK_POLICY_PATH, "alt/policy.toml");
    assert_eq!(
        resolve_policy_path(dir.path()),
        dir.path().join("alt/policy.toml")
    );
    let policy = load_policy_from_workspace(dir.path()).expect("load override");
    assert!(policy.is_ignored("PB118"));

    std::env::set_var(ENV_DEPRECHECK_POLICY_PATH, "   ");
    assert_eq!(resolve_policy_path(dir.path()), policy_config_path(dir.path()));
    std::env::remove_var(ENV_DEPRECHECK_POLICY_PATH);
}
