#![no_main]

use libfuzzer_sys::fuzz_target;
use loginldap::auth::normalize_remote_user;
use loginldap_ldap::LdapConfig;

fuzz_target!(|identity: &str| {
    let login = normalize_remote_user(identity);
    assert!(identity.starts_with(login));
    assert!(!login.contains('@'));

    let filter = LdapConfig::default().build_user_filter(login);
    assert!(!filter[5..filter.len() - 1].contains(['(', ')', '*']));
});
