use loginldap_core::auth::AuthResult;
use loginldap_core::{Error, ErrorKind};

use lazy_static::*;
use prometheus::{opts, register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

pub(crate) const PATH_WEBSERVER: &str = "webserver";
pub(crate) const PATH_FALLBACK: &str = "fallback";

lazy_static! {
    static ref LOGIN_TOTAL: IntCounterVec =
        register_int_counter_vec!("loginldap_login_total", "Total number of login attempts by path and outcome.", &["path", "outcome"]).unwrap();
    static ref SYNC_TOTAL: IntCounter =
        register_int_counter!(opts!("loginldap_synchronizations_total", "Total number of users synchronized after a pre-authenticated login.")).unwrap();
}

/// Add a metric for a finished login attempt.
pub(crate) fn add_login_metric(path: &str, result: &Result<AuthResult, Error>) {
    let outcome = match result {
        Ok(AuthResult::Success(_)) => "success",
        Ok(AuthResult::Failure { .. }) => "failure",
        Err(e) if e.kind() == ErrorKind::CannotConnect => "unreachable",
        Err(_) => "error",
    };
    LOGIN_TOTAL.with_label_values(&[path, outcome]).inc();
}

/// Add a metric for a user synchronized on the trusted path.
pub(crate) fn add_sync_metric() {
    SYNC_TOTAL.inc();
}
