//! Credential checks of the mock authentication service.

use std::sync::LazyLock;

use regex::Regex;

use crate::auth::faults::FaultInjector;
use crate::auth::types::{AuthError, Credentials};

/// The only password the mock service accepts.
pub const ACCEPTED_PASSWORD: &str = "password";

pub const MIN_PASSWORD_LEN: usize = 8;

// ASCII word characters only; `\w` alone would accept any Unicode letter.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?-u:\w)+([\.-]?(?-u:\w)+)*@(?-u:\w)+([\.-]?(?-u:\w)+)*(\.(?-u:\w){2,3})+$")
        .expect("email pattern is valid")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Check `credentials`, after giving `faults` the chance to fail the call.
///
/// Checks run in order: injected fault, email format, password length,
/// password match.
pub fn authenticate(credentials: &Credentials, faults: &dyn FaultInjector) -> Result<(), AuthError> {
    if faults.should_fault() {
        return Err(AuthError::RandomFault);
    }
    if !is_valid_email(&credentials.email) {
        return Err(AuthError::InvalidEmail);
    }
    // Length in UTF-16 code units, as browsers measure form input.
    if credentials.password.encode_utf16().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::InvalidPassword);
    }
    if credentials.password != ACCEPTED_PASSWORD {
        return Err(AuthError::FailedAuthentication);
    }
    Ok(())
}
