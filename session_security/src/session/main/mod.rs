mod guard;
#[cfg(test)]
mod guard_security_tests;

pub use guard::{create_session, dispose_session, validate_session};
