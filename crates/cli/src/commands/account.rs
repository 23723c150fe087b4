//! Account commands.
//!
//! # Usage
//!
//! ```bash
//! gameverse login --email gamer@verse.io --password hunter22
//! gameverse signup
//! ```

use std::io::Write;

use gameverse_core::{Command, KeyValueStore, Storefront};
use secrecy::SecretString;

use super::{CommandError, dispatch};

/// Sign in and print the greeting.
///
/// # Errors
///
/// Returns an error if either field is empty.
pub fn login<S: KeyValueStore>(
    storefront: &mut Storefront<S>,
    out: &mut impl Write,
    email: String,
    password: String,
) -> Result<(), CommandError> {
    let password = SecretString::from(password);
    dispatch(storefront, out, Command::Login { email, password })?;
    Ok(())
}

/// # Errors
///
/// Returns an error if output cannot be written.
pub fn signup<S: KeyValueStore>(
    storefront: &mut Storefront<S>,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    dispatch(storefront, out, Command::SignUp)?;
    Ok(())
}
