// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `hash-password` command.

use std::io::BufRead;

use campus_core::{Credentials, HashConfig, PasswordHash};

use crate::cli::{Cli, HashPasswordArgs};
use crate::error::{BinError, BinResult};

/// Prints an argon2 PHC string for the given password.
///
/// The output can be pasted into `bootstrap.admin.password_hash`. Hashes use
/// the default cost parameters; they are recorded in the PHC string itself.
pub fn hash_password(_cli: &Cli, args: HashPasswordArgs) -> BinResult<()> {
    let password = match args.password {
        Some(password) => password,
        None => read_password(std::io::stdin().lock())?,
    };

    let hash = hash_with_defaults(&password)?;
    println!("{}", hash.as_phc());
    Ok(())
}

/// Reads the first line of `reader`, without its line terminator.
fn read_password(mut reader: impl BufRead) -> BinResult<String> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        return Err(BinError::config("No password given on standard input"));
    }
    Ok(password)
}

fn hash_with_defaults(password: &str) -> BinResult<PasswordHash> {
    let credentials = Credentials::new(HashConfig::default())?;
    Ok(credentials.hash(password)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_password_strips_newline() {
        let input = b"correct horse\r\nignored\n";
        assert_eq!(read_password(&input[..]).unwrap(), "correct horse");
    }

    #[test]
    fn test_read_password_rejects_empty_input() {
        assert!(read_password(&b"\n"[..]).is_err());
        assert!(read_password(&b""[..]).is_err());
    }

    #[test]
    fn test_hash_verifies_and_parses() {
        let hash = hash_with_defaults("password123").unwrap();
        let reparsed = PasswordHash::parse(hash.as_phc()).unwrap();

        let credentials = Credentials::new(HashConfig::for_testing()).unwrap();
        assert!(credentials.verify(&reparsed, "password123"));
        assert!(!credentials.verify(&reparsed, "password124"));
    }

    #[test]
    fn test_empty_password_is_rejected() {
        assert!(hash_with_defaults("").is_err());
    }
}
