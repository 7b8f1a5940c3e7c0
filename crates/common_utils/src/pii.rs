//! Personal Identifiable Information protection.

use std::fmt;

use error_stack::report;
use masking::{ExposeInterface, Secret, Strategy};
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Strategy for masking an email: the local part is starred out, the domain
/// is kept for diagnostics.
#[derive(Debug)]
pub enum EmailStrategy {}

impl<T> Strategy<T> for EmailStrategy
where
    T: AsRef<str>,
{
    fn fmt(value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match value.as_ref().split_once('@') {
            Some((local, domain)) => write!(f, "{}@{}", "*".repeat(local.len()), domain),
            None => write!(f, "*** invalid email ***"),
        }
    }
}

/// A validated email address, masked in debug output.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Email(Secret<String, EmailStrategy>);

impl Email {
    /// Borrow the raw address.
    pub fn peek(&self) -> &str {
        masking::PeekInterface::peek(&self.0)
    }
}

impl ExposeInterface<Secret<String, EmailStrategy>> for Email {
    fn expose(self) -> Secret<String, EmailStrategy> {
        self.0
    }
}

impl TryFrom<String> for Email {
    type Error = error_stack::Report<ValidationError>;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        let structurally_valid = trimmed
            .split_once('@')
            .map(|(local, domain)| {
                !local.is_empty()
                    && domain.contains('.')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
                    && !trimmed.contains(char::is_whitespace)
            })
            .unwrap_or(false);
        if structurally_valid {
            Ok(Self(Secret::new(trimmed.to_owned())))
        } else {
            Err(report!(ValidationError::InvalidValue {
                message: "invalid email address format".to_string()
            }))
        }
    }
}

/// Strategy for masking a bank account number: everything except the last 4
/// digits is replaced by `****`.
#[derive(Debug)]
pub enum AccountNumber {}

impl<T> Strategy<T> for AccountNumber
where
    T: AsRef<str>,
{
    fn fmt(value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = value.as_ref();
        let char_count = value.chars().count();
        f.write_str("****")?;
        if char_count > 4 {
            for c in value.chars().skip(char_count - 4) {
                fmt::Write::write_char(f, c)?;
            }
        }
        Ok(())
    }
}

/// Strategy for masking an IP address: only the first octet is kept.
#[derive(Debug)]
pub enum IpAddress {}

impl<T> Strategy<T> for IpAddress
where
    T: AsRef<str>,
{
    fn fmt(value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match value.as_ref().split_once('.') {
            Some((first_octet, _)) => write!(f, "{first_octet}.**.**.**"),
            None => write!(f, "*** invalid ip ***"),
        }
    }
}
