use semval::prelude::*;

/// An email address submitted for a password reset.
///
/// Validation only rejects values that can never be delivered to. The address
/// is otherwise kept exactly as provided, since accounts are looked up by exact
/// match.
#[derive(Debug, Eq, PartialEq)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn parts(&self) -> Option<(&str, &str)> {
        // Local parts may contain quoted "@" symbols, so the last one delimits
        // the domain.
        self.0.rsplit_once('@')
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EmailInvalidity {
    /// The address contains whitespace.
    ContainsWhitespace,

    /// The address does not have a domain portion.
    MissingDomain,

    /// The address does not have anything before the `@` symbol.
    MissingLocalPart,

    /// The address is missing the `@` symbol separating the local and domain
    /// parts.
    MissingSeparator,
}

impl Validate for EmailAddress {
    type Invalidity = EmailInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        let (missing_separator, missing_local_part, missing_domain) = match self.parts() {
            Some((local_part, domain)) => (false, local_part.is_empty(), domain.is_empty()),
            None => (true, false, false),
        };

        ValidationContext::new()
            .invalidate_if(
                self.0.chars().any(char::is_whitespace),
                EmailInvalidity::ContainsWhitespace,
            )
            .invalidate_if(missing_local_part, EmailInvalidity::MissingLocalPart)
            .invalidate_if(missing_domain, EmailInvalidity::MissingDomain)
            .invalidate_if(missing_separator, EmailInvalidity::MissingSeparator)
            .into()
    }
}

impl ValidatedFrom<&str> for EmailAddress {
    fn validated_from(from: &str) -> ValidatedResult<Self> {
        let into = Self(from.to_owned());

        match into.validate() {
            Ok(()) => Ok(into),
            Err(context) => Err((into, context)),
        }
    }
}
