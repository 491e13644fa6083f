use semval::context::Context as ValidationContext;
use serde::{Deserialize, Serialize};

use crate::identities::domain::email::EmailInvalidity;

#[derive(Deserialize, Serialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

/// Returned whether or not an account exists for the address so the endpoint
/// can't be used to discover registered addresses.
#[derive(Serialize)]
pub struct PasswordResetAccepted {
    pub message: String,
}

impl Default for PasswordResetAccepted {
    fn default() -> Self {
        Self {
            message: "If an account exists for this address, a new password has been emailed to it."
                .to_owned(),
        }
    }
}

#[derive(Default, Serialize)]
pub struct PasswordResetRequestError {
    email: Vec<String>,
}

impl From<ValidationContext<EmailInvalidity>> for PasswordResetRequestError {
    fn from(validation: ValidationContext<EmailInvalidity>) -> Self {
        let mut response = PasswordResetRequestError::default();

        for invalidity in validation.into_iter() {
            let message = match invalidity {
                EmailInvalidity::ContainsWhitespace => "Email may not contain whitespace.",
                EmailInvalidity::MissingDomain => "Email is missing a domain.",
                EmailInvalidity::MissingLocalPart => "Email is missing a name before the '@'.",
                EmailInvalidity::MissingSeparator => "Email is missing an '@' symbol.",
            };

            response.email.push(message.to_owned());
        }

        response
    }
}
