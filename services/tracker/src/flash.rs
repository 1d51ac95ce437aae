//! Flash messages carried across redirects
//!
//! A flash is a short message code stored in a removed-on-read cookie.
//! Only codes travel in the cookie; the human-readable text is rendered
//! server-side, so cookie values never contain free text.

use axum_extra::extract::cookie::{Cookie, CookieJar};

/// Name of the flash cookie
pub const FLASH_COOKIE: &str = "flash";

/// Message codes surfaced to the user after a redirect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    RegistrationSuccessful,
    InvalidCredentials,
    UsernameTaken,
    UnauthorizedAccess,
    InvalidUsername,
    InvalidPassword,
    InvalidPrice,
    InvalidExpiryDate,
}

impl Flash {
    /// Stable code stored in the cookie value
    pub fn code(self) -> &'static str {
        match self {
            Flash::RegistrationSuccessful => "registration-successful",
            Flash::InvalidCredentials => "invalid-credentials",
            Flash::UsernameTaken => "username-taken",
            Flash::UnauthorizedAccess => "unauthorized-access",
            Flash::InvalidUsername => "invalid-username",
            Flash::InvalidPassword => "invalid-password",
            Flash::InvalidPrice => "invalid-price",
            Flash::InvalidExpiryDate => "invalid-expiry-date",
        }
    }

    /// Parse a cookie value back into a flash code
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "registration-successful" => Some(Flash::RegistrationSuccessful),
            "invalid-credentials" => Some(Flash::InvalidCredentials),
            "username-taken" => Some(Flash::UsernameTaken),
            "unauthorized-access" => Some(Flash::UnauthorizedAccess),
            "invalid-username" => Some(Flash::InvalidUsername),
            "invalid-password" => Some(Flash::InvalidPassword),
            "invalid-price" => Some(Flash::InvalidPrice),
            "invalid-expiry-date" => Some(Flash::InvalidExpiryDate),
            _ => None,
        }
    }

    /// Text shown to the user
    pub fn message(self) -> &'static str {
        match self {
            Flash::RegistrationSuccessful => "Registration successful. Please login.",
            Flash::InvalidCredentials => "Invalid credentials",
            Flash::UsernameTaken => "Username already taken",
            Flash::UnauthorizedAccess => "Unauthorized access",
            Flash::InvalidUsername => {
                "Username must be 1-32 characters of letters, numbers, and underscores"
            }
            Flash::InvalidPassword => "Password must not be empty",
            Flash::InvalidPrice => "Price must be a number",
            Flash::InvalidExpiryDate => "Expiry date must be in YYYY-MM-DD format",
        }
    }
}

/// Attach a flash message to the response jar
pub fn set_flash(jar: CookieJar, flash: Flash) -> CookieJar {
    jar.add(
        Cookie::build((FLASH_COOKIE, flash.code()))
            .path("/")
            .http_only(true)
            .build(),
    )
}

/// Read and clear the pending flash message, if any
pub fn take_flash(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let flash = jar
        .get(FLASH_COOKIE)
        .and_then(|cookie| Flash::from_code(cookie.value()));
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/").build());
    (jar, flash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_code_round_trip() {
        let all = [
            Flash::RegistrationSuccessful,
            Flash::InvalidCredentials,
            Flash::UsernameTaken,
            Flash::UnauthorizedAccess,
            Flash::InvalidUsername,
            Flash::InvalidPassword,
            Flash::InvalidPrice,
            Flash::InvalidExpiryDate,
        ];
        for flash in all {
            assert_eq!(Flash::from_code(flash.code()), Some(flash));
        }
    }

    #[test]
    fn test_unknown_code_is_ignored() {
        assert_eq!(Flash::from_code("definitely-not-a-code"), None);
    }

    #[test]
    fn test_take_flash_reads_and_clears() {
        let jar = set_flash(CookieJar::new(), Flash::InvalidCredentials);
        let (jar, flash) = take_flash(jar);
        assert_eq!(flash, Some(Flash::InvalidCredentials));

        // The returned jar carries the removal; a second read finds nothing
        let (_, flash) = take_flash(jar);
        assert_eq!(flash, None);
    }

    #[test]
    fn test_take_flash_without_cookie() {
        let (_, flash) = take_flash(CookieJar::new());
        assert_eq!(flash, None);
    }
}
