//! Signup input validation: email shape and the password strength rules
//! the account component enforces before any row is written.

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Passwords rejected outright regardless of length
const COMMON_PASSWORDS: &[&str] = &[
    "password", "password1", "password123", "123456", "1234567", "12345678", "123456789",
    "1234567890", "qwerty", "qwerty123", "abc123", "iloveyou", "admin", "welcome", "welcome1",
    "monkey", "dragon", "letmein", "football", "baseball", "sunshine", "princess", "superman",
    "batman", "trustno1", "master", "shadow", "michael", "jennifer", "computer", "starwars",
    "whatever", "passw0rd", "hello123", "charlie", "aa123456", "donald", "qwertyuiop", "zaq1zaq1",
];

/// Structural email check: one `@`, non-empty local part, and a dotted
/// domain. Deliverability is not our problem.
pub fn is_valid_email(email: &str) -> bool {
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = match parts.next() {
        Some(d) => d,
        None => return false,
    };

    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if email.contains(char::is_whitespace) {
        return false;
    }

    // Domain needs at least one dot with something on both sides
    domain.contains('.') && domain.split('.').all(|l| !l.is_empty())
}

/// Run the password strength rules, returning one human-readable message
/// per failure. `attributes` pairs a display name with the user-supplied
/// value it came from ("email address", "username", ...).
pub fn password_errors(password: &str, attributes: &[(&str, &str)]) -> Vec<String> {
    let mut errors = Vec::new();

    if password.len() < MIN_PASSWORD_LENGTH {
        errors.push("Password must be at least 8 characters long".to_string());
    }

    if !password.is_empty() && password.chars().all(|c| c.is_ascii_digit()) {
        errors.push("Password: This password is entirely numeric.".to_string());
    }

    let lowered = password.to_lowercase();
    if COMMON_PASSWORDS.contains(&lowered.as_str()) {
        errors.push("Password: This password is too common.".to_string());
    }

    for (name, value) in attributes {
        if too_similar(&lowered, value) {
            errors.push(format!(
                "Password: The password is too similar to the {}.",
                name
            ));
            break;
        }
    }

    errors
}

/// Containment check in either direction against the attribute (and the
/// local part when the attribute is an email address). Short attributes
/// are skipped; "jo" appearing in a password proves nothing.
fn too_similar(password_lower: &str, attribute: &str) -> bool {
    let attr = attribute.to_lowercase();
    let candidates = [attr.as_str(), attr.split('@').next().unwrap_or("")];

    candidates.iter().any(|c| {
        c.len() >= 4
            && (password_lower.contains(c)
                || (password_lower.len() >= 4 && c.contains(password_lower)))
    })
}
