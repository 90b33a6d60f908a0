use lazy_static::lazy_static;
use regex::Regex;

use crate::users::dto::UserRequest;

pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 15;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn check_password(password: &str) -> Result<(), String> {
    let len = password.chars().count();
    if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len) {
        return Err(format!(
            "Password must be between {} and {} characters",
            PASSWORD_MIN_LEN, PASSWORD_MAX_LEN
        ));
    }
    Ok(())
}

fn check_profile(req: &mut UserRequest) -> Result<(), String> {
    req.email = req.email.trim().to_string();
    if req.username.trim().is_empty() {
        return Err("Username must not be blank".into());
    }
    if !is_valid_email(&req.email) {
        return Err("Invalid email".into());
    }
    Ok(())
}

/// Trims the email and checks a create request. The password is mandatory.
pub fn validate_create(req: &mut UserRequest) -> Result<(), String> {
    check_profile(req)?;
    match req.password.as_deref() {
        Some(p) => check_password(p),
        None => Err("Password is required".into()),
    }
}

/// Like [`validate_create`], but an absent or empty password means "keep the current one".
pub fn validate_update(req: &mut UserRequest) -> Result<(), String> {
    check_profile(req)?;
    match req.password.as_deref() {
        Some(p) if !p.is_empty() => check_password(p),
        _ => Ok(()),
    }
}
