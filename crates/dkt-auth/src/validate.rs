//! Input checks for account forms.
use super::*;

pub const NAME_MIN: usize = 2;
pub const PASSWORD_MIN: usize = 6;

/// Deliberately loose: one `@`, something on both sides, a dot in the
/// domain, no whitespace.
pub fn email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}

fn fields(name: &str, address: &str, password: Option<&str>) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if name.trim().chars().count() < NAME_MIN {
        errors.push(FieldError::new("name", "Name must be at least 2 characters"));
    }
    if !email(address) {
        errors.push(FieldError::new("email", "Invalid email address"));
    }
    if let Some(password) = password {
        if password.chars().count() < PASSWORD_MIN {
            errors.push(FieldError::new("password", "Password must be at least 6 characters"));
        }
    }
    errors
}

fn finish(errors: Vec<FieldError>) -> Result<(), ApiError> {
    match errors.is_empty() {
        true => Ok(()),
        false => Err(ApiError::Validation(errors)),
    }
}

pub fn signup(req: &SignupRequest) -> Result<(), ApiError> {
    if req.name.is_empty() || req.email.is_empty() || req.password.is_empty() {
        return Err(ApiError::BadRequest("Missing required fields"));
    }
    finish(fields(&req.name, &req.email, Some(&req.password)))
}

pub fn signin(req: &SigninRequest) -> Result<(), ApiError> {
    match req.email.is_empty() || req.password.is_empty() {
        true => Err(ApiError::BadRequest("Missing email or password")),
        false => Ok(()),
    }
}

pub fn profile(req: &ProfileRequest) -> Result<(), ApiError> {
    if req.name.is_empty() || req.email.is_empty() {
        return Err(ApiError::BadRequest("Name and email are required"));
    }
    finish(fields(&req.name, &req.email, None))
}

pub fn account(req: &CreateAccountRequest) -> Result<(), ApiError> {
    if req.name.is_empty() || req.email.is_empty() || req.password.is_empty() {
        return Err(ApiError::BadRequest("Missing required fields"));
    }
    finish(fields(&req.name, &req.email, Some(&req.password)))
}

/// Optional field with content. Blank counts as absent.
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// Checks whichever fields are present and parses the requested role.
pub fn update(req: &AccountUpdateRequest) -> Result<Option<Role>, ApiError> {
    let mut errors = Vec::new();
    if present(&req.name).is_some_and(|name| name.trim().chars().count() < NAME_MIN) {
        errors.push(FieldError::new("name", "Name must be at least 2 characters"));
    }
    if present(&req.email).is_some_and(|address| !email(address)) {
        errors.push(FieldError::new("email", "Invalid email address"));
    }
    if present(&req.password).is_some_and(|password| password.chars().count() < PASSWORD_MIN) {
        errors.push(FieldError::new("password", "Password must be at least 6 characters"));
    }
    let role = present(&req.role).and_then(|role| {
        Role::try_from(role)
            .inspect_err(|_| errors.push(FieldError::new("role", "Invalid role")))
            .ok()
    });
    finish(errors).map(|()| role)
}
