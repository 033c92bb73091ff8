//! Mock sign-in and registration forms. Nothing is sent anywhere; a valid submit only
//! moves the user to the next screen.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Password,
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// A submitted form with trimmed text fields.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub name: Option<String>,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl FormError {
    pub fn field(&self) -> FormField {
        match self {
            FormError::Required("Name") => FormField::Name,
            FormError::Required("Password") => FormField::Password,
            FormError::Required(_) | FormError::InvalidEmail(_) => FormField::Email,
        }
    }
}

fn required(value: &str, label: &'static str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormError::Required(label));
    }
    Ok(trimmed.to_string())
}

fn email(value: &str) -> Result<String, FormError> {
    let email = required(value, "Email")?;
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.contains('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(FormError::InvalidEmail(email));
    }
    Ok(email)
}

impl LoginForm {
    pub fn validate(&self) -> Result<Credentials, FormError> {
        let email = email(&self.email)?;
        // Passwords are taken as typed; only emptiness is checked.
        if self.password.is_empty() {
            return Err(FormError::Required("Password"));
        }
        Ok(Credentials {
            name: None,
            email,
            password: self.password.clone(),
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl RegisterForm {
    pub fn validate(&self) -> Result<Credentials, FormError> {
        let name = required(&self.name, "Name")?;
        let email = email(&self.email)?;
        if self.password.is_empty() {
            return Err(FormError::Required("Password"));
        }
        Ok(Credentials {
            name: Some(name),
            email,
            password: self.password.clone(),
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
