use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Credentials {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_lowercase(),
            password: password.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_normalize_email() {
        let credentials = Credentials::new("  Admin@Restsys.com ", "secreto");
        assert_eq!(credentials.email, "admin@restsys.com");
        assert!(credentials.validate().is_ok());
    }

    #[test]
    fn test_credentials_validation() {
        assert!(Credentials::new("not-an-email", "secreto").validate().is_err());
        assert!(Credentials::new("mesero@restsys.com", "").validate().is_err());
    }
}
