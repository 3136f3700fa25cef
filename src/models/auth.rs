use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Account as returned by the login endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub is_maker: bool,
    pub is_checker: bool,
}

impl User {
    /// Canonical role of the account. Checker wins when both flags are set.
    pub fn role(&self) -> Option<Role> {
        Role::from_flags(self.is_maker, self.is_checker)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Maker,
    Checker,
}

impl Role {
    /// Single tie-break used for every home-view choice.
    pub fn from_flags(is_maker: bool, is_checker: bool) -> Option<Role> {
        if is_checker {
            Some(Role::Checker)
        } else if is_maker {
            Some(Role::Maker)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Maker => "maker",
            Role::Checker => "checker",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// Keeps passwords out of debug logs.
impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub user: User,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct LogoutResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of both the checker signup and the maker creation endpoints.
pub type RegisterRequest = LoginRequest;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RegisteredAccount {
    pub id: Uuid,
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub user: RegisteredAccount,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RegisterMakerResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub maker: RegisteredAccount,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_ignores_token_payload() {
        let body = r#"{
            "message": "Login successful",
            "user": {
                "id": "0b8f1c2e-8a51-4c3e-9d3b-0c1f6a9e2d11",
                "email": "checker@example.com",
                "is_maker": false,
                "is_checker": true
            },
            "tokens": {"access": "a", "refresh": "r"}
        }"#;
        let response: LoginResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.user.email, "checker@example.com");
        assert_eq!(response.user.role(), Some(Role::Checker));
    }

    #[test]
    fn user_without_role_flags_is_rejected() {
        let body = r#"{"id":"0b8f1c2e-8a51-4c3e-9d3b-0c1f6a9e2d11","email":"x@example.com"}"#;
        assert!(serde_json::from_str::<User>(body).is_err());
    }

    #[test]
    fn role_tie_break_is_checker_first() {
        assert_eq!(Role::from_flags(true, true), Some(Role::Checker));
        assert_eq!(Role::from_flags(true, false), Some(Role::Maker));
        assert_eq!(Role::from_flags(false, false), None);
    }

    #[test]
    fn debug_output_hides_password() {
        let request = LoginRequest {
            email: "a@b.c".into(),
            password: "hunter22".into(),
        };
        let rendered = format!("{:?}", request);
        assert!(!rendered.contains("hunter22"));
    }
}
