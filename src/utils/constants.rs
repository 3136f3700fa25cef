/// Backend base URL used when `API_BASE_URL` is not set at build time.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

pub const LOGIN_ENDPOINT: &str = "/user/login/";
pub const LOGOUT_ENDPOINT: &str = "/user/logout/";
pub const REFRESH_ENDPOINT: &str = "/user/refresh-token/";
pub const REGISTER_ENDPOINT: &str = "/user/register/";
pub const REGISTER_MAKER_ENDPOINT: &str = "/user/register/maker/";
pub const FETCH_MAKERS_ENDPOINT: &str = "/user/fetch-makers/";
pub const EMPLOYEES_ENDPOINT: &str = "/user/employees/";
pub const EMPLOYEE_UPLOAD_ENDPOINT: &str = "/user/employees/upload/";

pub fn employee_status_endpoint(employee_id: &str) -> String {
    format!("/user/employees/{}/status/", employee_id)
}

/// `detail` value the backend sends when the access cookie has expired.
/// Only a 401 carrying exactly this detail is retried.
pub const TOKEN_EXPIRED_DETAIL: &str = "Token expired";

pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please check your credentials.";
pub const REGISTRATION_FAILED_MESSAGE: &str = "Registration failed";
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please log in again.";

/// Namespace of the persisted session snapshot.
pub const DEFAULT_STORAGE_KEY: &str = "checkmate:auth";

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_ATTACHMENT_BYTES: usize = 5 * 1024 * 1024;
