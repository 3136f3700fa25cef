pub mod api_client;
pub mod gateway;
pub mod transport;

pub use api_client::ApiClient;
pub use gateway::{failure_message, login_error_message, AuthGateway};
pub use transport::{
    ApiRequest, ApiResponse, FormPart, GlooTransport, HttpTransport, Method, RequestBody,
};
