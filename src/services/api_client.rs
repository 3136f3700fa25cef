// ============================================================================
// API CLIENT - typed wrappers over the backend endpoints
// ============================================================================
// No business logic here; every call goes through the AuthGateway so expired
// credentials are refreshed transparently.
// ============================================================================

use std::rc::Rc;

use crate::error::ApiError;
use crate::models::{
    Employee, EmployeeStatus, EmployeeUpload, Maker, RegisterMakerResponse, RegisterRequest,
    RegisterResponse, StatusUpdateRequest,
};
use crate::services::gateway::AuthGateway;
use crate::services::transport::{ApiRequest, FormPart, HttpTransport};
use crate::utils::constants::{
    employee_status_endpoint, EMPLOYEES_ENDPOINT, EMPLOYEE_UPLOAD_ENDPOINT,
    FETCH_MAKERS_ENDPOINT, REGISTER_ENDPOINT, REGISTER_MAKER_ENDPOINT,
};

pub struct ApiClient<T: HttpTransport> {
    gateway: Rc<AuthGateway<T>>,
}

impl<T: HttpTransport> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            gateway: Rc::clone(&self.gateway),
        }
    }
}

impl<T: HttpTransport + 'static> ApiClient<T> {
    pub fn new(gateway: Rc<AuthGateway<T>>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &Rc<AuthGateway<T>> {
        &self.gateway
    }

    /// Signs up a checker account.
    pub async fn register(&self, account: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
        log::info!("📝 Registering checker {}", account.email);
        let request = ApiRequest::post(REGISTER_ENDPOINT).json(account)?;
        self.gateway.execute_json(request).await
    }

    /// Creates a maker owned by the logged-in checker.
    pub async fn register_maker(
        &self,
        account: &RegisterRequest,
    ) -> Result<RegisterMakerResponse, ApiError> {
        log::info!("📝 Creating maker {}", account.email);
        let request = ApiRequest::post(REGISTER_MAKER_ENDPOINT).json(account)?;
        self.gateway.execute_json(request).await
    }

    pub async fn fetch_makers(&self) -> Result<Vec<Maker>, ApiError> {
        let makers: Vec<Maker> = self
            .gateway
            .execute_json(ApiRequest::get(FETCH_MAKERS_ENDPOINT))
            .await?;
        log::info!("👥 {} makers loaded", makers.len());
        Ok(makers)
    }

    /// Employees visible to the current user: a maker's own uploads, or
    /// everything uploaded by a checker's makers.
    pub async fn list_employees(&self) -> Result<Vec<Employee>, ApiError> {
        let employees: Vec<Employee> = self
            .gateway
            .execute_json(ApiRequest::get(EMPLOYEES_ENDPOINT))
            .await?;
        log::info!("📋 {} employees loaded", employees.len());
        Ok(employees)
    }

    pub async fn upload_employee(&self, upload: &EmployeeUpload) -> Result<Employee, ApiError> {
        log::info!(
            "📤 Uploading {} {} ({} + {} bytes)",
            upload.first_name,
            upload.last_name,
            upload.photo.size(),
            upload.resume.size()
        );
        let request = ApiRequest::post(EMPLOYEE_UPLOAD_ENDPOINT).multipart(upload_parts(upload));
        self.gateway.execute_json(request).await
    }

    pub async fn update_employee_status(
        &self,
        employee_id: &str,
        status: EmployeeStatus,
    ) -> Result<Employee, ApiError> {
        log::info!("✏️ Employee {} -> {}", employee_id, status);
        let request = ApiRequest::patch(employee_status_endpoint(employee_id))
            .json(&StatusUpdateRequest { status })?;
        self.gateway.execute_json(request).await
    }
}

fn upload_parts(upload: &EmployeeUpload) -> Vec<FormPart> {
    vec![
        FormPart::Text {
            name: "first_name".into(),
            value: upload.first_name.clone(),
        },
        FormPart::Text {
            name: "last_name".into(),
            value: upload.last_name.clone(),
        },
        FormPart::File {
            name: "photo".into(),
            file: upload.photo.clone(),
        },
        FormPart::File {
            name: "resume".into(),
            file: upload.resume.clone(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Attachment;
    use crate::services::gateway::tests::{gateway, ScriptedTransport, EXPIRED};
    use crate::services::transport::{Method, RequestBody};
    use crate::state::session_state::tests::logged_in;
    use crate::utils::constants::REFRESH_ENDPOINT;
    use futures::executor::block_on;

    fn client(
        is_maker: bool,
        is_checker: bool,
    ) -> (ApiClient<ScriptedTransport>, Rc<ScriptedTransport>) {
        let (gateway, transport, _) = gateway(logged_in(is_maker, is_checker));
        (ApiClient::new(Rc::new(gateway)), transport)
    }

    const EMPLOYEE: &str = r#"{
        "id": "6f1c",
        "first_name": "Ada",
        "last_name": "Lovelace",
        "status": "pending",
        "uploaded_by": "maker@example.com",
        "checked_by": null,
        "created_at": "2024-05-01T10:00:00Z",
        "updated_at": "2024-05-01T10:00:00Z",
        "photo_url": "https://cdn.test/p.png",
        "resume_url": "https://cdn.test/r.pdf"
    }"#;

    fn attachment(name: &str, content_type: &str) -> Attachment {
        Attachment {
            file_name: name.into(),
            content_type: content_type.into(),
            bytes: vec![1, 2, 3],
        }
    }

    #[test]
    fn lists_employees() {
        let (client, transport) = client(true, false);
        transport.reply(EMPLOYEES_ENDPOINT, 200, &format!("[{}]", EMPLOYEE));

        let employees = block_on(client.list_employees()).unwrap();

        assert_eq!(employees.len(), 1);
        assert_eq!(employees[0].full_name(), "Ada Lovelace");
        assert_eq!(employees[0].status, EmployeeStatus::Pending);
    }

    #[test]
    fn fetch_makers_refreshes_an_expired_token() {
        let (client, transport) = client(false, true);
        transport
            .reply(FETCH_MAKERS_ENDPOINT, 401, EXPIRED)
            .reply(REFRESH_ENDPOINT, 200, "{}")
            .reply(
                FETCH_MAKERS_ENDPOINT,
                200,
                r#"[{"id":"8d9e2b1c-58c4-4f0a-9d59-8a0b5f4a1e11","email":"m@x.io","is_active":true}]"#,
            );

        let makers = block_on(client.fetch_makers()).unwrap();

        assert_eq!(makers.len(), 1);
        assert_eq!(makers[0].email, "m@x.io");
        assert_eq!(transport.calls_to(REFRESH_ENDPOINT), 1);
    }

    #[test]
    fn upload_sends_four_multipart_fields() {
        let (client, transport) = client(true, false);
        transport.reply(EMPLOYEE_UPLOAD_ENDPOINT, 201, EMPLOYEE);
        let upload = EmployeeUpload {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            photo: attachment("ada.png", "image/png"),
            resume: attachment("ada.pdf", "application/pdf"),
        };

        let employee = block_on(client.upload_employee(&upload)).unwrap();

        assert_eq!(employee.id, "6f1c");
        let sent = transport.sent.borrow();
        assert_eq!(sent[0].method, Method::Post);
        let RequestBody::Multipart(parts) = &sent[0].body else {
            panic!("expected multipart body, got {:?}", sent[0].body);
        };
        let names: Vec<&str> = parts
            .iter()
            .map(|part| match part {
                FormPart::Text { name, .. } | FormPart::File { name, .. } => name.as_str(),
            })
            .collect();
        assert_eq!(names, ["first_name", "last_name", "photo", "resume"]);
    }

    #[test]
    fn status_update_patches_the_employee() {
        let (client, transport) = client(false, true);
        let approved = EMPLOYEE.replace("\"pending\"", "\"approved\"");
        transport.reply("/user/employees/6f1c/status/", 200, &approved);

        let employee = block_on(client.update_employee_status("6f1c", EmployeeStatus::Approved))
            .unwrap();

        assert_eq!(employee.status, EmployeeStatus::Approved);
        let sent = transport.sent.borrow();
        assert_eq!(sent[0].method, Method::Patch);
        assert_eq!(
            sent[0].body,
            RequestBody::Json(serde_json::json!({"status": "approved"}))
        );
    }

    #[test]
    fn register_maker_surfaces_validation_errors() {
        let (client, transport) = client(false, true);
        transport.reply(
            REGISTER_MAKER_ENDPOINT,
            400,
            r#"{"email":["A user with this email already exists."]}"#,
        );
        let account = RegisterRequest {
            email: "dup@example.com".into(),
            password: "longenough".into(),
        };

        let err = block_on(client.register_maker(&account)).unwrap_err();

        assert_eq!(err.status(), Some(400));
        assert_eq!(err.user_message("Registration failed"), "Registration failed");
    }

    #[test]
    fn register_decodes_the_new_account() {
        let (client, transport) = client(false, false);
        transport.reply(
            REGISTER_ENDPOINT,
            201,
            r#"{"message":"User registered successfully","user":{"id":"8d9e2b1c-58c4-4f0a-9d59-8a0b5f4a1e11","email":"c@x.io"}}"#,
        );
        let account = RegisterRequest {
            email: "c@x.io".into(),
            password: "longenough".into(),
        };
        let response = block_on(client.register(&account)).unwrap();
        assert_eq!(response.user.email, "c@x.io");
    }
}
