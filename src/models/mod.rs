pub mod auth;
pub mod employee;

pub use auth::{
    LoginRequest, LoginResponse, LogoutResponse, RegisterMakerResponse, RegisterRequest,
    RegisterResponse, RegisteredAccount, Role, User,
};
pub use employee::{Attachment, Employee, EmployeeStatus, EmployeeUpload, Maker, StatusUpdateRequest};
