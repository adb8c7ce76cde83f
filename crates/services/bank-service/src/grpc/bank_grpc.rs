//! gRPC implementation for BasicBank.
//!
//! The server declares the full service interface. Methods without a
//! handler fall through to [`unimplemented`], which reports
//! `UNIMPLEMENTED` to the caller.

use tonic::{Request, Response, Status};

use proto::pb::{
    basic_bank_server::BasicBank, CreateUserRequest, CreateUserResponse, LoginUserRequest,
    LoginUserResponse, UpdateUserRequest, UpdateUserResponse, VerifyEmailRequest,
    VerifyEmailResponse,
};

use super::Server;

/// Default response for methods the server does not handle.
fn unimplemented<T>(method: &str) -> Result<Response<T>, Status> {
    Err(Status::unimplemented(format!(
        "method {} not implemented",
        method
    )))
}

#[tonic::async_trait]
impl BasicBank for Server {
    async fn create_user(
        &self,
        _request: Request<CreateUserRequest>,
    ) -> Result<Response<CreateUserResponse>, Status> {
        unimplemented("CreateUser")
    }

    async fn update_user(
        &self,
        _request: Request<UpdateUserRequest>,
    ) -> Result<Response<UpdateUserResponse>, Status> {
        unimplemented("UpdateUser")
    }

    async fn login_user(
        &self,
        _request: Request<LoginUserRequest>,
    ) -> Result<Response<LoginUserResponse>, Status> {
        unimplemented("LoginUser")
    }

    async fn verify_email(
        &self,
        _request: Request<VerifyEmailRequest>,
    ) -> Result<Response<VerifyEmailResponse>, Status> {
        unimplemented("VerifyEmail")
    }
}
