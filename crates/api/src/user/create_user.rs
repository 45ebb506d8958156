use crate::error::AttendaError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use attenda_api_structs::create_user::*;
use attenda_domain::{NotificationPreferences, User};
use attenda_infra::AttendaContext;

pub async fn create_user_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<AttendaContext>,
) -> Result<HttpResponse, AttendaError> {
    let body = body.0;
    let usecase = CreateUserUseCase {
        email: body.email,
        full_name: body.full_name,
        preferences: body.preferences,
    };

    execute(usecase, &ctx)
        .await
        .map(|user| HttpResponse::Created().json(APIResponse::new(user)))
        .map_err(AttendaError::from)
}

#[derive(Debug)]
pub struct CreateUserUseCase {
    pub email: String,
    pub full_name: String,
    pub preferences: Option<NotificationPreferences>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidEmail(String),
    UserAlreadyExists(String),
    StorageError,
}

impl From<UseCaseError> for AttendaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidEmail(email) => {
                Self::BadClientData(format!("Invalid email address: {}", email))
            }
            UseCaseError::UserAlreadyExists(email) => Self::Conflict(format!(
                "A user with the email: {}, already exists.",
                email
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateUserUseCase {
    type Response = User;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateUser";

    async fn execute(&mut self, ctx: &AttendaContext) -> Result<Self::Response, Self::Error> {
        let email = self.email.trim().to_string();
        if email.is_empty() || !email.contains('@') {
            return Err(UseCaseError::InvalidEmail(email));
        }
        if ctx.repos.users.find_by_email(&email).await.is_some() {
            return Err(UseCaseError::UserAlreadyExists(email));
        }

        let now = ctx.sys.get_timestamp_millis();
        let mut user = User::new(&email, self.full_name.trim(), now);
        if let Some(preferences) = self.preferences.clone() {
            user.preferences = preferences;
        }

        ctx.repos
            .users
            .insert(&user)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(user)
    }
}
