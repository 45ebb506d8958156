use crate::error::AttendaError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use attenda_api_structs::update_user::*;
use attenda_domain::{NotificationPreferences, User, ID};
use attenda_infra::AttendaContext;

pub async fn update_user_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<AttendaContext>,
) -> Result<HttpResponse, AttendaError> {
    let body = body.0;
    let usecase = UpdateUserUseCase {
        user_id: path_params.user_id.clone(),
        email: body.email,
        full_name: body.full_name,
        preferences: body.preferences,
    };

    execute(usecase, &ctx)
        .await
        .map(|user| HttpResponse::Ok().json(APIResponse::new(user)))
        .map_err(AttendaError::from)
}

#[derive(Debug)]
pub struct UpdateUserUseCase {
    pub user_id: ID,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub preferences: Option<NotificationPreferences>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidEmail(String),
    EmailTaken(String),
    StorageError,
}

impl From<UseCaseError> for AttendaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(user_id) => {
                Self::NotFound(format!("The user with id: {}, was not found.", user_id))
            }
            UseCaseError::InvalidEmail(email) => {
                Self::BadClientData(format!("Invalid email address: {}", email))
            }
            UseCaseError::EmailTaken(email) => Self::Conflict(format!(
                "A user with the email: {}, already exists.",
                email
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateUserUseCase {
    type Response = User;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateUser";

    async fn execute(&mut self, ctx: &AttendaContext) -> Result<Self::Response, Self::Error> {
        let mut user = ctx
            .repos
            .users
            .find(&self.user_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.user_id.clone()))?;

        if let Some(email) = self.email.take() {
            let email = email.trim().to_string();
            if email.is_empty() || !email.contains('@') {
                return Err(UseCaseError::InvalidEmail(email));
            }
            if !user.email.eq_ignore_ascii_case(&email) {
                if ctx.repos.users.find_by_email(&email).await.is_some() {
                    return Err(UseCaseError::EmailTaken(email));
                }
                user.email = email;
            }
        }
        if let Some(full_name) = self.full_name.take() {
            user.full_name = full_name.trim().to_string();
        }
        if let Some(preferences) = self.preferences.take() {
            user.preferences = preferences;
        }
        user.updated = ctx.sys.get_timestamp_millis();

        ctx.repos
            .users
            .save(&user)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(user)
    }
}
