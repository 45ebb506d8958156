use crate::base::{APIResponse, BaseClient};
use attenda_api_structs::*;
use attenda_domain::{NotificationPreferences, ID};
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct UserClient {
    base: Arc<BaseClient>,
}

pub struct CreateUserInput {
    pub email: String,
    pub full_name: String,
    pub preferences: Option<NotificationPreferences>,
}

pub struct UpdateUserInput {
    pub user_id: ID,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub preferences: Option<NotificationPreferences>,
}

impl UserClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(&self, input: CreateUserInput) -> APIResponse<create_user::APIResponse> {
        let body = create_user::RequestBody {
            email: input.email,
            full_name: input.full_name,
            preferences: input.preferences,
        };
        self.base
            .post(body, "users".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get(&self, user_id: ID) -> APIResponse<get_user::APIResponse> {
        self.base
            .get(format!("users/{}", user_id), StatusCode::OK)
            .await
    }

    pub async fn update(&self, input: UpdateUserInput) -> APIResponse<update_user::APIResponse> {
        let body = update_user::RequestBody {
            email: input.email,
            full_name: input.full_name,
            preferences: input.preferences,
        };
        self.base
            .put(body, format!("users/{}", input.user_id), StatusCode::OK)
            .await
    }

    pub async fn delete(&self, user_id: ID) -> APIResponse<delete_user::APIResponse> {
        self.base
            .delete(format!("users/{}", user_id), StatusCode::OK)
            .await
    }
}
