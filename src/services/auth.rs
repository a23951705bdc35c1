use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use bcrypt::{hash, verify};
use std::sync::Arc;

use crate::config::Config;
use crate::database::models::{Admin, AuthResponse, CredentialsInput};
use crate::database::repositories::{AdminRepository, EventRepository};
use crate::error::AppError;
use crate::services::identity::IdentityVerifier;
use crate::services::validation::{validate_admin_id, validate_password};

const LOGIN_FAILED: &str = "로그인 실패: 아이디 또는 비밀번호를 다시 확인해주세요.";

/// 32 random bytes, URL-safe base64 without padding.
pub fn generate_session_token() -> String {
    URL_SAFE_NO_PAD.encode(rand::random::<[u8; 32]>())
}

#[derive(Clone)]
pub struct AuthService {
    admin_repository: AdminRepository,
    event_repository: EventRepository,
    verifier: Arc<dyn IdentityVerifier>,
    config: Config,
}

impl AuthService {
    pub fn new(
        admin_repository: AdminRepository,
        event_repository: EventRepository,
        verifier: Arc<dyn IdentityVerifier>,
        config: Config,
    ) -> Self {
        Self {
            admin_repository,
            event_repository,
            verifier,
            config,
        }
    }

    pub async fn register(&self, input: CredentialsInput) -> Result<AuthResponse, AppError> {
        validate_admin_id(&input.id)?;
        validate_password(&input.password)?;

        let password_hash = hash(&input.password, self.config.bcrypt_cost).map_err(|err| {
            log::error!("Failed to hash password: {}", err);
            AppError::internal_server_error()
        })?;

        let admin = Admin::new_local(input.id, password_hash);
        self.admin_repository.create_admin(&admin).await?;
        log::info!("Registered admin {}", admin.id);

        self.start_session(admin.id).await
    }

    pub async fn login(&self, input: CredentialsInput) -> Result<AuthResponse, AppError> {
        validate_admin_id(&input.id)?;
        validate_password(&input.password)?;

        let admin = self
            .admin_repository
            .find_by_id(&input.id)
            .await?
            .ok_or_else(|| AppError::Unauthorized(LOGIN_FAILED.to_string()))?;

        let password_hash = match admin.password_hash.as_deref() {
            Some(password_hash) if !admin.is_google() => password_hash,
            _ => {
                return Err(AppError::Unauthorized(
                    "로그인 실패: 이 계정은 구글 로그인을 통해 로그인해야 합니다.".to_string(),
                ));
            }
        };

        let matches = verify(&input.password, password_hash).map_err(|err| {
            log::error!("Failed to verify password of {}: {}", admin.id, err);
            AppError::internal_server_error()
        })?;

        if !matches {
            log::warn!("Wrong password for admin {}", admin.id);
            return Err(AppError::Unauthorized(LOGIN_FAILED.to_string()));
        }

        self.start_session(admin.id).await
    }

    /// Exchanges an identity token for a session. Unknown e-mails become
    /// google-provisioned admins.
    pub async fn google_login(&self, id_token: &str) -> Result<AuthResponse, AppError> {
        if !self.config.google_login_enabled() {
            return Err(AppError::internal_server_error_message(
                "구글 로그인이 설정되지 않았습니다.",
            ));
        }

        let identity = self.verifier.verify(id_token).await.map_err(|err| {
            log::error!("Google identity verification failed: {:#}", err);
            AppError::internal_server_error_message("구글 로그인에 실패했습니다.")
        })?;

        match self.admin_repository.find_by_id(&identity.email).await? {
            Some(admin) if !admin.is_google() => {
                return Err(AppError::Forbidden(
                    "이 계정은 일반 로그인을 통해 로그인해야 합니다.".to_string(),
                ));
            }
            Some(_) => {}
            None => {
                let admin = Admin::new_google(identity.email.clone());
                self.admin_repository.create_admin(&admin).await?;
                log::info!("Provisioned google admin {}", admin.id);
            }
        }

        self.start_session(identity.email).await
    }

    /// Revokes exactly one token of the admin.
    pub async fn logout(&self, admin_id: &str, token: &str) -> Result<(), AppError> {
        if !self.admin_repository.remove_token(admin_id, token).await? {
            log::warn!("Logout of {} with a token it does not hold", admin_id);
            return Err(AppError::Validation("로그아웃에 실패했습니다.".to_string()));
        }

        log::info!("Admin {} logged out", admin_id);
        Ok(())
    }

    pub async fn authenticate(&self, token: &str) -> Result<Admin, AppError> {
        self.admin_repository
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::Unauthorized("인증이 필요합니다. 다시 로그인해주세요.".to_string()))
    }

    async fn start_session(&self, admin_id: String) -> Result<AuthResponse, AppError> {
        let access_token = generate_session_token();
        self.admin_repository.add_token(&admin_id, &access_token).await?;
        let event_list = self.event_repository.list_events(&admin_id).await?;

        Ok(AuthResponse {
            event_list,
            id: admin_id,
            access_token,
        })
    }
}
