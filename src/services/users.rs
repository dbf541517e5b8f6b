use super::{RequestHandler, Service, ServiceError};

use crate::models::users::{Credentials, NewUser, ProfileUpdate, UserProfile};
use crate::repositories::users::UserRepository;
use crate::settings;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;
use tokio::sync::oneshot;

pub enum UserRequest {
    Register {
        user: NewUser,
        response: oneshot::Sender<Result<UserProfile, ServiceError>>,
    },
    Login {
        credentials: Credentials,
        response: oneshot::Sender<Result<UserProfile, ServiceError>>,
    },
    GetProfile {
        email: String,
        response: oneshot::Sender<Result<Option<UserProfile>, ServiceError>>,
    },
    UpdateProfile {
        email: String,
        update: ProfileUpdate,
        response: oneshot::Sender<Result<UserProfile, ServiceError>>,
    },
}

#[derive(Clone)]
pub struct UserRequestHandler {
    repository: UserRepository,
    admin: settings::Admin,
}

fn digest(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

impl UserRequestHandler {
    pub fn new(sql_conn: SqlitePool, admin: settings::Admin) -> Self {
        UserRequestHandler {
            repository: UserRepository::new(sql_conn),
            admin,
        }
    }

    // The fixed support account never lives in the users table; its profile
    // is synthesized on demand.
    fn admin_profile(&self) -> UserProfile {
        UserProfile {
            email: self.admin.email.clone(),
            name: "Administrador".to_string(),
            phone: "Suporte Interno".to_string(),
            cep: "00000-000".to_string(),
            address: "HQ TechyPrint".to_string(),
            password_hash: String::new(),
        }
    }

    async fn register(&self, user: NewUser) -> Result<UserProfile, ServiceError> {
        let existing = self
            .repository
            .get_user_by_email(&user.email)
            .await
            .map_err(|e| ServiceError::Repository("Users".to_string(), e.to_string()))?;
        if existing.is_some() || user.email == self.admin.email {
            return Err(ServiceError::Conflict("e-mail already registered".to_string()));
        }

        let profile = UserProfile {
            email: user.email,
            name: user.name,
            phone: user.phone,
            cep: user.cep,
            address: user.address,
            password_hash: digest(&user.password),
        };
        self.repository
            .insert_user(&profile)
            .await
            .map_err(|e| ServiceError::Repository("Users".to_string(), e.to_string()))?;

        Ok(profile)
    }

    async fn login(&self, credentials: Credentials) -> Result<UserProfile, ServiceError> {
        if credentials.email == self.admin.email {
            if credentials.password != self.admin.password {
                return Err(ServiceError::Unauthorized("wrong password".to_string()));
            }
            return Ok(self.admin_profile());
        }

        let user = self
            .repository
            .get_user_by_email(&credentials.email)
            .await
            .map_err(|e| ServiceError::Repository("Users".to_string(), e.to_string()))?
            .ok_or_else(|| ServiceError::NotFound("user not found".to_string()))?;

        if user.password_hash != digest(&credentials.password) {
            return Err(ServiceError::Unauthorized("wrong password".to_string()));
        }

        Ok(user)
    }

    async fn get_profile(&self, email: &str) -> Result<Option<UserProfile>, ServiceError> {
        if email == self.admin.email {
            return Ok(Some(self.admin_profile()));
        }

        self.repository
            .get_user_by_email(email)
            .await
            .map_err(|e| ServiceError::Repository("Users".to_string(), e.to_string()))
    }

    async fn update_profile(
        &self,
        email: &str,
        update: ProfileUpdate,
    ) -> Result<UserProfile, ServiceError> {
        let current = self
            .repository
            .get_user_by_email(email)
            .await
            .map_err(|e| ServiceError::Repository("Users".to_string(), e.to_string()))?
            .ok_or_else(|| ServiceError::NotFound("user not found".to_string()))?;

        // An absent or empty password keeps the stored one
        let password_hash = match update.password.as_deref() {
            Some(password) if !password.is_empty() => digest(password),
            _ => current.password_hash,
        };

        let profile = UserProfile {
            email: email.to_string(),
            name: update.name,
            phone: update.phone,
            cep: update.cep,
            address: update.address,
            password_hash,
        };
        self.repository
            .update_user(&profile)
            .await
            .map_err(|e| ServiceError::Repository("Users".to_string(), e.to_string()))?;

        Ok(profile)
    }
}

#[async_trait]
impl RequestHandler<UserRequest> for UserRequestHandler {
    async fn handle_request(&self, request: UserRequest) {
        match request {
            UserRequest::Register { user, response } => {
                let profile = self.register(user).await;
                let _ = response.send(profile);
            }
            UserRequest::Login {
                credentials,
                response,
            } => {
                let profile = self.login(credentials).await;
                let _ = response.send(profile);
            }
            UserRequest::GetProfile { email, response } => {
                let profile = self.get_profile(&email).await;
                let _ = response.send(profile);
            }
            UserRequest::UpdateProfile {
                email,
                update,
                response,
            } => {
                let profile = self.update_profile(&email, update).await;
                let _ = response.send(profile);
            }
        }
    }
}

pub struct UserService;

impl UserService {
    pub fn new() -> Self {
        UserService {}
    }
}

impl Service<UserRequest, UserRequestHandler> for UserService {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::database;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn handler() -> UserRequestHandler {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        database::prepare(&pool).await.unwrap();

        UserRequestHandler::new(
            pool,
            settings::Admin {
                email: "suporte@techyprint.com.br".to_string(),
                password: "admin".to_string(),
            },
        )
    }

    fn new_user() -> NewUser {
        NewUser {
            email: "ana@exemplo.com".to_string(),
            password: "s3nha".to_string(),
            name: "Ana".to_string(),
            phone: "+55 11 99999-0000".to_string(),
            cep: "01310-100".to_string(),
            address: "Av. Paulista, 1000".to_string(),
        }
    }

    #[tokio::test]
    async fn register_then_login() {
        let handler = handler().await;

        handler.register(new_user()).await.unwrap();

        let profile = handler
            .login(Credentials {
                email: "ana@exemplo.com".to_string(),
                password: "s3nha".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(profile.name, "Ana");

        let wrong = handler
            .login(Credentials {
                email: "ana@exemplo.com".to_string(),
                password: "errada".to_string(),
            })
            .await;
        assert!(matches!(wrong, Err(ServiceError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let handler = handler().await;

        handler.register(new_user()).await.unwrap();
        let duplicate = handler.register(new_user()).await;
        assert!(matches!(duplicate, Err(ServiceError::Conflict(_))));
    }

    #[tokio::test]
    async fn passwords_are_stored_as_digests() {
        let handler = handler().await;

        let profile = handler.register(new_user()).await.unwrap();
        assert_ne!(profile.password_hash, "s3nha");
        assert_eq!(profile.password_hash.len(), 64);
    }

    #[tokio::test]
    async fn admin_logs_in_from_settings() {
        let handler = handler().await;

        let profile = handler
            .login(Credentials {
                email: "suporte@techyprint.com.br".to_string(),
                password: "admin".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(profile.name, "Administrador");

        let wrong = handler
            .login(Credentials {
                email: "suporte@techyprint.com.br".to_string(),
                password: "errada".to_string(),
            })
            .await;
        assert!(matches!(wrong, Err(ServiceError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn update_without_password_keeps_old_one() {
        let handler = handler().await;

        handler.register(new_user()).await.unwrap();

        let updated = handler
            .update_profile(
                "ana@exemplo.com",
                ProfileUpdate {
                    name: "Ana Souza".to_string(),
                    phone: "+55 11 98888-0000".to_string(),
                    cep: "01310-100".to_string(),
                    address: "Rua Augusta, 500".to_string(),
                    password: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Ana Souza");

        // Old credentials still valid
        handler
            .login(Credentials {
                email: "ana@exemplo.com".to_string(),
                password: "s3nha".to_string(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unknown_user_login_is_not_found() {
        let handler = handler().await;

        let missing = handler
            .login(Credentials {
                email: "ninguem@exemplo.com".to_string(),
                password: "x".to_string(),
            })
            .await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));
    }
}
