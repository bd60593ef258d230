use crate::auth::{hash_password, issue_token, verify_password};
use crate::config::JwtConfig;
use crate::db::DbPool;
use crate::entities::{role, user};
use crate::error::{AppError, AppResult};
use crate::models::{AuthResponse, LoginRequest, SignupRequest, UpdateUserRequest, UserResponse};
use crate::repository::{
    FriendRequestRepository, ImageRepository, MessageRepository, PostRepository, UserRepository,
};
use sea_orm::TransactionTrait;

/// Maps a requested role keyword to a stored role name.
pub fn role_name_for(requested: &str) -> &'static str {
    match requested {
        "admin" => role::ROLE_ADMIN,
        "mod" => role::ROLE_MODERATOR,
        _ => role::ROLE_USER,
    }
}

fn resolve_roles(requested: Option<&[String]>) -> Vec<&'static str> {
    let mut names: Vec<&'static str> = match requested {
        Some(list) if !list.is_empty() => list.iter().map(|r| role_name_for(r)).collect(),
        _ => vec![role::ROLE_USER],
    };
    names.sort_unstable();
    names.dedup();
    names
}

const IDENTITY_TAKEN: &str = "Username or Email is already taken";
const BAD_CREDENTIALS: &str = "Invalid credentials";

pub struct UserService;

impl UserService {
    pub async fn signup(
        db: &DbPool,
        jwt: &JwtConfig,
        req: &SignupRequest,
    ) -> AppResult<AuthResponse> {
        req.validate()?;
        let password_hash = hash_password(&req.password)?;
        let role_names = resolve_roles(req.roles.as_deref());

        let txn = db.begin().await?;
        if UserRepository::identity_taken(&txn, &req.username, &req.email, None).await? {
            return Err(AppError::conflict(IDENTITY_TAKEN));
        }
        let user = UserRepository::insert(&txn, &req.username, &req.email, password_hash)
            .await
            .map_err(|err| AppError::on_unique_violation(err, IDENTITY_TAKEN))?;
        UserRepository::link_roles(&txn, user.id, &role_names).await?;
        txn.commit().await?;

        log::info!("User {} registered as {}", user.id, user.username);
        authenticated(db, jwt, user).await
    }

    /// Unknown usernames and wrong passwords fail the same way.
    pub async fn login(
        db: &DbPool,
        jwt: &JwtConfig,
        req: &LoginRequest,
    ) -> AppResult<AuthResponse> {
        let user = UserRepository::find_by_username(db, &req.username)
            .await?
            .ok_or(AppError::Unauthorized(BAD_CREDENTIALS))?;
        if !verify_password(&req.password, &user.password_hash) {
            return Err(AppError::Unauthorized(BAD_CREDENTIALS));
        }
        authenticated(db, jwt, user).await
    }

    pub async fn find_all(db: &DbPool) -> AppResult<Vec<user::Model>> {
        Ok(UserRepository::find_all(db).await?)
    }

    pub async fn find_by_id(db: &DbPool, user_id: i32) -> AppResult<user::Model> {
        UserRepository::find_by_id(db, user_id)
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn update(
        db: &DbPool,
        user_id: i32,
        req: &UpdateUserRequest,
    ) -> AppResult<user::Model> {
        req.validate()?;
        let password_hash = match &req.password {
            Some(password) => Some(hash_password(password)?),
            None => None,
        };

        let txn = db.begin().await?;
        let existing = UserRepository::find_by_id(&txn, user_id)
            .await?
            .ok_or(AppError::NotFound)?;
        if UserRepository::identity_taken(&txn, &req.username, &req.email, Some(user_id)).await? {
            return Err(AppError::conflict(IDENTITY_TAKEN));
        }
        let updated =
            UserRepository::update(&txn, existing, &req.username, &req.email, password_hash)
                .await
                .map_err(|err| AppError::on_unique_violation(err, IDENTITY_TAKEN))?;
        txn.commit().await?;

        log::info!("User {} updated", user_id);
        Ok(updated)
    }

    /// Deletes the user together with everything that references them.
    ///
    /// Either every dependent row and the user go, or nothing does.
    pub async fn delete(db: &DbPool, user_id: i32) -> AppResult<()> {
        let txn = db.begin().await?;
        if UserRepository::find_by_id(&txn, user_id).await?.is_none() {
            return Err(AppError::NotFound);
        }

        let images = ImageRepository::delete_by_author(&txn, user_id).await?;
        let posts = PostRepository::delete_by_user(&txn, user_id).await?;
        let requests = FriendRequestRepository::delete_involving(&txn, user_id).await?;
        let messages = MessageRepository::delete_involving(&txn, user_id).await?;
        UserRepository::unlink_roles(&txn, user_id).await?;
        if UserRepository::delete(&txn, user_id).await? != 1 {
            return Err(AppError::NotFound);
        }
        txn.commit().await?;

        log::info!(
            "User {} deleted with {} post(s), {} image(s), {} friend request(s), {} message(s)",
            user_id,
            posts,
            images,
            requests,
            messages
        );
        Ok(())
    }
}

async fn authenticated(db: &DbPool, jwt: &JwtConfig, user: user::Model) -> AppResult<AuthResponse> {
    let roles = UserRepository::find_roles(db, user.id).await?;
    let token = issue_token(&user, roles.clone(), jwt)?;
    Ok(AuthResponse {
        token,
        user: UserResponse::from(user),
        roles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_keywords() {
        assert_eq!(role_name_for("admin"), role::ROLE_ADMIN);
        assert_eq!(role_name_for("mod"), role::ROLE_MODERATOR);
        assert_eq!(role_name_for("superuser"), role::ROLE_USER);
    }

    #[test]
    fn missing_roles_default_to_user() {
        assert_eq!(resolve_roles(None), vec![role::ROLE_USER]);
        assert_eq!(
            resolve_roles(Some(Vec::<String>::new().as_slice())),
            vec![role::ROLE_USER]
        );
    }

    #[test]
    fn duplicate_roles_collapse() {
        let requested = vec!["x".to_string(), "y".to_string(), "admin".to_string()];
        assert_eq!(
            resolve_roles(Some(requested.as_slice())),
            vec![role::ROLE_ADMIN, role::ROLE_USER]
        );
    }
}
