use std::sync::Arc;

use tracing::debug;
use warden_core::{AccessToken, AppError};

use crate::{UseCase, UseCaseResponse, UserRepository};

/// Authorization gate wrapping every protected operation.
///
/// The caller's user aggregate is loaded fresh on every call, so a revoked
/// grant takes effect on the next request.
#[derive(Clone)]
pub struct AuthorizedUseCaseExecutor {
    user_repository: Arc<dyn UserRepository>,
}

impl AuthorizedUseCaseExecutor {
    /// Creates an executor resolving callers through the given repository.
    #[must_use]
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    /// Checks the caller against the operation's required permissions, then runs it.
    ///
    /// Unknown subjects fail exactly like a missing token. Repository errors are
    /// returned as-is. The first missing permission, in declaration order, is
    /// reported in the authorization error.
    pub async fn execute<U>(
        &self,
        use_case: &U,
        request: U::Request,
        access_token: Option<&AccessToken>,
    ) -> UseCaseResponse<U::Output>
    where
        U: UseCase + ?Sized,
    {
        let required_permissions = use_case.required_permissions();
        if required_permissions.is_empty() {
            return use_case.execute(request).await;
        }

        let Some(access_token) = access_token else {
            debug!("rejected protected operation without access token");
            return Err(AppError::authentication_required());
        };

        let Some(user) = self
            .user_repository
            .find_by_email(access_token.subject())
            .await?
        else {
            debug!(subject = %access_token.subject(), "access token subject is not a known user");
            return Err(AppError::authentication_required());
        };

        if !user.is_superuser()
            && let Some(permission) = user.first_missing_permission(required_permissions)
        {
            debug!(
                email = %user.email(),
                permission = %permission,
                "denied operation for missing permission"
            );
            return Err(AppError::Authorization {
                email: user.email().to_owned(),
                permission: permission.to_owned(),
            });
        }

        use_case.execute(request).await
    }
}
