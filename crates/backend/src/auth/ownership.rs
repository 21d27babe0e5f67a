//! Ownership checks between the authenticated user and a resource owner.
//!
//! Users are owned by their `uid`. Jobs are owned by their `publisher`
//! email, compared to the token's `email`. All comparisons are exact string
//! equality.

use jobspring_types::Job;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::repository::JobBoardStore;

use super::types::AuthUser;

/// The route's `:uid` must be the caller's own uid.
pub fn ensure_same_user(user: &AuthUser, uid: &str) -> ApiResult<()> {
    if user.uid != uid {
        return Err(ApiError::forbidden(format!(
            "token uid {} does not match {}",
            user.uid, uid
        )));
    }
    Ok(())
}

/// A job's publisher must be the caller's email.
pub fn ensure_publisher(user: &AuthUser, publisher: &str) -> ApiResult<()> {
    if user.email != publisher {
        return Err(ApiError::forbidden(format!(
            "{} is not the publisher {}",
            user.email, publisher
        )));
    }
    Ok(())
}

/// Load a job the caller is allowed to mutate.
///
/// Every route that changes publisher-owned job data goes through here, and
/// the check always runs against the stored `publisher`, never the request
/// body. `Ok(None)` when the job does not exist.
pub async fn owned_job(
    store: &dyn JobBoardStore,
    user: &AuthUser,
    job_id: Uuid,
) -> ApiResult<Option<Job>> {
    let Some(job) = store.find_job(job_id).await? else {
        return Ok(None);
    };

    ensure_publisher(user, &job.publisher)?;

    Ok(Some(job))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::types::Claims;

    fn user(uid: &str, email: &str) -> AuthUser {
        AuthUser::from(Claims {
            uid: uid.to_string(),
            email: email.to_string(),
            iat: 0,
            exp: 0,
            extra: Default::default(),
        })
    }

    #[test]
    fn test_same_user() {
        let caller = user("abc", "a@example.com");
        assert!(ensure_same_user(&caller, "abc").is_ok());
        assert!(matches!(
            ensure_same_user(&caller, "abd"),
            Err(ApiError::Forbidden(_))
        ));
    }

    #[test]
    fn test_uid_comparison_is_exact() {
        let caller = user("abc", "a@example.com");
        assert!(ensure_same_user(&caller, "ABC").is_err());
        assert!(ensure_same_user(&caller, "abc ").is_err());
    }

    #[test]
    fn test_publisher() {
        let caller = user("abc", "a@example.com");
        assert!(ensure_publisher(&caller, "a@example.com").is_ok());
        assert!(matches!(
            ensure_publisher(&caller, "b@example.com"),
            Err(ApiError::Forbidden(_))
        ));
    }
}
