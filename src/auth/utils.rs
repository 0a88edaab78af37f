use crate::{
    auth::Claims,
    errors::{AppError, AppResult},
    models::domain::UserProfile,
};

pub fn require_admin(profile: &UserProfile) -> AppResult<()> {
    if profile.banned {
        return Err(AppError::Forbidden("This account is banned".to_string()));
    }
    if !profile.is_admin() {
        return Err(AppError::Forbidden(
            "Only admins can perform this action".to_string(),
        ));
    }
    Ok(())
}

/// `profile` is the caller's stored profile, if one exists yet.
pub fn require_owner_or_admin(
    claims: &Claims,
    profile: Option<&UserProfile>,
    resource_owner: &str,
) -> AppResult<()> {
    let is_admin = profile.map(UserProfile::is_admin).unwrap_or(false);
    if !is_admin && claims.sub != resource_owner {
        return Err(AppError::Forbidden(
            "You can only access your own resources".to_string(),
        ));
    }
    Ok(())
}
