use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::user::Role;
use crate::utils::token::Claims;
use crate::AppState;

/// Identity attached to every request that passed [`require_session`].
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: Uuid,
    pub username: String,
    pub role: Role,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            username: claims.username,
            role: claims.role,
        }
    }
}

fn bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

/// Rejects requests without a bearer token (401) or with a token that fails
/// signature/expiry checks (403).
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response> {
    let Some(token) = bearer_token(&req) else {
        return Err(Error::Unauthenticated("No token provided".to_string()));
    };
    let claims = state.sessions.verify(token)?;
    req.extensions_mut().insert(CurrentUser::from(claims));
    Ok(next.run(req).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| Error::Unauthenticated("No token provided".to_string()))
    }
}

/// Extractor for admin-only handlers; rejects every other role with 403
/// before the handler body (or its payload) is looked at.
#[derive(Debug, Clone)]
pub struct AdminUser(pub CurrentUser);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            return Err(Error::Forbidden(
                "Access denied. Admin role required.".to_string(),
            ));
        }
        Ok(AdminUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn parts_with(user: Option<CurrentUser>) -> Parts {
        let mut req = Request::builder().uri("/").body(Body::empty()).unwrap();
        if let Some(user) = user {
            req.extensions_mut().insert(user);
        }
        req.into_parts().0
    }

    fn user(role: Role) -> CurrentUser {
        CurrentUser {
            user_id: Uuid::new_v4(),
            username: "someone".into(),
            role,
        }
    }

    #[test]
    fn bearer_token_requires_scheme() {
        let req = Request::builder()
            .header(header::AUTHORIZATION, "Token abc")
            .body(Body::empty())
            .unwrap();
        assert!(bearer_token(&req).is_none());

        let req = Request::builder()
            .header(header::AUTHORIZATION, "Bearer abc")
            .body(Body::empty())
            .unwrap();
        assert_eq!(bearer_token(&req), Some("abc"));

        let req = Request::builder()
            .header(header::AUTHORIZATION, "Bearer ")
            .body(Body::empty())
            .unwrap();
        assert!(bearer_token(&req).is_none());
    }

    #[tokio::test]
    async fn admin_gate_rejects_sales_users() {
        let mut parts = parts_with(Some(user(Role::SalesUser)));
        let err = AdminUser::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));
    }

    #[tokio::test]
    async fn admin_gate_accepts_admins() {
        let mut parts = parts_with(Some(user(Role::Admin)));
        let AdminUser(admin) = AdminUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert!(admin.is_admin());
    }

    #[tokio::test]
    async fn missing_identity_is_unauthenticated() {
        let mut parts = parts_with(None);
        let err = CurrentUser::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert!(matches!(err, Error::Unauthenticated(_)));
    }
}
