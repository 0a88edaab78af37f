use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{Header, AUTHORIZATION},
    web, Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use actix_web_httpauth::headers::authorization::{Authorization, Bearer};
use futures::future::LocalBoxFuture;

use crate::{
    app_state::AppState,
    auth::Claims,
    errors::AppError,
    models::domain::UserProfile,
};

/// Verifies a bearer token when one is presented and stores its claims in the
/// request extensions. Requests without an `Authorization` header pass through
/// anonymously; routes that need a user ask for [`AuthenticatedUser`].
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            if req.headers().contains_key(AUTHORIZATION) {
                match verify_bearer(&req) {
                    Ok(claims) => {
                        req.extensions_mut().insert(claims);
                    }
                    Err(e) => {
                        log::debug!("Rejected bearer token on {}: {}", req.path(), e);
                        let response = e.error_response();
                        return Ok(req.into_response(response).map_into_right_body());
                    }
                }
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

fn verify_bearer(req: &ServiceRequest) -> Result<Claims, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::InternalError("Application state not configured".to_string()))?;

    let bearer = Authorization::<Bearer>::parse(req)
        .map_err(|_| AppError::Unauthorized("Invalid authorization header format".to_string()))?
        .into_scheme();

    state.jwt_service.validate_token(bearer.token())
}

/// Extractor for routes that require a signed-in user.
pub struct AuthenticatedUser(pub Claims);

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let claims = req
            .extensions()
            .get::<Claims>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()));

        ready(claims.map(AuthenticatedUser))
    }
}

/// Extractor for admin routes: a signed-in user whose stored profile has the
/// admin role and is not banned.
pub struct AdminUser(pub UserProfile);

impl FromRequest for AdminUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let claims = req.extensions().get::<Claims>().cloned();
        let state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            let claims =
                claims.ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;
            let state = state.ok_or_else(|| {
                AppError::InternalError("Application state not configured".to_string())
            })?;

            let profile = state.user_service.require_admin(&claims).await?;
            Ok(AdminUser(profile))
        })
    }
}
