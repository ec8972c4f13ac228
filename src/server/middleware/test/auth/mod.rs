use axum::http::{HeaderMap, HeaderValue};

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::auth::{AuthGuard, USER_ID_HEADER},
};
use test_utils::{builder::TestBuilder, factory};

mod require;

fn headers_with_user(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_ID_HEADER, HeaderValue::from_str(value).unwrap());
    headers
}
