use crate::api::session::SESSION_COOKIE_NAME;
use crate::{persistence, SharedData};
use axum::body;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderValue;
use axum::response::IntoResponse;
use axum::Router;
use axum_extra::extract::cookie::{Cookie, Key, SignedCookieJar};
use serde::de::DeserializeOwned;
use sqlx::postgres::PgPoolOptions;

/// Used in tests to both extract the raw bytes from the HTTP response body and then deserialize them into the
/// requested type. Will panic and fail the test if either step fails somehow.
pub async fn deserialize_body<T: DeserializeOwned>(response_body: body::Body) -> T {
    let bytes = body::to_bytes(response_body, usize::MAX)
        .await
        .expect("Could not read data from response body!");

    serde_json::from_slice(&bytes).unwrap_or_else(|err| {
        panic!(
            "Could not parse body content into data structure! Error: {}, Received body: {:?}",
            err, bytes
        )
    })
}

pub fn test_cookie_key() -> Key {
    Key::from(&[7u8; 64])
}

/// Produces a `Cookie` header value carrying [token] in a session cookie signed with [key]
pub fn signed_session_cookie(key: &Key, token: &str) -> HeaderValue {
    let jar = SignedCookieJar::new(key.clone()).add(Cookie::new(SESSION_COOKIE_NAME, token.to_owned()));
    let response = jar.into_response();
    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .expect("signed jar should set a cookie")
        .to_str()
        .expect("set-cookie header should be valid text");
    let name_and_value = set_cookie
        .split(';')
        .next()
        .expect("set-cookie header should contain the cookie");

    HeaderValue::from_str(name_and_value).expect("cookie should be a valid header value")
}

/// Builds the full application router on top of a pool which never actually connects. Only useful
/// for requests which are answered before the database would be touched.
pub fn router_without_database() -> Router {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://postgres@localhost:5432/unreachable")
        .expect("lazy pool should accept a well-formed URL");

    crate::build_router(SharedData {
        ext_cxn: persistence::ExternalConnectivity::new(pool),
        cookie_key: test_cookie_key(),
    })
}
