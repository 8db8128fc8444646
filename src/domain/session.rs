use crate::domain::session::driven_ports::SessionReader;
use crate::domain::session::driving_ports::SessionError;
use crate::external_connections::ExternalConnectivity;
use anyhow::Context;
use tracing::debug;

/// The user a request was authenticated as. Operations which act on behalf of a user take this
/// explicitly rather than reading session state themselves.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct SessionUser {
    pub user_id: i32,
}

pub mod driven_ports {
    use super::*;

    pub trait SessionReader {
        /// Looks up the user owning the session identified by [token], if any
        async fn user_for_token(
            &self,
            token: &str,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Option<SessionUser>, anyhow::Error>;
    }
}

pub mod driving_ports {
    use super::*;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum SessionError {
        #[error("no session token was provided")]
        NoSession,
        #[error("the provided session token does not belong to any session")]
        UnknownSession,
        #[error(transparent)]
        PortError(#[from] anyhow::Error),
    }


    pub trait SessionPort {
        /// Resolves the (already signature-verified) session token from a request into the
        /// user it belongs to
        async fn current_user(
            &self,
            session_token: Option<&str>,
            ext_cxn: &mut impl ExternalConnectivity,
            session_read: &impl driven_ports::SessionReader,
        ) -> Result<SessionUser, SessionError>;
    }
}

pub struct SessionService;

impl driving_ports::SessionPort for SessionService {
    async fn current_user(
        &self,
        session_token: Option<&str>,
        ext_cxn: &mut impl ExternalConnectivity,
        session_read: &impl SessionReader,
    ) -> Result<SessionUser, SessionError> {
        let Some(token) = session_token.filter(|token| !token.is_empty()) else {
            return Err(SessionError::NoSession);
        };

        let session_user = session_read
            .user_for_token(token, &mut *ext_cxn)
            .await
            .context("resolving the current session")?;

        match session_user {
            Some(user) => Ok(user),
            None => {
                debug!("Received a validly signed token with no matching session");
                Err(SessionError::UnknownSession)
            }
        }
    }
}
