use crate::domain;
use crate::domain::session::SessionUser;
use crate::external_connections::{ConnectionHandle, ExternalConnectivity};
use anyhow::{Context, Error};
use sqlx::{query_as, FromRow};

pub struct DbSessionReader;

#[derive(FromRow)]
struct SessionOwnerRow {
    user_id: i32,
}

impl domain::session::driven_ports::SessionReader for DbSessionReader {
    async fn user_for_token(
        &self,
        token: &str,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Option<SessionUser>, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let owner = query_as::<_, SessionOwnerRow>(
            "SELECT us.user_id FROM user_session us WHERE us.token = $1",
        )
        .bind(token)
        .fetch_optional(cxn.borrow_connection())
        .await
        .context("trying to look up a session by its token")?;

        Ok(owner.map(|row| SessionUser {
            user_id: row.user_id,
        }))
    }
}
