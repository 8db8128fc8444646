use sqlx::PgConnection;

/// A live database connection borrowed from some [ExternalConnectivity]
pub trait ConnectionHandle {
    fn borrow_connection(&mut self) -> &mut PgConnection;
}

/// Hands out clients for external systems (currently just the database) so driven adapters
/// don't need to know where their connections come from
pub trait ExternalConnectivity {
    type DbHandle<'cxn_borrow>: ConnectionHandle
    where
        Self: 'cxn_borrow;

    async fn database_cxn(&mut self) -> Result<Self::DbHandle<'_>, anyhow::Error>;
}
