use crate::auth::TokenAuthority;
use crate::config::ServerConfig;
use driver::database::PostgresDatabase;
use kernel::KernelError;
use std::ops::Deref;
use std::sync::Arc;
use vodca::References;

pub struct AppModule<D>(Arc<Handler<D>>);

impl<D> Clone for AppModule<D> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<D> AppModule<D> {
    pub fn new(database: D, authority: TokenAuthority) -> Self {
        Self(Arc::new(Handler {
            database,
            authority,
        }))
    }
}

impl AppModule<PostgresDatabase> {
    pub async fn init(config: &ServerConfig) -> error_stack::Result<Self, KernelError> {
        let database = PostgresDatabase::new().await?;
        database.migrate().await?;
        Ok(Self::new(database, TokenAuthority::new(config.jwt_secret())))
    }
}

impl<D> Deref for AppModule<D> {
    type Target = Handler<D>;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

#[derive(References)]
pub struct Handler<D> {
    database: D,
    authority: TokenAuthority,
}
