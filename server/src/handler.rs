use std::ops::Deref;
use std::sync::Arc;

use driver::database::PostgresDatabase;

/// Shared state handed to every route; cheap to clone.
#[derive(Clone)]
pub struct AppModule(Arc<Handler>);

impl AppModule {
    pub fn new(pgpool: PostgresDatabase) -> Self {
        Self(Arc::new(Handler::new(pgpool)))
    }
}

impl Deref for AppModule {
    type Target = Handler;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

pub struct Handler {
    pgpool: PostgresDatabase,
}

impl Handler {
    fn new(pgpool: PostgresDatabase) -> Self {
        Self { pgpool }
    }

    pub fn pgpool(&self) -> &PostgresDatabase {
        &self.pgpool
    }
}
