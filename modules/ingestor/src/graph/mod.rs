pub mod customer;
pub mod error;
pub mod invoice;
pub mod vendor;

use billsight_common::db::{ConnectionOrTransaction, Database, Transactional};

/// Handle for all write access to the normalized store. Constructed once and
/// passed into the services that need it.
#[derive(Clone, Debug)]
pub struct Graph {
    pub db: Database,
}

impl Graph {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub(crate) fn connection<'db, TX: AsRef<Transactional>>(
        &'db self,
        tx: &'db TX,
    ) -> ConnectionOrTransaction<'db> {
        self.db.connection(tx)
    }
}
