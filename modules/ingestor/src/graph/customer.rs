use billsight_common::db::Transactional;
use billsight_entity::customer;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use std::fmt::Debug;
use tracing::instrument;
use uuid::Uuid;

use crate::graph::{error::Error, Graph};

/// Identity key for a customer: the truncated extracted name plus a
/// per-document disambiguator, since customer names alone are not reliably
/// unique across source documents.
pub fn customer_key(name: &str, document_id: &str) -> String {
    let name: String = name.chars().take(50).collect();
    let discriminator: String = document_id.chars().take(8).collect();
    format!("{name}-{discriminator}")
}

#[derive(Clone, Debug, Default)]
pub struct CustomerInformation {
    pub address: Option<String>,
}

pub struct CustomerContext<'g> {
    #[allow(dead_code)]
    graph: &'g Graph,
    pub customer: customer::Model,
}

impl<'g> CustomerContext<'g> {
    pub fn new(graph: &'g Graph, customer: customer::Model) -> Self {
        Self { graph, customer }
    }
}

impl Graph {
    #[instrument(skip(self, tx), err(level = tracing::Level::INFO))]
    pub async fn get_customer_by_name<TX: AsRef<Transactional>>(
        &self,
        name: impl Into<String> + Debug,
        tx: TX,
    ) -> Result<Option<CustomerContext>, Error> {
        Ok(customer::Entity::find()
            .filter(customer::Column::Name.eq(name.into()))
            .one(&self.connection(&tx))
            .await?
            .map(|customer| CustomerContext::new(self, customer)))
    }

    /// Create-if-absent, keyed by the derived [`customer_key`].
    #[instrument(skip(self, tx), err(level = tracing::Level::INFO))]
    pub async fn ingest_customer<TX: AsRef<Transactional>>(
        &self,
        name: impl Into<String> + Debug,
        information: impl Into<CustomerInformation> + Debug,
        tx: TX,
    ) -> Result<CustomerContext, Error> {
        let name = name.into();
        let information = information.into();

        if let Some(found) = self.get_customer_by_name(&name, &tx).await? {
            return Ok(found);
        }

        let entity = customer::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            address: Set(information.address),
        };

        Ok(CustomerContext::new(
            self,
            entity.insert(&self.connection(&tx)).await?,
        ))
    }
}

#[cfg(test)]
mod test {
    use super::customer_key;

    #[test]
    fn key_truncates_name_and_document_id() {
        assert_eq!(
            customer_key("ACME Industries", "665a1b2c3d4e5f6a7b8c9d0e"),
            "ACME Industries-665a1b2c"
        );

        let long = "x".repeat(80);
        assert_eq!(customer_key(&long, "abcdefgh12345"), format!("{}-abcdefgh", "x".repeat(50)));
    }

    #[test]
    fn key_is_character_safe() {
        // multi-byte names must not split inside a code point
        let name = "Ä".repeat(60);
        assert_eq!(customer_key(&name, "12345678"), format!("{}-12345678", "Ä".repeat(50)));
    }
}
