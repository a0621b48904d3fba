use billsight_common::db::Transactional;
use billsight_entity::vendor;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use std::fmt::Debug;
use tracing::instrument;
use uuid::Uuid;

use crate::graph::{error::Error, Graph};

#[derive(Clone, Debug, Default)]
pub struct VendorInformation {
    pub address: Option<String>,
    pub tax_id: Option<String>,
}

pub struct VendorContext<'g> {
    #[allow(dead_code)]
    graph: &'g Graph,
    pub vendor: vendor::Model,
}

impl<'g> VendorContext<'g> {
    pub fn new(graph: &'g Graph, vendor: vendor::Model) -> Self {
        Self { graph, vendor }
    }
}

impl Graph {
    #[instrument(skip(self, tx), err(level = tracing::Level::INFO))]
    pub async fn get_vendor_by_name<TX: AsRef<Transactional>>(
        &self,
        name: impl Into<String> + Debug,
        tx: TX,
    ) -> Result<Option<VendorContext>, Error> {
        Ok(vendor::Entity::find()
            .filter(vendor::Column::Name.eq(name.into()))
            .one(&self.connection(&tx))
            .await?
            .map(|vendor| VendorContext::new(self, vendor)))
    }

    /// Create-if-absent, keyed by name. An existing row always wins: later
    /// documents naming the same vendor never overwrite its attributes.
    #[instrument(skip(self, tx), err(level = tracing::Level::INFO))]
    pub async fn ingest_vendor<TX: AsRef<Transactional>>(
        &self,
        name: impl Into<String> + Debug,
        information: impl Into<VendorInformation> + Debug,
        tx: TX,
    ) -> Result<VendorContext, Error> {
        let name = name.into();
        let information = information.into();

        if let Some(found) = self.get_vendor_by_name(&name, &tx).await? {
            return Ok(found);
        }

        let entity = vendor::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            address: Set(information.address),
            tax_id: Set(information.tax_id),
        };

        Ok(VendorContext::new(
            self,
            entity.insert(&self.connection(&tx)).await?,
        ))
    }
}
