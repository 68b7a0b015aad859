use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Customer entity. Owned externally from the quotation document's point of
/// view; quotations reference it by id and consume the name for display.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Company name must be between 1 and 255 characters"
    ))]
    pub company_name: String,

    pub contact_person: String,
    pub contact_no: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub created_date: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::quotation_row::Entity")]
    QuotationRows,
}

impl Related<super::quotation_row::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QuotationRows.def()
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C: ConnectionTrait>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut active_model = self;
        if insert {
            if let ActiveValue::NotSet = active_model.created_date {
                active_model.created_date = Set(Utc::now());
            }
        }
        Ok(active_model)
    }
}
