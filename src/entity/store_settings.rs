use sea_orm::entity::prelude::*;

/// Single-row table; the storefront configuration always lives at [`SETTINGS_ID`].
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "store_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub name: String,
    pub whatsapp: String,
    pub is_open: bool,
    pub logo_url: String,
    pub banner_url: String,
    pub banner_message: String,
    #[sea_orm(column_type = "Decimal(None)")]
    pub delivery_fee: Decimal,
    pub updated_at: DateTimeWithTimeZone,
}

pub const SETTINGS_ID: i32 = 1;

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
