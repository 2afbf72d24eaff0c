use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "market_transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub transaction_id: i64,
    pub date: Option<DateTime>,
    pub type_id: i32,
    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub type_name: String,
    pub unit_price: f64,
    pub quantity: i32,
    pub client_id: i64,
    pub location_id: i64,
    pub is_buy_order: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
