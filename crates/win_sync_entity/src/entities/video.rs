//! 橱窗视频记录实体定义

use sea_orm::entity::prelude::*;

/// amount 与 views 是展示用的自由文本，按原样存取，不做数值解析
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "video")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub amount: String,
    pub views: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
