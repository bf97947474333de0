use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub uid: i32,
    pub title: String,
    pub year: i32,
    pub released: String,
    pub runtime: String,
    pub genre: String,
    pub director: String,
    pub actors: String,
    pub country: String,
    pub poster: String,
    #[sea_orm(column_type = "Double")]
    pub imdb: f64,
    #[sea_orm(column_name = "type")]
    pub kind: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
