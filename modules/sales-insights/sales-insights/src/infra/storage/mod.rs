pub mod entity;
pub mod mapper;
pub mod migrations;
pub mod repository;
pub mod sea_orm_repo;
pub mod seed;

pub use repository::EntityRepository;
pub use sea_orm_repo::OrmSalesRepository;
