//! Sea-ORM entities backing the catalog tables

pub mod brand;
pub mod product;
