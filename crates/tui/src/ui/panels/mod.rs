pub mod expenses;
pub mod form;
pub mod summary;
pub mod transactions;
