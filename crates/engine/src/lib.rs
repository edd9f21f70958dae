//! Pure bookkeeping over the rows of the remote sheet.
//!
//! Nothing in this crate performs I/O: [`aggregate`] turns the list of
//! [`TransactionRecord`]s returned by the endpoint into display rows, totals
//! and the per-category expense breakdown the pie chart is drawn from.
//!
//! [`TransactionRecord`]: api_types::transaction::TransactionRecord

pub use aggregate::{
    Aggregate, CategoryBreakdown, CategoryTotal, DisplayRow, Totals, UNCATEGORIZED, aggregate,
};
pub use amount::Amount;
pub use dates::DateConvention;
pub use error::EngineError;
pub use flow::FlowDirection;
pub use money::Money;

mod aggregate;
mod amount;
mod dates;
mod error;
mod flow;
mod money;

type ResultEngine<T> = Result<T, EngineError>;
