use crate::{CommandError, DbTransaction, Result};

/// Logical transaction wrapper as the surrounding engine sees it.
///
/// A physical handle is only present when the active store is relational;
/// its absence is a legitimate, reportable state.
pub trait LogicalTransaction {
    fn db_transaction(&self) -> Option<&dyn DbTransaction>;
}

/// Extract the physical transaction from a logical wrapper.
///
/// Fails with [`CommandError::RelationalNotInUse`] when the wrapper exposes
/// no physical handle, never returning a null stand-in.
pub fn get_db_transaction(transaction: &dyn LogicalTransaction) -> Result<&dyn DbTransaction> {
    transaction
        .db_transaction()
        .ok_or_else(|| CommandError::RelationalNotInUse.into())
}
