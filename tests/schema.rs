use keel::{
    get_db_transaction, CommandError, DbTransaction, LogicalTransaction, Result, SchemaCreator,
};

#[derive(Debug)]
struct FakeDbTransaction;

impl DbTransaction for FakeDbTransaction {}

struct FakeLogicalTransaction {
    inner: Option<FakeDbTransaction>,
}

impl LogicalTransaction for FakeLogicalTransaction {
    fn db_transaction(&self) -> Option<&dyn DbTransaction> {
        self.inner.as_ref().map(|t| t as &dyn DbTransaction)
    }
}

#[test]
fn relational_transaction_is_exposed() {
    let transaction = FakeLogicalTransaction {
        inner: Some(FakeDbTransaction),
    };
    assert!(get_db_transaction(&transaction).is_ok());
}

#[test]
fn non_relational_transaction_is_an_error() {
    let transaction = FakeLogicalTransaction { inner: None };
    let err = get_db_transaction(&transaction).unwrap_err();
    assert_eq!(
        err.downcast_ref::<CommandError>(),
        Some(&CommandError::RelationalNotInUse)
    );
}

#[derive(Default)]
struct FakeSchemaCreator {
    created: bool,
    exists_calls: std::cell::Cell<usize>,
}

impl SchemaCreator for FakeSchemaCreator {
    fn exists(&self) -> Result<bool> {
        self.exists_calls.set(self.exists_calls.get() + 1);
        Ok(self.created)
    }

    fn create(&mut self) -> Result<()> {
        self.created = true;
        Ok(())
    }

    fn delete(&mut self) -> Result<()> {
        self.created = false;
        Ok(())
    }
}

#[test]
fn schema_lifecycle() {
    let mut creator = FakeSchemaCreator::default();
    assert!(!creator.exists().unwrap());
    creator.create().unwrap();
    assert!(creator.exists().unwrap());
    creator.delete().unwrap();
    assert!(!creator.exists().unwrap());
}

#[tokio::test]
async fn async_variants_default_to_the_sync_operations() {
    let mut creator = FakeSchemaCreator::default();
    assert!(!creator.exists_async().await.unwrap());
    creator.create().unwrap();
    assert!(creator.exists_async().await.unwrap());
    creator.delete_async().await.unwrap();
    assert!(!creator.exists_async().await.unwrap());
    assert_eq!(creator.exists_calls.get(), 3);
}
