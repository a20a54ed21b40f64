use crate::entity::{Book, NewBook};
use crate::KernelError;

/// Storage contract for the `books` table.
///
/// `find_by_id` reports absence as `None`; `update` and `delete` are no-ops
/// for ids that do not exist.
#[mockall::automock]
#[async_trait::async_trait]
pub trait BookRepository: 'static + Sync + Send {
    async fn create(&self, book: NewBook) -> error_stack::Result<i64, KernelError>;
    async fn find_by_id(&self, id: i64) -> error_stack::Result<Option<Book>, KernelError>;
    /// Returns one page ordered by ascending id, together with the total
    /// row count of the whole table.
    async fn list(
        &self,
        limit: i64,
        offset: i64,
    ) -> error_stack::Result<(Vec<Book>, i64), KernelError>;
    async fn update(&self, book: &Book) -> error_stack::Result<(), KernelError>;
    async fn delete(&self, id: i64) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnBookRepository: 'static + Sync + Send {
    type BookRepository: BookRepository;
    fn book_repository(&self) -> &Self::BookRepository;
}

impl<T> DependOnBookRepository for T
where
    T: BookRepository,
{
    type BookRepository = T;
    fn book_repository(&self) -> &Self::BookRepository {
        self
    }
}
