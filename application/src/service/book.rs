use error_stack::Report;

use kernel::interface::repository::{BookRepository, DependOnBookRepository};
use kernel::prelude::entity::{Book, NewBook};
use kernel::KernelError;

use crate::error::AppError;
use crate::transfer::{CreateOrUpdateBookDto, UpsertOutcome};

#[async_trait::async_trait]
pub trait CreateBookService: 'static + Sync + Send + DependOnBookRepository {
    async fn create_book(
        &self,
        dto: CreateOrUpdateBookDto,
    ) -> error_stack::Result<i64, AppError> {
        let book = NewBook {
            title: dto.title,
            author: dto.author,
            description: dto.description,
        };
        self.book_repository().create(book).await.map_err(internal)
    }
}

impl<T> CreateBookService for T where T: DependOnBookRepository {}

#[async_trait::async_trait]
pub trait GetBookService: 'static + Sync + Send + DependOnBookRepository {
    async fn get_book(&self, id: i64) -> error_stack::Result<Book, AppError> {
        let found = self
            .book_repository()
            .find_by_id(id)
            .await
            .map_err(internal)?;
        found.ok_or_else(|| {
            tracing::debug!(id, "no book for id");
            Report::new(AppError::BookNotFound)
        })
    }
}

impl<T> GetBookService for T where T: DependOnBookRepository {}

#[async_trait::async_trait]
pub trait ListBookService: 'static + Sync + Send + DependOnBookRepository {
    async fn list_books(
        &self,
        limit: i64,
        offset: i64,
    ) -> error_stack::Result<(Vec<Book>, i64), AppError> {
        self.book_repository()
            .list(limit, offset)
            .await
            .map_err(internal)
    }
}

impl<T> ListBookService for T where T: DependOnBookRepository {}

#[async_trait::async_trait]
pub trait UpsertBookService: CreateBookService {
    /// Creates the book when `id` does not exist; otherwise merges the
    /// request onto the stored row, where an empty field keeps the stored
    /// value, and persists the result.
    async fn create_or_update(
        &self,
        id: i64,
        dto: CreateOrUpdateBookDto,
    ) -> error_stack::Result<UpsertOutcome, AppError> {
        let existing = self
            .book_repository()
            .find_by_id(id)
            .await
            .map_err(internal)?;
        let Some(mut book) = existing else {
            tracing::info!(id, "no book for id, creating a new record");
            let created = self.create_book(dto).await?;
            return Ok(UpsertOutcome::Created(created));
        };
        if !dto.title.is_empty() {
            book.title = dto.title;
        }
        if !dto.author.is_empty() {
            book.author = dto.author;
        }
        if !dto.description.is_empty() {
            book.description = dto.description;
        }
        self.book_repository()
            .update(&book)
            .await
            .map_err(internal)?;
        Ok(UpsertOutcome::Updated)
    }
}

impl<T> UpsertBookService for T where T: CreateBookService {}

#[async_trait::async_trait]
pub trait DeleteBookService: 'static + Sync + Send + DependOnBookRepository {
    /// Deleting an id that does not exist reports success, so the
    /// operation is idempotent.
    async fn delete_book(&self, id: i64) -> error_stack::Result<(), AppError> {
        self.book_repository().delete(id).await.map_err(internal)
    }
}

impl<T> DeleteBookService for T where T: DependOnBookRepository {}

fn internal(report: Report<KernelError>) -> Report<AppError> {
    tracing::error!(error = ?report, "repository call failed");
    report.change_context(AppError::InternalServerError)
}

#[cfg(test)]
mod test {
    use error_stack::Report;
    use mockall::predicate::eq;

    use kernel::interface::repository::MockBookRepository;
    use kernel::prelude::entity::Book;
    use kernel::KernelError;

    use crate::error::AppError;
    use crate::service::{
        CreateBookService, DeleteBookService, GetBookService, ListBookService, UpsertBookService,
    };
    use crate::transfer::{CreateOrUpdateBookDto, UpsertOutcome};

    fn stored_book() -> Book {
        Book {
            id: 1,
            title: "Harry Potter".into(),
            author: "JK Rowling".into(),
            description: "harry potter and his friends".into(),
        }
    }

    fn full_dto() -> CreateOrUpdateBookDto {
        CreateOrUpdateBookDto {
            title: "Harry Potter".into(),
            author: "JK Rowling".into(),
            description: "harry potter and his friends".into(),
        }
    }

    #[tokio::test]
    async fn create_returns_generated_id() {
        let mut repository = MockBookRepository::new();
        repository
            .expect_create()
            .withf(|book| {
                book.title == "Harry Potter"
                    && book.author == "JK Rowling"
                    && book.description == "harry potter and his friends"
            })
            .returning(|_| Ok(7));

        let id = repository.create_book(full_dto()).await.unwrap();
        assert_eq!(id, 7);
    }

    #[tokio::test]
    async fn create_maps_repository_failure_to_internal() {
        let mut repository = MockBookRepository::new();
        repository
            .expect_create()
            .returning(|_| Err(Report::new(KernelError::Internal)));

        let error = repository.create_book(full_dto()).await.unwrap_err();
        assert_eq!(error.current_context(), &AppError::InternalServerError);
    }

    #[tokio::test]
    async fn get_returns_stored_book() {
        let mut repository = MockBookRepository::new();
        repository
            .expect_find_by_id()
            .with(eq(1))
            .returning(|_| Ok(Some(stored_book())));

        let book = repository.get_book(1).await.unwrap();
        assert_eq!(book, stored_book());
    }

    #[tokio::test]
    async fn get_missing_book_is_not_found() {
        let mut repository = MockBookRepository::new();
        repository.expect_find_by_id().returning(|_| Ok(None));

        let error = repository.get_book(99).await.unwrap_err();
        assert_eq!(error.current_context(), &AppError::BookNotFound);
    }

    #[tokio::test]
    async fn get_failure_is_internal() {
        let mut repository = MockBookRepository::new();
        repository
            .expect_find_by_id()
            .returning(|_| Err(Report::new(KernelError::Timeout)));

        let error = repository.get_book(1).await.unwrap_err();
        assert_eq!(error.current_context(), &AppError::InternalServerError);
    }

    #[tokio::test]
    async fn list_passes_rows_and_total_through() {
        let mut repository = MockBookRepository::new();
        repository
            .expect_list()
            .with(eq(10), eq(20))
            .returning(|_, _| Ok((vec![stored_book()], 42)));

        let (books, total) = repository.list_books(10, 20).await.unwrap();
        assert_eq!(books, vec![stored_book()]);
        assert_eq!(total, 42);
    }

    #[tokio::test]
    async fn upsert_creates_when_missing() {
        let mut repository = MockBookRepository::new();
        repository
            .expect_find_by_id()
            .with(eq(42))
            .returning(|_| Ok(None));
        repository.expect_create().returning(|_| Ok(7));
        repository.expect_update().never();

        let outcome = repository.create_or_update(42, full_dto()).await.unwrap();
        assert_eq!(outcome, UpsertOutcome::Created(7));
    }

    #[tokio::test]
    async fn upsert_keeps_stored_values_for_empty_fields() {
        let mut repository = MockBookRepository::new();
        repository
            .expect_find_by_id()
            .with(eq(1))
            .returning(|_| Ok(Some(stored_book())));
        repository
            .expect_update()
            .withf(|book| {
                book.id == 1
                    && book.title == "Fantastic Beasts"
                    && book.author == "JK Rowling"
                    && book.description == "harry potter and his friends"
            })
            .returning(|_| Ok(()));

        let dto = CreateOrUpdateBookDto {
            title: "Fantastic Beasts".into(),
            author: String::new(),
            description: String::new(),
        };
        let outcome = repository.create_or_update(1, dto).await.unwrap();
        assert_eq!(outcome, UpsertOutcome::Updated);
    }

    #[tokio::test]
    async fn upsert_with_all_empty_fields_rewrites_record_unchanged() {
        let mut repository = MockBookRepository::new();
        repository
            .expect_find_by_id()
            .returning(|_| Ok(Some(stored_book())));
        repository
            .expect_update()
            .withf(|book| *book == stored_book())
            .returning(|_| Ok(()));

        let outcome = repository
            .create_or_update(1, CreateOrUpdateBookDto::default())
            .await
            .unwrap();
        assert_eq!(outcome, UpsertOutcome::Updated);
    }

    #[tokio::test]
    async fn upsert_lookup_failure_short_circuits() {
        let mut repository = MockBookRepository::new();
        repository
            .expect_find_by_id()
            .returning(|_| Err(Report::new(KernelError::Internal)));
        repository.expect_create().never();
        repository.expect_update().never();

        let error = repository.create_or_update(1, full_dto()).await.unwrap_err();
        assert_eq!(error.current_context(), &AppError::InternalServerError);
    }

    #[tokio::test]
    async fn delete_reports_success_for_any_id() {
        let mut repository = MockBookRepository::new();
        repository
            .expect_delete()
            .with(eq(3))
            .times(2)
            .returning(|_| Ok(()));

        repository.delete_book(3).await.unwrap();
        repository.delete_book(3).await.unwrap();
    }

    #[tokio::test]
    async fn delete_failure_is_internal() {
        let mut repository = MockBookRepository::new();
        repository
            .expect_delete()
            .returning(|_| Err(Report::new(KernelError::Internal)));

        let error = repository.delete_book(3).await.unwrap_err();
        assert_eq!(error.current_context(), &AppError::InternalServerError);
    }
}
