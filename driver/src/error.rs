use kernel::KernelError;

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error(transparent)]
    SqlX(#[from] sqlx::Error),
    #[error(transparent)]
    Env(#[from] dotenvy::Error),
}

/// Conversion into the kernel failure context, attaching the driver error
/// as the report source.
pub(crate) trait ConvertError {
    type Ok;
    fn convert_error(self) -> error_stack::Result<Self::Ok, KernelError>;
}

impl<T> ConvertError for Result<T, DriverError> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| match error {
            DriverError::SqlX(sqlx::Error::PoolTimedOut) => {
                error_stack::Report::from(error).change_context(KernelError::Timeout)
            }
            _ => error_stack::Report::from(error).change_context(KernelError::Internal),
        })
    }
}
