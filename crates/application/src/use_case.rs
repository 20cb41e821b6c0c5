use async_trait::async_trait;
use warden_core::AppResult;

/// Result envelope returned by every use case: a success payload or exactly one error.
pub type UseCaseResponse<T> = AppResult<T>;

/// Single business operation with a declared permission requirement.
#[async_trait]
pub trait UseCase: Send + Sync {
    /// Input accepted by the operation.
    type Request: Send;
    /// Success payload produced by the operation.
    type Output: Send;

    /// Permission names a caller must hold, checked in this order.
    ///
    /// An empty list means the operation runs without an identity.
    fn required_permissions(&self) -> &[&'static str];

    /// Runs the operation without any authorization check.
    async fn execute(&self, request: Self::Request) -> UseCaseResponse<Self::Output>;
}
