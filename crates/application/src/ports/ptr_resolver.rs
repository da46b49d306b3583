use async_trait::async_trait;
use rdns_domain::DomainError;

#[async_trait]
pub trait PtrResolver: Send + Sync {
    /// Queries PTR records for a reverse-lookup name such as
    /// `4.4.8.8.in-addr.arpa` and returns the record targets in answer order.
    ///
    /// An empty list means the name exists without PTR data or does not exist.
    async fn query_ptr(&self, reverse_domain: &str) -> Result<Vec<String>, DomainError>;
}
