use crate::entities::MarketSummary;
use crate::errors::DomainError;
use async_trait::async_trait;

#[async_trait]
pub trait ReportRepository: Send {
    async fn market_summary(&mut self) -> Result<MarketSummary, DomainError>;
}
