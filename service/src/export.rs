use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use time::Date;
use uuid::Uuid;

use crate::report::ReportRow;
use crate::ServiceError;

#[automock(type Transaction = dao::MockTransaction;)]
#[async_trait]
pub trait ExportService {
    type Transaction: dao::Transaction;

    async fn report_rows(
        &self,
        user_id: Uuid,
        from: Date,
        to: Date,
        tx: Option<Self::Transaction>,
    ) -> Result<Arc<[ReportRow]>, ServiceError>;

    /// The report rows as an xlsx workbook.
    async fn export_spreadsheet(
        &self,
        user_id: Uuid,
        from: Date,
        to: Date,
        tx: Option<Self::Transaction>,
    ) -> Result<Arc<[u8]>, ServiceError>;
}
