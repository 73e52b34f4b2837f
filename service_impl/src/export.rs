use std::sync::Arc;

use async_trait::async_trait;
use dao::TransactionDao;
use service::{
    activity::ActivityService,
    export::ExportService,
    report::{build_report_rows, ReportRow},
    user::UserService,
    validate_range, ServiceError,
};
use time::Date;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::gen_service_impl;
use crate::spreadsheet::write_report_workbook;

gen_service_impl! {
    struct ExportServiceImpl: service::export::ExportService = ExportServiceDeps {
        ActivityService: service::activity::ActivityService<Transaction = Self::Transaction> = activity_service,
        UserService: service::user::UserService<Transaction = Self::Transaction> = user_service,
        TransactionDao: dao::TransactionDao<Transaction = Self::Transaction> = transaction_dao
    }
}

#[async_trait]
impl<Deps: ExportServiceDeps> ExportService for ExportServiceImpl<Deps> {
    type Transaction = Deps::Transaction;

    #[instrument(skip(self, tx))]
    async fn report_rows(
        &self,
        user_id: Uuid,
        from: Date,
        to: Date,
        tx: Option<Self::Transaction>,
    ) -> Result<Arc<[ReportRow]>, ServiceError> {
        let range = validate_range(from, to)?;
        let tx = self.transaction_dao.use_transaction(tx).await?;
        self.user_service.get(user_id, Some(tx.clone())).await?;
        let records = self
            .activity_service
            .find_for_user(user_id, range, Some(tx.clone()))
            .await?;
        let rows = build_report_rows(&records, range);
        self.transaction_dao.commit(tx).await?;
        Ok(rows)
    }

    #[instrument(skip(self, tx))]
    async fn export_spreadsheet(
        &self,
        user_id: Uuid,
        from: Date,
        to: Date,
        tx: Option<Self::Transaction>,
    ) -> Result<Arc<[u8]>, ServiceError> {
        let rows = self.report_rows(user_id, from, to, tx).await?;
        let workbook = write_report_workbook(&rows)?;
        info!("Exported {} report rows ({} bytes)", rows.len(), workbook.len());
        Ok(workbook.into())
    }
}
