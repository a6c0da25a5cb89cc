use chrono::NaiveDate;
use clap::Args;

use super::CommonArgs;
use crate::analysis::{HistoryEntity, ReportFormatter};
use crate::api::DateRange;
use crate::errors::{AppError, AppResult};

/// Daily and cumulative growth of nodes or channels
#[derive(Args)]
pub struct HistoryCommand {
    /// Collection to chart
    #[arg(value_enum)]
    pub entity: HistoryEntity,

    /// First day to include (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last day to include (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<NaiveDate>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl HistoryCommand {
    pub async fn run(&self) -> AppResult<()> {
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if start > end {
                return Err(AppError::InvalidData(format!(
                    "--start {} is after --end {}",
                    start, end
                )));
            }
        }

        let engine = self.common.engine()?;
        let range = DateRange {
            start: self.start,
            end: self.end,
        };
        let report = engine.history(self.entity, &range).await;
        let output = ReportFormatter::format_history(&report, &self.common.output_format())?;
        println!("{}", output);
        Ok(())
    }
}
