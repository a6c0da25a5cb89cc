use clap::Args;

use super::CommonArgs;
use crate::analysis::ReportFormatter;
use crate::errors::AppResult;

/// Combined channel capacity statistics across assets
#[derive(Args)]
pub struct AssetSummaryCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Restrict the summary to one asset
    #[arg(long)]
    pub asset: Option<String>,
}

impl AssetSummaryCommand {
    pub async fn run(&self) -> AppResult<()> {
        let engine = self.common.engine()?;
        let report = engine.asset_summary(self.asset.as_deref()).await?;
        let output = ReportFormatter::format_asset_summary(&report, &self.common.output_format())?;
        println!("{}", output);
        Ok(())
    }
}
