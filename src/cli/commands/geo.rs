use clap::Args;

use super::CommonArgs;
use crate::analysis::{AggregationOptions, ReportFormatter};
use crate::errors::AppResult;
use crate::types::analysis_results::GeographicReport;

/// Arguments shared by the geographic views
#[derive(Args, Debug, Clone)]
pub struct GeoArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Only count channels of this asset (e.g. CKB, RUSD)
    #[arg(long)]
    pub asset: Option<String>,
}

impl GeoArgs {
    async fn report(&self) -> AppResult<GeographicReport> {
        let engine = self.common.engine()?;
        let options = AggregationOptions {
            asset: self.asset.clone(),
        };
        Ok(engine.geographic_report(&options).await)
    }
}

/// Node and capacity distribution by country
#[derive(Args)]
pub struct CountriesCommand {
    #[command(flatten)]
    pub args: GeoArgs,
}

impl CountriesCommand {
    pub async fn run(&self) -> AppResult<()> {
        let report = self.args.report().await?;
        let output =
            ReportFormatter::format_countries(&report, &self.args.common.output_format())?;
        println!("{}", output);
        Ok(())
    }
}

/// Node and capacity distribution by city
#[derive(Args)]
pub struct CitiesCommand {
    #[command(flatten)]
    pub args: GeoArgs,
}

impl CitiesCommand {
    pub async fn run(&self) -> AppResult<()> {
        let report = self.args.report().await?;
        let output = ReportFormatter::format_cities(&report, &self.args.common.output_format())?;
        println!("{}", output);
        Ok(())
    }
}

/// Nodes ranked by the capacity of their channels
#[derive(Args)]
pub struct TopNodesCommand {
    #[command(flatten)]
    pub args: GeoArgs,

    /// Number of nodes to show
    #[arg(long, default_value_t = 20)]
    pub limit: usize,
}

impl TopNodesCommand {
    pub async fn run(&self) -> AppResult<()> {
        let report = self.args.report().await?;
        let output = ReportFormatter::format_top_nodes(
            &report,
            self.limit,
            &self.args.common.output_format(),
        )?;
        println!("{}", output);
        Ok(())
    }
}

/// Hosting providers ranked by node count
#[derive(Args)]
pub struct IspsCommand {
    #[command(flatten)]
    pub args: GeoArgs,
}

impl IspsCommand {
    pub async fn run(&self) -> AppResult<()> {
        let report = self.args.report().await?;
        let output = ReportFormatter::format_isps(&report, &self.args.common.output_format())?;
        println!("{}", output);
        Ok(())
    }
}
