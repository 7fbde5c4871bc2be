//! Summary command

use clap::Args;

use super::{today, AppContext};
use crate::display::format_summary;
use crate::error::TrackerResult;
use crate::reports::RawFilter;
use crate::services::ExpenseService;
use crate::storage::RepositoryProvider;

/// Summary filters; values that do not parse are ignored
#[derive(Args, Debug, Default)]
pub struct SummaryArgs {
    /// Part of the expense name (case-insensitive)
    #[arg(short, long)]
    pub name: Option<String>,
    /// Smallest amount to include
    #[arg(long)]
    pub min: Option<String>,
    /// Largest amount to include
    #[arg(long)]
    pub max: Option<String>,
    /// First day (YYYY-MM-DD or DD/MM/YYYY)
    #[arg(long)]
    pub from: Option<String>,
    /// Last day, inclusive
    #[arg(long)]
    pub to: Option<String>,
}

impl From<SummaryArgs> for RawFilter {
    fn from(args: SummaryArgs) -> Self {
        RawFilter {
            name: args.name,
            min_amount: args.min,
            max_amount: args.max,
            start_date: args.from,
            end_date: args.to,
        }
    }
}

/// Show this month's total and the current month or the filtered list
pub async fn handle_summary_command(ctx: &AppContext, args: SummaryArgs) -> TrackerResult<()> {
    let (backend, session) = ctx.require_session().await?;
    let repo = backend.repositories.expenses(&session);
    let service = ExpenseService::new(repo.as_ref());

    let summary = service
        .summary(session.user_id(), &RawFilter::from(args), today())
        .await?;
    print!("{}", format_summary(&summary, &ctx.settings));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_map_to_raw_filter() {
        let args = SummaryArgs {
            name: Some("taxi".into()),
            min: Some("abc".into()),
            to: Some("2024-05-31".into()),
            ..SummaryArgs::default()
        };
        let criteria = RawFilter::from(args).parse();
        assert_eq!(criteria.name_pattern.as_deref(), Some("taxi"));
        assert!(criteria.min_amount.is_none());
        assert!(criteria.end_date.is_some());
    }
}
