//! Named-window argument shared by tracker and export commands.

use clap::ValueEnum;
use greenbasket_core::PeriodFilter;

/// Named windows selectable from the command line.
///
/// Explicit ranges are a library-level feature; the CLI only exposes the
/// named windows the dashboard offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PeriodArg {
    /// The current local calendar day.
    Today,
    /// The last 7 days.
    Week,
    /// The last calendar month.
    Month,
}

impl From<PeriodArg> for PeriodFilter {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::Today => Self::Today,
            PeriodArg::Week => Self::Week,
            PeriodArg::Month => Self::Month,
        }
    }
}
