use std::time::Duration;

/// View path for the budgets admin page
pub const BUDGETS_VIEW_PATH: &str = "/anggaran";

/// View path for the expenses admin page
pub const EXPENSES_VIEW_PATH: &str = "/pengeluaran";

/// Trailing-edge debounce window applied by budget-update subscribers
pub const UPDATE_DEBOUNCE: Duration = Duration::from_millis(300);

/// How long a "budget recently reduced" notice stays visible
pub const REDUCTION_NOTICE_VISIBILITY: Duration = Duration::from_secs(5);

/// ISO 4217 code for the ledger currency
pub const LEDGER_CURRENCY: &str = "IDR";
