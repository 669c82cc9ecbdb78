use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response of `GET /`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceIndex {
    pub message: String,
    pub version: String,
    pub farm_name: String,
}

/// Response of `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

pub mod crop {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct CycleListQuery {
        /// `planned`, `planted`, `growing`, `harvested` or `failed`.
        pub status: Option<String>,
    }
}

pub mod livestock {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct LivestockListQuery {
        pub species: Option<String>,
        /// `active`, `sold`, `deceased` or `quarantine`.
        pub status: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct HealthRecordListQuery {
        /// Only records on or after this date.
        pub since: Option<NaiveDate>,
    }
}

pub mod financial {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct BudgetListQuery {
        pub fiscal_year: Option<i32>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionListQuery {
        /// `income` or `expense`.
        #[serde(rename = "type")]
        pub kind: Option<String>,
        pub category: Option<String>,
        pub start_date: Option<NaiveDate>,
        pub end_date: Option<NaiveDate>,
    }
}

pub mod labor {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct WorkerListQuery {
        /// `active`, `inactive` or `terminated`.
        pub status: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct WorkLogListQuery {
        pub worker_id: Option<Uuid>,
        pub start_date: Option<NaiveDate>,
        pub end_date: Option<NaiveDate>,
    }
}

pub mod analytics {
    use super::*;

    /// Inclusive date range; both ends optional.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct DateRangeQuery {
        pub start_date: Option<NaiveDate>,
        pub end_date: Option<NaiveDate>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct FiscalYearQuery {
        /// Defaults to the current year.
        pub fiscal_year: Option<i32>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ReportQuery {
        /// `financial` or `comprehensive` (the default).
        pub kind: Option<String>,
    }
}
