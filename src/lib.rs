pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{HttpAnalysisService, OfflineAnalysis};
pub use config::{cli::LocalStorage, CliConfig};
pub use core::{ReportAggregator, Session};
pub use domain::model::{DomainName, ReportKind, ReportResult};
pub use utils::error::{ReportError, Result};
