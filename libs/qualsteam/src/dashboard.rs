use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{error, info_span};

use crate::chart::ChartSpec;
use crate::compose::{compose, trace_title};
use crate::metrics::{SummaryMetrics, summarize};
use crate::{Error, Loader, SignalTable};

pub const NOT_FOUND_HINT: &str = "Please ensure the CSV files are in the data/ folder.";

/// Everything the presentation surface needs for one scenario.
#[derive(Serialize, Clone, Debug)]
pub struct DashboardView {
    pub scenario: String,
    pub site: String,
    pub source: String,
    pub date: Option<NaiveDate>,
    pub metrics: SummaryMetrics,
    pub chart: ChartSpec,
    #[serde(skip)]
    pub table: Arc<SignalTable>,
}

impl DashboardView {
    pub fn date_label(&self) -> String {
        self.date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}

/// User-facing error state for a scenario that could not be shown.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Banner {
    pub message: String,
    pub hint: Option<&'static str>,
}

impl From<&Error> for Banner {
    fn from(err: &Error) -> Self {
        match err {
            Error::ResourceNotFound { path, .. } => Banner {
                message: format!("Data file not found: `{}`", path.display()),
                hint: Some(NOT_FOUND_HINT),
            },
            err => Banner {
                message: err.to_string(),
                hint: None,
            },
        }
    }
}

#[derive(Debug)]
pub enum ViewState {
    Ready(Box<DashboardView>),
    Failed(Banner),
}

pub struct Dashboard {
    loader: Loader,
}

impl Dashboard {
    pub fn new(loader: Loader) -> Self {
        Self { loader }
    }

    pub fn loader(&self) -> &Loader {
        &self.loader
    }

    /// Runs load, summarize and compose for one scenario.
    pub fn try_view(&self, scenario: &str) -> Result<DashboardView, Error> {
        let _span = info_span!("view", scenario).entered();
        let table = self.loader.load(scenario)?;
        let date = table.report_date();
        let metrics = summarize(&table)?;
        let chart = compose(&table, trace_title(scenario, date))?;
        let catalog = self.loader.catalog();
        Ok(DashboardView {
            scenario: scenario.to_string(),
            site: catalog.site().to_string(),
            source: catalog.source().to_string(),
            date,
            metrics,
            chart,
            table,
        })
    }

    /// Like [`Self::try_view`], with failures turned into a banner.
    pub fn view(&self, scenario: &str) -> ViewState {
        match self.try_view(scenario) {
            Ok(view) => ViewState::Ready(Box::new(view)),
            Err(err) => {
                error!(scenario, %err, "scenario view failed");
                ViewState::Failed(Banner::from(&err))
            }
        }
    }
}
