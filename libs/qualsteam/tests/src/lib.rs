#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    use chrono::NaiveDate;
    use qualsteam::{
        Catalog, Dashboard, Error, Loader, SignalTable, TableCache, ViewState,
        chart::AxisRange,
        compose::{compose, trace_title},
        metrics::summarize,
        schema::Signal,
    };
    use tempfile::TempDir;

    fn repo_root() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../..")
    }

    fn setup_dashboard() -> Dashboard {
        let subscriber = tracing_subscriber::FmtSubscriber::new();
        let _ = tracing::subscriber::set_global_default(subscriber);

        let catalog = Catalog::from_file(repo_root().join("scenarios.toml"), repo_root())
            .expect("bundled catalog");
        Dashboard::new(Loader::new(catalog, Arc::new(TableCache::new())))
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "{actual} != {expected}"
        );
    }

    fn series_counts(view: &qualsteam::DashboardView) -> Vec<usize> {
        view.chart.panels.iter().map(|p| p.series.len()).collect()
    }

    #[test]
    fn test_bundled_catalog_matches_builtin() {
        let dashboard = setup_dashboard();
        let builtin = Catalog::builtin(repo_root());
        assert_eq!(dashboard.loader().catalog().scenarios(), builtin.scenarios());
        assert_eq!(dashboard.loader().catalog().site(), builtin.site());
    }

    #[test]
    fn test_scenario_1_full_log() {
        let dashboard = setup_dashboard();
        let view = dashboard.try_view("Scenario 1").unwrap();
        assert_eq!(view.date, NaiveDate::from_ymd_opt(2024, 3, 11));
        assert_eq!(view.chart.title, "Forensic Trace: Scenario 1 (2024-03-11)");
        assert_eq!(view.table.len(), 180);
        assert_eq!(series_counts(&view), [2, 3, 1, 1]);
        assert_close(view.metrics.avg_process_temp, 116.4055);
        assert_close(view.metrics.max_outlet_pressure, 2.49);
        assert_close(view.metrics.total_steam.unwrap(), 1010.5778333333336);
        assert_close(view.metrics.avg_valve_opening.unwrap(), 39.23005555555554);

        let text: Vec<_> = view.metrics.readouts().iter().map(|r| r.text()).collect();
        assert_eq!(text, ["116.4 °C", "2.49 bar", "1011 kg", "39.2 %"]);
    }

    #[test]
    fn test_scenario_2_without_inlet_or_setpoint() {
        let dashboard = setup_dashboard();
        let view = dashboard.try_view("Scenario 2").unwrap();
        assert_eq!(series_counts(&view), [2, 1, 1, 1]);
        assert!(!view.table.has(Signal::InletPressure));
        assert!(!view.table.has(Signal::PressureSetpoint));
        assert_close(view.metrics.total_steam.unwrap(), 851.270666666667);
    }

    #[test]
    fn test_scenario_3_without_steam_flow() {
        let dashboard = setup_dashboard();
        let view = dashboard.try_view("Scenario 3").unwrap();
        assert_eq!(view.metrics.total_steam, None);
        assert_eq!(view.metrics.readouts()[2].text(), "N/A");
        assert_eq!(series_counts(&view), [2, 3, 0, 1]);
        assert_close(view.metrics.max_outlet_pressure, 2.5);
    }

    #[test]
    fn test_scenario_4_blank_cells_and_extra_columns() {
        let dashboard = setup_dashboard();
        let view = dashboard.try_view("Scenario 4").unwrap();
        assert_eq!(view.table.len(), 200);
        let temps = view.table.column(Signal::TempActual).unwrap();
        assert_eq!(temps.iter().filter(|t| t.is_none()).count(), 12);
        assert_close(view.metrics.avg_process_temp, 116.51010638297878);
        assert_eq!(series_counts(&view), [2, 3, 1, 1]);
    }

    #[test]
    fn test_reload_hits_cache() {
        let dashboard = setup_dashboard();
        let a = dashboard.loader().load("Scenario 1").unwrap();
        let b = dashboard.loader().load("Scenario 1").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(dashboard.loader().cache().misses(), 1);
        assert_eq!(dashboard.loader().cache().hits(), 1);
    }

    #[test]
    fn test_valve_axis_independent_of_data() {
        let dashboard = setup_dashboard();
        for scenario in ["Scenario 1", "Scenario 2", "Scenario 3", "Scenario 4"] {
            let view = dashboard.try_view(scenario).unwrap();
            assert_eq!(
                view.chart.panels[3].y_axis.range,
                AxisRange::Fixed {
                    min: 0.0,
                    max: 105.0
                }
            );
        }
    }

    #[test]
    fn test_chart_json_shape() {
        let dashboard = setup_dashboard();
        let view = dashboard.try_view("Scenario 3").unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&view.chart.to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["x_axis"]["shared"], true);
        assert_eq!(json["hover"], "x_unified");
        assert_eq!(json["legend"]["orientation"], "horizontal");
        assert_eq!(json["x_axis"]["values"][0], "2024-04-02T22:00:00");
        assert_eq!(json["panels"].as_array().unwrap().len(), 4);
        assert_eq!(json["panels"][1]["series"][2]["name"], "Outlet P2");
        assert_eq!(
            json["panels"][1]["series"][2]["style"]["fill"]["color"],
            "rgba(0, 0, 139, 0.1)"
        );
        assert_eq!(json["axis_style"]["grid_color"], "#F0F0F0");
    }

    #[test]
    fn test_missing_scenario_file() {
        let root = TempDir::new().unwrap();
        let loader = Loader::new(Catalog::builtin(root.path()), Arc::new(TableCache::new()));
        let err = loader.load("Scenario 1").unwrap_err();
        assert!(matches!(err, Error::ResourceNotFound { .. }));

        let dashboard = Dashboard::new(loader);
        let ViewState::Failed(banner) = dashboard.view("Scenario 1") else {
            panic!("expected a banner");
        };
        assert!(banner.message.starts_with("Data file not found: `"));
        assert!(banner.message.ends_with("df_1_cleaned.csv`"));
    }

    #[test]
    fn test_pipeline_without_dashboard() {
        let table =
            SignalTable::from_path(repo_root().join("data/df_2_cleaned.csv")).unwrap();
        let metrics = summarize(&table).unwrap();
        let title = trace_title("Scenario 2", table.report_date());
        let chart = compose(&table, &title).unwrap();
        assert_eq!(chart.title, "Forensic Trace: Scenario 2 (2024-03-14)");
        assert_close(metrics.avg_valve_opening.unwrap(), 40.22073333333335);
        assert_eq!(chart, compose(&table, title).unwrap());
    }
}
