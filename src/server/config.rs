use chrono::Duration;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::dashboard::DashboardSettings;
use crate::dashboard::chart::{ChartSettings, SampleKind, SampleRange};
use crate::dashboard::navigator::{SectionSpec, check_sections};

const ENV_PREFIX: &str = "DASHBOARD_";
const MAX_CHART_POINTS: usize = 1_440;
const MAX_CHART_INTERVAL_SECS: i64 = 24 * 60 * 60;

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub listen_address: String,
    pub log_dir: String,
    pub sections: Vec<SectionSpec>,
    pub notification_capacity: usize,
    pub chart_points: usize,
    pub chart_interval_secs: i64,
    pub tds_min: f64,
    pub tds_max: f64,
    pub ph_min: f64,
    pub ph_max: f64,
}

// Partial config for layering
#[derive(Deserialize, Default, Debug)]
struct PartialDashboardConfig {
    listen_address: Option<String>,
    log_dir: Option<String>,
    sections: Option<Vec<SectionSpec>>,
    notification_capacity: Option<usize>,
    chart_points: Option<usize>,
    chart_interval_secs: Option<i64>,
    tds_min: Option<f64>,
    tds_max: Option<f64>,
    ph_min: Option<f64>,
    ph_max: Option<f64>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let settings = DashboardSettings::default();
        let charts = ChartSettings::default();
        DashboardConfig {
            listen_address: "0.0.0.0:8080".to_string(),
            log_dir: "logs".to_string(),
            sections: settings.sections,
            notification_capacity: settings.notification_capacity,
            chart_points: charts.points,
            chart_interval_secs: charts.interval.num_seconds(),
            tds_min: charts.tds.min,
            tds_max: charts.tds.max,
            ph_min: charts.ph.min,
            ph_max: charts.ph.max,
        }
    }
}

impl DashboardConfig {
    /// Defaults, then the optional TOML file, then `DASHBOARD_*` environment variables.
    pub fn load(config_path: Option<&str>) -> Result<Self, String> {
        dotenv::dotenv().ok();

        let env_config: PartialDashboardConfig = envy::prefixed(ENV_PREFIX)
            .from_env::<PartialDashboardConfig>()
            .map_err(|e| format!("Failed to load config from environment: {e}"))?;

        Self::merge(config_path, env_config)
    }

    fn merge(
        config_path: Option<&str>,
        env_config: PartialDashboardConfig,
    ) -> Result<Self, String> {
        let file_config = match config_path {
            Some(path_str) => read_config_file(Path::new(path_str))?,
            None => PartialDashboardConfig::default(),
        };
        let defaults = DashboardConfig::default();

        let config = DashboardConfig {
            listen_address: env_config.listen_address.or(file_config.listen_address)
                .unwrap_or(defaults.listen_address),
            log_dir: env_config.log_dir.or(file_config.log_dir)
                .unwrap_or(defaults.log_dir),
            sections: env_config.sections.or(file_config.sections)
                .unwrap_or(defaults.sections),
            notification_capacity: env_config.notification_capacity.or(file_config.notification_capacity)
                .unwrap_or(defaults.notification_capacity),
            chart_points: env_config.chart_points.or(file_config.chart_points)
                .unwrap_or(defaults.chart_points),
            chart_interval_secs: env_config.chart_interval_secs.or(file_config.chart_interval_secs)
                .unwrap_or(defaults.chart_interval_secs),
            tds_min: env_config.tds_min.or(file_config.tds_min).unwrap_or(defaults.tds_min),
            tds_max: env_config.tds_max.or(file_config.tds_max).unwrap_or(defaults.tds_max),
            ph_min: env_config.ph_min.or(file_config.ph_min).unwrap_or(defaults.ph_min),
            ph_max: env_config.ph_max.or(file_config.ph_max).unwrap_or(defaults.ph_max),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        check_sections(&self.sections)?;
        if self.chart_points == 0 || self.chart_points > MAX_CHART_POINTS {
            return Err(format!(
                "chart_points must be between 1 and {MAX_CHART_POINTS}, got {}",
                self.chart_points
            ));
        }
        if self.chart_interval_secs <= 0 || self.chart_interval_secs > MAX_CHART_INTERVAL_SECS {
            return Err(format!(
                "chart_interval_secs must be between 1 and {MAX_CHART_INTERVAL_SECS}, got {}",
                self.chart_interval_secs
            ));
        }
        let charts = self.chart_settings();
        if self.tds_min > self.tds_max {
            return Err(format!(
                "tds_min ({}) must not exceed tds_max ({})",
                self.tds_min, self.tds_max
            ));
        }
        charts.tds.check().map_err(|e| format!("tds_min/tds_max: {e}"))?;
        if self.ph_min > self.ph_max {
            return Err(format!(
                "ph_min ({}) must not exceed ph_max ({})",
                self.ph_min, self.ph_max
            ));
        }
        charts.ph.check().map_err(|e| format!("ph_min/ph_max: {e}"))?;
        Ok(())
    }

    pub fn dashboard_settings(&self) -> DashboardSettings {
        DashboardSettings {
            sections: self.sections.clone(),
            notification_capacity: self.notification_capacity,
        }
    }

    pub fn chart_settings(&self) -> ChartSettings {
        ChartSettings {
            points: self.chart_points,
            interval: Duration::seconds(self.chart_interval_secs),
            tds: SampleRange {
                min: self.tds_min,
                max: self.tds_max,
                kind: SampleKind::Integer,
            },
            ph: SampleRange {
                min: self.ph_min,
                max: self.ph_max,
                kind: SampleKind::Decimal { places: 1 },
            },
        }
    }
}

fn read_config_file(path: &Path) -> Result<PartialDashboardConfig, String> {
    if !path.exists() {
        return Ok(PartialDashboardConfig::default());
    }
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file at {path:?}: {e}"))?;
    toml::from_str(&contents)
        .map_err(|e| format!("Failed to parse TOML from config file at {path:?}: {e}"))
}
