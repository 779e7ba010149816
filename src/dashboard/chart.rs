use chrono::{Duration, NaiveDateTime};
use rand::Rng;
use serde::Serialize;
use serde_json::{Value, json};
use std::iter;

const LABEL_FORMAT: &str = "%H:%M";

/// How samples inside a range are drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleKind {
    Integer,
    /// Rounded to `places` decimal digits.
    Decimal { places: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRange {
    pub min: f64,
    pub max: f64,
    pub kind: SampleKind,
}

impl SampleRange {
    fn factor(&self) -> f64 {
        match self.kind {
            SampleKind::Integer => 1.0,
            SampleKind::Decimal { places } => 10f64.powi(places as i32),
        }
    }

    /// Smallest and largest drawable value, in units of the sample precision.
    fn scaled_bounds(&self) -> Option<(i64, i64)> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return None;
        }
        let factor = self.factor();
        let low = (self.min * factor).ceil();
        let high = (self.max * factor).floor();
        if low > high || low < i64::MIN as f64 || high > i64::MAX as f64 {
            return None;
        }
        Some((low as i64, high as i64))
    }

    /// Fails when no value at the sample precision lies within `min..=max`.
    pub fn check(&self) -> Result<(), String> {
        match self.scaled_bounds() {
            Some(_) => Ok(()),
            None => Err(format!(
                "range {}..={} contains no {} sample",
                self.min,
                self.max,
                match self.kind {
                    SampleKind::Integer => "whole-number".to_string(),
                    SampleKind::Decimal { places } => format!("{places}-decimal"),
                }
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChartSettings {
    pub points: usize,
    pub interval: Duration,
    pub tds: SampleRange,
    pub ph: SampleRange,
}

impl Default for ChartSettings {
    fn default() -> Self {
        ChartSettings {
            points: 10,
            interval: Duration::minutes(1),
            tds: SampleRange {
                min: 300.0,
                max: 400.0,
                kind: SampleKind::Integer,
            },
            ph: SampleRange {
                min: 6.0,
                max: 8.0,
                kind: SampleKind::Decimal { places: 1 },
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Styling and axis hints of one line chart.
#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub canvas_id: &'static str,
    pub label: &'static str,
    pub background_color: &'static str,
    pub border_color: &'static str,
    pub suggested_min: f64,
    pub suggested_max: f64,
    pub range: SampleRange,
}

impl ChartSpec {
    pub fn tds(range: SampleRange) -> Self {
        ChartSpec {
            canvas_id: "tdsChart",
            label: "TDS (ppm)",
            background_color: "rgba(59, 130, 246, 0.2)",
            border_color: "rgba(59, 130, 246, 1)",
            suggested_min: 200.0,
            suggested_max: 500.0,
            range,
        }
    }

    pub fn ph(range: SampleRange) -> Self {
        ChartSpec {
            canvas_id: "phChart",
            label: "pH",
            background_color: "rgba(34, 197, 94, 0.2)",
            border_color: "rgba(34, 197, 94, 1)",
            suggested_min: 4.0,
            suggested_max: 10.0,
            range,
        }
    }

    /// Configuration object handed to the charting library's constructor.
    pub fn to_chart_config(&self, series: &ChartSeries) -> Value {
        json!({
            "type": "line",
            "data": {
                "labels": series.labels,
                "datasets": [{
                    "label": self.label,
                    "data": series.values,
                    "backgroundColor": self.background_color,
                    "borderColor": self.border_color,
                    "borderWidth": 1,
                    "fill": true,
                }],
            },
            "options": {
                "responsive": true,
                "scales": {
                    "y": {
                        "beginAtZero": false,
                        "suggestedMin": self.suggested_min,
                        "suggestedMax": self.suggested_max,
                    },
                },
            },
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartView {
    pub canvas_id: &'static str,
    pub config: Value,
}

#[derive(Debug, Clone)]
pub struct RenderedChart {
    pub spec: ChartSpec,
    pub series: ChartSeries,
}

impl RenderedChart {
    pub fn view(&self) -> ChartView {
        ChartView {
            canvas_id: self.spec.canvas_id,
            config: self.spec.to_chart_config(&self.series),
        }
    }
}

/// The TDS and pH charts, generated once when the dashboard starts.
#[derive(Debug, Clone)]
pub struct WaterQualityCharts {
    pub tds: RenderedChart,
    pub ph: RenderedChart,
}

impl WaterQualityCharts {
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        now: NaiveDateTime,
        settings: &ChartSettings,
    ) -> Self {
        let labels = generate_labels(now, settings.points, settings.interval);
        let tds = ChartSpec::tds(settings.tds);
        let ph = ChartSpec::ph(settings.ph);
        WaterQualityCharts {
            tds: RenderedChart {
                series: ChartSeries {
                    labels: labels.clone(),
                    values: generate_samples(rng, &tds.range, settings.points),
                },
                spec: tds,
            },
            ph: RenderedChart {
                series: ChartSeries {
                    labels,
                    values: generate_samples(rng, &ph.range, settings.points),
                },
                spec: ph,
            },
        }
    }

    pub fn views(&self) -> Vec<ChartView> {
        vec![self.tds.view(), self.ph.view()]
    }
}

/// `count` time-of-day labels, oldest first, the last one at `end`.
pub fn generate_labels(end: NaiveDateTime, count: usize, step: Duration) -> Vec<String> {
    let mut labels: Vec<String> = iter::successors(Some(end), |at| at.checked_sub_signed(step))
        .take(count)
        .map(|at| at.format(LABEL_FORMAT).to_string())
        .collect();
    labels.reverse();
    labels
}

pub fn generate_samples<R: Rng + ?Sized>(
    rng: &mut R,
    range: &SampleRange,
    count: usize,
) -> Vec<f64> {
    (0..count).map(|_| sample(rng, range)).collect()
}

/// Ranges that fail [`SampleRange::check`] fall back to their lower bound.
fn sample<R: Rng + ?Sized>(rng: &mut R, range: &SampleRange) -> f64 {
    match range.scaled_bounds() {
        Some((low, high)) => rng.random_range(low..=high) as f64 / range.factor(),
        None => range.min,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 17)
            .unwrap()
            .and_hms_opt(12, 5, 30)
            .unwrap()
    }

    #[test]
    fn test_labels_are_one_minute_apart() {
        let labels = generate_labels(noon(), 10, Duration::minutes(1));
        assert_eq!(labels.len(), 10);
        assert_eq!(labels.first().unwrap(), "11:56");
        assert_eq!(labels.last().unwrap(), "12:05");

        let times: Vec<NaiveTime> = labels
            .iter()
            .map(|l| NaiveTime::parse_from_str(l, LABEL_FORMAT).unwrap())
            .collect();
        for pair in times.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::minutes(1));
        }
    }

    #[test]
    fn test_tds_samples_are_integers_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let settings = ChartSettings::default();
        let samples = generate_samples(&mut rng, &settings.tds, 500);
        assert!(samples.iter().all(|v| (300.0..=400.0).contains(v)));
        assert!(samples.iter().all(|v| v.fract() == 0.0));
    }

    #[test]
    fn test_ph_samples_are_fractional_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        let settings = ChartSettings::default();
        let samples = generate_samples(&mut rng, &settings.ph, 500);
        assert!(samples.iter().all(|v| (6.0..=8.0).contains(v)));
        assert!(samples.iter().any(|v| v.fract() != 0.0));
        assert!(samples.iter().all(|v| ((v * 10.0).round() - v * 10.0).abs() < 1e-9));
    }

    #[test]
    fn test_range_without_representable_sample_is_rejected() {
        let narrow = SampleRange {
            min: 300.2,
            max: 300.8,
            kind: SampleKind::Integer,
        };
        assert!(narrow.check().unwrap_err().contains("whole-number"));

        let ph = SampleRange {
            min: 6.01,
            max: 6.09,
            kind: SampleKind::Decimal { places: 1 },
        };
        assert!(ph.check().is_err());
        assert!(SampleRange { max: 6.2, ..ph }.check().is_ok());

        let nan = SampleRange {
            min: f64::NAN,
            ..ChartSettings::default().tds
        };
        assert!(nan.check().is_err());
    }

    #[test]
    fn test_sampling_an_empty_range_does_not_panic() {
        let mut rng = StdRng::seed_from_u64(5);
        let narrow = SampleRange {
            min: 300.2,
            max: 300.8,
            kind: SampleKind::Integer,
        };
        assert_eq!(generate_samples(&mut rng, &narrow, 3), vec![300.2; 3]);
    }

    #[test]
    fn test_generated_charts_share_labels() {
        let mut rng = StdRng::seed_from_u64(3);
        let charts = WaterQualityCharts::generate(&mut rng, noon(), &ChartSettings::default());
        assert_eq!(charts.tds.series.labels, charts.ph.series.labels);
        assert_eq!(charts.tds.series.values.len(), 10);
        assert_eq!(charts.ph.series.values.len(), 10);
    }

    #[test]
    fn test_chart_config_shape() {
        let series = ChartSeries {
            labels: vec!["12:00".to_string()],
            values: vec![350.0],
        };
        let config = ChartSpec::tds(ChartSettings::default().tds).to_chart_config(&series);

        assert_eq!(config["type"], "line");
        assert_eq!(config["data"]["labels"][0], "12:00");
        assert_eq!(config["data"]["datasets"][0]["label"], "TDS (ppm)");
        assert_eq!(config["data"]["datasets"][0]["data"][0], 350.0);
        assert_eq!(config["data"]["datasets"][0]["fill"], true);
        assert_eq!(config["options"]["scales"]["y"]["suggestedMin"], 200.0);
        assert_eq!(config["options"]["scales"]["y"]["beginAtZero"], false);
    }
}
