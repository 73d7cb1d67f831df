use crate::conf::MonitorConfig;
use owo_colors::OwoColorize;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RangeConstraint<T> {
    pub min: T,
    pub max: T,
    pub label: &'static str,
    pub units: Option<&'static str>,
}

pub const BUCKET_SIZE_SECONDS: RangeConstraint<i64> = RangeConstraint {
    min: 1,
    max: 24 * 60 * 60,
    label: "bucket_size_seconds",
    units: Some("s"),
};

pub const WINDOW_SIZE_SECONDS: RangeConstraint<i64> = RangeConstraint {
    min: 1,
    max: 7 * 24 * 60 * 60,
    label: "window_size_seconds",
    units: Some("s"),
};

pub const GRACE_SECONDS: RangeConstraint<i64> = RangeConstraint {
    min: 0,
    max: 24 * 60 * 60,
    label: "grace_seconds",
    units: Some("s"),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub field: &'static str,
    pub message: String,
    pub help: Option<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_violations(&self) -> bool {
        !self.errors.is_empty() || !self.warnings.is_empty()
    }

    fn error(&mut self, field: &'static str, message: String, help: Option<String>) {
        self.errors.push(ValidationIssue {
            severity: Severity::Error,
            field,
            message,
            help,
        });
    }

    fn warning(&mut self, field: &'static str, message: String, help: Option<String>) {
        self.warnings.push(ValidationIssue {
            severity: Severity::Warning,
            field,
            message,
            help,
        });
    }

    pub fn render_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn render_plain(&self) -> String {
        let mut out = String::new();
        for issue in self.errors.iter().chain(self.warnings.iter()) {
            let severity = match issue.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };
            out.push_str(&format!("{}: {}: {}\n", issue.field, severity, issue.message));
            if let Some(help) = &issue.help {
                out.push_str(&format!("  help: {help}\n"));
            }
        }
        out
    }

    pub fn render_pretty(&self) -> String {
        let mut out = String::new();

        if self.has_violations() {
            out.push_str(&format!(
                "configuration validation failed ({} errors, {} warnings)\n\n",
                self.errors.len(),
                self.warnings.len()
            ));
        }

        for issue in self.errors.iter().chain(self.warnings.iter()) {
            let label = match issue.severity {
                Severity::Error => "error".red().bold().to_string(),
                Severity::Warning => "warning".yellow().bold().to_string(),
            };
            out.push_str(&format!("  {label}: {}\n", issue.message));
            if let Some(help) = &issue.help {
                out.push_str(&format!("    help: {help}\n"));
            }
        }

        out
    }
}

pub fn validate_range<T>(value: T, constraint: &RangeConstraint<T>, report: &mut ValidationReport)
where
    T: PartialOrd + std::fmt::Display,
{
    if value < constraint.min || value > constraint.max {
        let units = constraint.units.unwrap_or("");
        report.error(
            constraint.label,
            format!(
                "invalid {}: {}{} (must be between {}{} and {}{})",
                constraint.label, value, units, constraint.min, units, constraint.max, units
            ),
            None,
        );
    }
}

/// Collects every violation instead of stopping at the first one.
pub fn validate(cfg: &MonitorConfig) -> ValidationReport {
    let mut report = ValidationReport::default();

    validate_range(cfg.bucket_size_seconds, &BUCKET_SIZE_SECONDS, &mut report);
    validate_range(cfg.window_size_seconds, &WINDOW_SIZE_SECONDS, &mut report);
    validate_range(cfg.grace_seconds, &GRACE_SECONDS, &mut report);

    if !cfg.alert_threshold.is_finite() || cfg.alert_threshold <= 0.0 {
        report.error(
            "alert_threshold",
            format!(
                "invalid alert_threshold: {} (must be a positive number)",
                cfg.alert_threshold
            ),
            None,
        );
    }

    if report.is_valid() {
        if cfg.window_size_seconds < cfg.bucket_size_seconds {
            report.warning(
                "window_size_seconds",
                format!(
                    "window of {}s is narrower than a single {}s bucket",
                    cfg.window_size_seconds, cfg.bucket_size_seconds
                ),
                Some("Alerts can only be evaluated across at least two buckets.".to_string()),
            );
        } else if cfg.window_size_seconds % cfg.bucket_size_seconds != 0 {
            report.warning(
                "window_size_seconds",
                format!(
                    "window of {}s is not a multiple of the {}s bucket size",
                    cfg.window_size_seconds, cfg.bucket_size_seconds
                ),
                Some("The window only fills once it spans a whole number of buckets.".to_string()),
            );
        }
    }

    report
}
