//! Display fields and the render interface.

use mausam_weather::WeatherReport;

/// The six strings shown after a successful lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFields {
    pub location: String,
    pub temperature: String,
    pub humidity: String,
    pub precipitation: String,
    pub condition: String,
    pub advisory: String,
}

impl DisplayFields {
    pub fn from_report(report: &WeatherReport) -> Self {
        Self {
            location: report.location.label(),
            temperature: format!("{}°C", format_value(report.conditions.temperature_celsius)),
            humidity: format!("{}%", format_value(report.conditions.relative_humidity_percent)),
            precipitation: format!("{}%", format_value(report.precipitation_probability)),
            condition: report.condition_label.clone(),
            advisory: report.advisory.text().to_string(),
        }
    }
}

/// Render a number the way the upstream JSON wrote it: `18` not `18.0`.
pub fn format_value(value: f64) -> String {
    // -0 prints as "-0"
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

/// What a renderer sees. Hidden panels are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetView<'a> {
    pub loading: bool,
    pub error: Option<&'a str>,
    pub display: Option<&'a DisplayFields>,
}

/// Presentation binding for the widget
pub trait Render {
    /// # Errors
    ///
    /// Whatever the output sink reports.
    fn render(&mut self, view: &WidgetView<'_>) -> std::io::Result<()>;
}
