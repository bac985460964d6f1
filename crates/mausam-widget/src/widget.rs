//! Widget state: the city input, loading indicator, error panel and weather display.
//!
//! Events come in as method calls; lookups are handed back to the caller as
//! [`LookupRequest`]s and their results fed in through [`WeatherWidget::apply`].

use mausam_core::{LookupError, LookupPolicy};
use mausam_weather::WeatherReport;

use crate::display::{DisplayFields, Render, WidgetView};

/// Keys the input field reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Other,
}

/// A lookup the caller must run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub city: String,
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The event does not trigger a lookup
    Ignored,
    /// Input was empty; the validation error is showing
    Rejected,
    Lookup(LookupRequest),
}

#[derive(Debug, Default)]
pub struct WeatherWidget {
    policy: LookupPolicy,
    input: String,
    loading: bool,
    error: Option<String>,
    display: Option<DisplayFields>,
    display_visible: bool,
    generation: u64,
    in_flight: usize,
}

impl WeatherWidget {
    pub fn new(policy: LookupPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// New text in the input field. Hides any error; leaves the display alone.
    pub fn input_changed(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.error = None;
    }

    /// The lookup button was pressed
    pub fn trigger(&mut self) -> SubmitOutcome {
        let city = self.input.trim();
        if city.is_empty() {
            self.error = Some(LookupError::EmptyInput.user_message().to_string());
            return SubmitOutcome::Rejected;
        }
        let city = city.to_string();

        self.display_visible = false;
        self.error = None;
        self.loading = true;
        self.generation += 1;
        self.in_flight += 1;

        tracing::debug!("Starting lookup #{} for '{}'", self.generation, city);
        SubmitOutcome::Lookup(LookupRequest {
            city,
            generation: self.generation,
        })
    }

    /// A key was pressed in the input field. Enter acts as the button.
    pub fn key_pressed(&mut self, key: Key) -> SubmitOutcome {
        match key {
            Key::Enter => self.trigger(),
            Key::Other => SubmitOutcome::Ignored,
        }
    }

    /// Feed in the outcome of lookup `generation`. Returns whether it changed the widget.
    pub fn apply(
        &mut self,
        generation: u64,
        result: Result<WeatherReport, LookupError>,
    ) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);

        if self.policy == LookupPolicy::DiscardStale && generation < self.generation {
            tracing::debug!(
                "Discarding lookup #{} superseded by #{}",
                generation,
                self.generation
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(report) => {
                self.display = Some(DisplayFields::from_report(&report));
                self.display_visible = true;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!("Lookup #{} failed: {}", generation, e);
                self.display_visible = false;
                self.error = Some(e.user_message().to_string());
            }
        }
        true
    }

    pub fn view(&self) -> WidgetView<'_> {
        WidgetView {
            loading: self.loading,
            error: self.error.as_deref(),
            display: self.display.as_ref().filter(|_| self.display_visible),
        }
    }

    /// # Errors
    ///
    /// Propagates the renderer's error.
    pub fn render(&self, renderer: &mut dyn Render) -> std::io::Result<()> {
        renderer.render(&self.view())
    }

    /// Lookups issued but not yet applied
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mausam_core::messages;
    use mausam_weather::{select_advisory, CurrentConditions, Location};

    fn report(city: &str, temp: f64) -> WeatherReport {
        let label = mausam_weather::condition_label(2);
        WeatherReport {
            location: Location {
                display_name: city.to_string(),
                country: "Somewhere".to_string(),
                latitude: 1.0,
                longitude: 2.0,
            },
            conditions: CurrentConditions {
                temperature_celsius: temp,
                relative_humidity_percent: 50.0,
                precipitation_probability_percent: Some(5.0),
                weather_code: Some(2),
            },
            condition_label: label.to_string(),
            precipitation_probability: 5.0,
            precipitation_estimated: false,
            advisory: select_advisory(temp, label, 5.0),
            fetched_at: chrono::Utc::now(),
        }
    }

    fn start(widget: &mut WeatherWidget, city: &str) -> LookupRequest {
        widget.input_changed(city);
        match widget.trigger() {
            SubmitOutcome::Lookup(req) => req,
            other => panic!("expected lookup, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input_rejected_without_lookup() {
        for input in ["", "   ", "\t\n"] {
            let mut widget = WeatherWidget::default();
            widget.input_changed(input);
            assert_eq!(widget.trigger(), SubmitOutcome::Rejected);
            assert_eq!(widget.view().error, Some(messages::EMPTY_INPUT));
            assert!(!widget.view().loading);
            assert_eq!(widget.in_flight(), 0);
        }
    }

    #[test]
    fn test_trigger_trims_and_shows_loading() {
        let mut widget = WeatherWidget::default();
        let req = start(&mut widget, "  London  ");
        assert_eq!(req.city, "London");
        assert_eq!(req.generation, 1);
        let view = widget.view();
        assert!(view.loading);
        assert!(view.error.is_none());
        assert!(view.display.is_none());
    }

    #[test]
    fn test_enter_behaves_like_trigger() {
        let mut widget = WeatherWidget::default();
        widget.input_changed("Delhi");
        match widget.key_pressed(Key::Enter) {
            SubmitOutcome::Lookup(req) => assert_eq!(req.city, "Delhi"),
            other => panic!("expected lookup, got {:?}", other),
        }

        let mut empty = WeatherWidget::default();
        assert_eq!(empty.key_pressed(Key::Enter), SubmitOutcome::Rejected);
        assert_eq!(empty.key_pressed(Key::Other), SubmitOutcome::Ignored);
    }

    #[test]
    fn test_success_shows_display() {
        let mut widget = WeatherWidget::default();
        let req = start(&mut widget, "London");
        assert!(widget.apply(req.generation, Ok(report("London", 18.0))));

        let view = widget.view();
        assert!(!view.loading);
        assert!(view.error.is_none());
        let display = view.display.unwrap();
        assert_eq!(display.location, "London, Somewhere");
        assert_eq!(display.temperature, "18°C");
        assert_eq!(display.humidity, "50%");
        assert_eq!(display.precipitation, "5%");
        assert_eq!(widget.in_flight(), 0);
    }

    #[test]
    fn test_failure_hides_display_and_shows_error() {
        let mut widget = WeatherWidget::default();
        let first = start(&mut widget, "London");
        widget.apply(first.generation, Ok(report("London", 18.0)));

        let second = start(&mut widget, "London");
        widget.apply(
            second.generation,
            Err(LookupError::WeatherUnavailable("status 503".into())),
        );

        let view = widget.view();
        assert!(!view.loading);
        assert!(view.display.is_none());
        assert_eq!(view.error, Some(messages::WEATHER_UNAVAILABLE));
    }

    #[test]
    fn test_input_clears_error_but_not_display() {
        let mut widget = WeatherWidget::default();
        let req = start(&mut widget, "London");
        widget.apply(req.generation, Ok(report("London", 18.0)));

        widget.input_changed("");
        widget.trigger();
        assert!(widget.view().error.is_some());
        assert!(widget.view().display.is_some());

        widget.input_changed("P");
        assert!(widget.view().error.is_none());
        assert!(widget.view().display.is_some());
    }

    #[test]
    fn test_last_write_wins_applies_stale_result() {
        let mut widget = WeatherWidget::new(LookupPolicy::LastWriteWins);
        let first = start(&mut widget, "London");
        let second = start(&mut widget, "Paris");

        assert!(widget.apply(second.generation, Ok(report("Paris", 20.0))));
        assert!(widget.apply(first.generation, Ok(report("London", 18.0))));

        assert_eq!(widget.view().display.unwrap().location, "London, Somewhere");
        assert_eq!(widget.in_flight(), 0);
    }

    #[test]
    fn test_discard_stale_drops_older_generation() {
        let mut widget = WeatherWidget::new(LookupPolicy::DiscardStale);
        let first = start(&mut widget, "London");
        let second = start(&mut widget, "Paris");

        assert!(!widget.apply(first.generation, Ok(report("London", 18.0))));
        assert!(widget.view().loading);

        assert!(widget.apply(second.generation, Ok(report("Paris", 20.0))));
        assert_eq!(widget.view().display.unwrap().location, "Paris, Somewhere");
        assert_eq!(widget.in_flight(), 0);
    }

    #[test]
    fn test_render_receives_view() {
        struct Capture(Vec<bool>);
        impl Render for Capture {
            fn render(&mut self, view: &WidgetView<'_>) -> std::io::Result<()> {
                self.0.push(view.loading);
                Ok(())
            }
        }

        let mut widget = WeatherWidget::default();
        let mut capture = Capture(Vec::new());
        widget.render(&mut capture).unwrap();
        start(&mut widget, "London");
        widget.render(&mut capture).unwrap();
        assert_eq!(capture.0, vec![false, true]);
    }
}
