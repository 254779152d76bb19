use crate::config::Config;
use crate::events::Event;
use crate::geocode::OpenCageGeocoder;
use crate::location::{
    resolve_location, IpPositionSource, PositionOptions, ResolverSettings, RuntimeEnvironment,
};
use crate::models::SERVICES;
use crossterm::event::{KeyCode, KeyEvent};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::debug;

/// Everything the location button needs to do its job, shared with the
/// spawned resolver task.
struct Resolver {
    environment: RuntimeEnvironment,
    positions: IpPositionSource,
    geocoder: OpenCageGeocoder,
    settings: ResolverSettings,
}

pub struct App {
    pub location_text: String,
    pub location_loading: bool,
    pub search_placeholder: String,
    pub selected_service: usize,
    pub tick_count: usize,
    pub should_quit: bool,

    events_tx: UnboundedSender<Event>,
    resolver: Arc<Resolver>,
    resolve_task: Option<JoinHandle<()>>,
}

impl App {
    pub fn new(config: &Config, events_tx: UnboundedSender<Event>) -> Self {
        let resolver = Resolver {
            environment: RuntimeEnvironment::detect(config.location.secure_transport),
            positions: IpPositionSource,
            geocoder: OpenCageGeocoder::new(config.geocoding.api_key.clone()),
            settings: ResolverSettings {
                position: PositionOptions {
                    high_accuracy: config.location.high_accuracy,
                    timeout: Duration::from_secs(config.location.timeout_seconds),
                    maximum_age: Duration::from_secs(config.location.maximum_age_seconds),
                },
                simulated_city: config.location.simulated_city.clone(),
                simulated_delay: Duration::from_millis(1000),
            },
        };

        Self {
            location_text: "Select location".to_string(),
            location_loading: false,
            search_placeholder: String::new(),
            selected_service: 0,
            tick_count: 0,
            should_quit: false,
            events_tx,
            resolver: Arc::new(resolver),
            resolve_task: None,
        }
    }

    pub fn on_tick(&mut self) {
        self.tick_count += 1;
    }

    pub fn on_placeholder_update(&mut self, text: String) {
        self.search_placeholder = text;
    }

    pub fn on_location_update(&mut self, label: String) {
        self.location_text = label;
        self.location_loading = false;
        self.resolve_task = None;
    }

    /// Kicks off a location resolution in the background.
    ///
    /// At most one resolution is in flight at a time; extra requests while
    /// loading are dropped, not queued. The settled label arrives back on the
    /// event channel as [`Event::LocationUpdate`].
    pub fn detect_location(&mut self) {
        if self.location_loading {
            debug!("Location resolution already in flight; ignoring request");
            return;
        }
        self.location_loading = true;

        let resolver = Arc::clone(&self.resolver);
        let tx = self.events_tx.clone();
        self.resolve_task = Some(tokio::spawn(async move {
            let label = resolve_location(
                &resolver.environment,
                &resolver.positions,
                &resolver.geocoder,
                &resolver.settings,
            )
            .await;
            let _ = tx.send(Event::LocationUpdate(label));
        }));
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('d') => self.detect_location(),
            KeyCode::Right | KeyCode::Char('l') => {
                self.selected_service = (self.selected_service + 1) % SERVICES.len();
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.selected_service = self
                    .selected_service
                    .checked_sub(1)
                    .unwrap_or(SERVICES.len() - 1);
            }
            _ => {}
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // An in-flight resolution must not outlive the state it reports to.
        if let Some(task) = self.resolve_task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tokio::sync::mpsc;

    fn test_app() -> (App, mpsc::UnboundedReceiver<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (App::new(&Config::default(), tx), rx)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn detect_while_loading_is_a_no_op() {
        let (mut app, _rx) = test_app();
        app.location_loading = true;
        app.location_text = "Select location".to_string();

        app.detect_location();

        assert!(app.resolve_task.is_none());
        assert_eq!(app.location_text, "Select location");
        assert!(app.location_loading);
    }

    #[tokio::test]
    async fn location_update_settles_the_loading_state() {
        let (mut app, _rx) = test_app();
        app.location_loading = true;

        app.on_location_update("Springfield".to_string());

        assert_eq!(app.location_text, "Springfield");
        assert!(!app.location_loading);
        assert!(app.resolve_task.is_none());
    }

    #[test]
    fn quit_key_sets_the_quit_flag() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = App::new(&Config::default(), tx);
        app.handle_key(press(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn service_selection_wraps_both_ways() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = App::new(&Config::default(), tx);

        app.handle_key(press(KeyCode::Left));
        assert_eq!(app.selected_service, SERVICES.len() - 1);

        app.handle_key(press(KeyCode::Right));
        assert_eq!(app.selected_service, 0);
    }

    #[test]
    fn placeholder_updates_replace_the_frame() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = App::new(&Config::default(), tx);
        app.on_placeholder_update("Massage".to_string());
        assert_eq!(app.search_placeholder, "Massage");
    }
}
