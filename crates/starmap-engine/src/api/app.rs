use chrono::{DateTime, Utc};
use glam::Vec2;

use crate::api::types::{CursorHint, Notice, NoticeKind, SkyEvent};
use crate::assets::builtin::builtin_catalog;
use crate::assets::catalog::{Catalog, Star};
use crate::config::StarmapConfig;
use crate::core::context::SkyContext;
use crate::core::location::{resolve_location, LocationOutcome};
use crate::core::mode::DisplayMode;
use crate::error::{Result, StarmapError};
use crate::history::observation::{records_from_json, Observation, ObservationRecord};
use crate::history::query::HistoryQuery;
use crate::history::store::{HistoryStore, InMemoryHistory};
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::projection::Viewport;
use crate::renderer::sky;
use crate::renderer::traits::DrawSurface;
use crate::systems::filter::{filter_stars, search_results, SearchResult};
use crate::systems::starfield::Starfield;

/// The star map as one unit: catalog, filter, pointer state, display mode,
/// signed-in user and observation history.
///
/// The host pushes [`InputEvent`]s, calls [`update`](Self::update), then
/// redraws when [`needs_redraw`](Self::needs_redraw) says so. Outgoing
/// events and notices are collected until taken.
pub struct StarMapApp<H: HistoryStore = InMemoryHistory> {
    config: StarmapConfig,
    catalog: Catalog,
    search_term: String,
    mode: DisplayMode,
    starfield: Starfield,
    user: Option<String>,
    history: H,
    /// Selections handed to the host and not yet confirmed saved.
    pending: Vec<(Observation, DateTime<Utc>)>,
    events: Vec<SkyEvent>,
    notices: Vec<Notice>,
    dirty: bool,
}

impl StarMapApp<InMemoryHistory> {
    /// Built-in catalog, default viewport, in-memory history.
    pub fn new(config: StarmapConfig) -> Self {
        Self::with_parts(config, builtin_catalog(), InMemoryHistory::new())
    }
}

impl<H: HistoryStore> StarMapApp<H> {
    pub fn with_parts(config: StarmapConfig, catalog: Catalog, history: H) -> Self {
        let starfield = Starfield::from_config(&config);
        let ctx = SkyContext::new(
            catalog.stars.clone(),
            catalog.constellations.clone(),
            Viewport::default(),
        );
        Self {
            config,
            catalog,
            search_term: String::new(),
            mode: DisplayMode::Normal(ctx),
            starfield,
            user: None,
            history,
            pending: Vec::new(),
            events: Vec::new(),
            notices: Vec::new(),
            dirty: true,
        }
    }

    pub fn config(&self) -> &StarmapConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn mode(&self) -> &DisplayMode {
        &self.mode
    }

    pub fn context(&self) -> &SkyContext {
        self.mode.context()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// Replace the catalog. The current search term is re-applied.
    pub fn set_catalog(&mut self, catalog: Catalog) {
        log::info!(
            "catalog loaded: {} stars, {} constellations",
            catalog.stars.len(),
            catalog.constellations.len()
        );
        self.catalog = catalog;
        let ctx = self.mode.context_mut();
        ctx.set_constellations(self.catalog.constellations.clone());
        ctx.set_stars(filter_stars(&self.catalog.stars, &self.search_term));
        self.dirty = true;
    }

    pub fn load_catalog_json(&mut self, json: &str) -> Result<()> {
        let catalog = Catalog::from_json(json)?;
        self.set_catalog(catalog);
        Ok(())
    }

    /// Apply every pending input event. `now` stamps any observation made.
    pub fn update(&mut self, input: &InputQueue, now: DateTime<Utc>) {
        for event in input.iter() {
            self.handle(event, now);
        }
    }

    fn handle(&mut self, event: &InputEvent, now: DateTime<Utc>) {
        match event {
            InputEvent::PointerMove { x, y } => {
                let radius = self.config.hit_radius;
                if let Some(ctx) = self.mode.active_sky_mut() {
                    if ctx.pointer_moved(Vec2::new(*x, *y), radius) {
                        self.dirty = true;
                    }
                }
            }
            InputEvent::Click { x, y } => {
                let radius = self.config.hit_radius;
                let Some(ctx) = self.mode.active_sky_mut() else {
                    return;
                };
                // A click re-tests at its own position so taps without a
                // preceding move still land.
                ctx.pointer_moved(Vec2::new(*x, *y), radius);
                let picked = ctx.commit_hover().cloned();
                self.dirty = true;
                if let Some(star) = picked {
                    self.on_selected(&star, now);
                }
            }
            InputEvent::Resize { width, height, dpr } => {
                let viewport = Viewport::new(*width, *height).with_dpr(*dpr);
                if self.mode.context_mut().set_viewport(viewport) {
                    log::debug!("viewport {}x{} @{}", width, height, viewport.dpr);
                }
                self.dirty = true;
            }
            InputEvent::Search { term } => {
                if *term != self.search_term {
                    self.search_term = term.clone();
                    let shown = filter_stars(&self.catalog.stars, term);
                    log::debug!("search {:?}: {} stars", term, shown.len());
                    self.mode.context_mut().set_stars(shown);
                    self.dirty = true;
                }
            }
            InputEvent::SelectByName { name } => {
                let Some(ctx) = self.mode.active_sky_mut() else {
                    return;
                };
                let picked = ctx.select_by_name(name).cloned();
                match picked {
                    Some(star) => {
                        self.dirty = true;
                        self.on_selected(&star, now);
                    }
                    None => log::warn!("select: {:?} is not in the displayed catalog", name),
                }
            }
            InputEvent::Deselect => {
                self.mode.context_mut().deselect();
                self.dirty = true;
            }
            InputEvent::ToggleAr => {
                self.mode = std::mem::take(&mut self.mode).toggle();
                log::info!("AR mode {}", if self.mode.is_ar() { "on" } else { "off" });
                self.dirty = true;
            }
        }
    }

    fn on_selected(&mut self, star: &Star, now: DateTime<Utc>) {
        log::debug!("selected {}", star.name);
        if self.user.is_none() {
            return;
        }
        let observation = Observation::from(star);
        self.pending.retain(|(o, _)| o.name != observation.name);
        self.pending.push((observation.clone(), now));
        self.events.push(SkyEvent::Selected { observation });
    }

    /// Draw the current mode. Clears the redraw flag.
    pub fn render<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) {
        sky::render(&self.mode, &self.config, &mut self.starfield, surface);
        self.dirty = false;
    }

    pub fn needs_redraw(&self) -> bool {
        self.dirty
    }

    /// Feed the host's geolocation result. Failures fall back to the
    /// configured default and leave an advisory notice.
    pub fn set_location_outcome(&mut self, outcome: &LocationOutcome) {
        let resolved = resolve_location(outcome, self.config.default_location);
        log::info!("observer location {}", resolved.location.readout());
        self.mode.context_mut().set_location(Some(resolved.location));
        if let Some(message) = resolved.advisory {
            self.notices.push(Notice::new(NoticeKind::Advisory, "Location", message));
        }
        self.dirty = true;
    }

    pub fn sign_in(&mut self, user_id: impl Into<String>) {
        let user_id = user_id.into();
        log::info!("signed in as {}", user_id);
        if self.user.as_deref() != Some(user_id.as_str()) {
            self.pending.clear();
        }
        self.user = Some(user_id);
    }

    pub fn sign_out(&mut self) {
        if self.user.take().is_some() {
            log::info!("signed out");
        }
        self.pending.clear();
    }

    /// Outcome of the host persisting a [`SkyEvent::Selected`].
    ///
    /// The local history only gains the row once the host confirms the save;
    /// a failed save drops it.
    pub fn report_save(&mut self, name: &str, outcome: std::result::Result<(), String>) {
        let idx = self.pending.iter().position(|(o, _)| o.name == name);
        let pending = idx.map(|i| self.pending.remove(i));

        let notice = match outcome {
            Ok(()) => {
                match (self.user.as_deref(), pending) {
                    (Some(user), Some((observation, at))) => {
                        if let Err(e) = self.history.insert(user, observation, at) {
                            log::warn!("local history: {}", e);
                        }
                    }
                    _ => log::debug!("save of {} reported with nothing pending", name),
                }
                Notice::new(
                    NoticeKind::Success,
                    "Observation Saved",
                    format!("{} has been added to your observation history", name),
                )
            }
            Err(reason) => {
                log::warn!("saving {} failed: {}", name, reason);
                Notice::new(NoticeKind::Error, "Error", "Failed to save observation")
            }
        };
        self.notices.push(notice);
    }

    /// Replace the signed-in user's local history with rows read back from
    /// the hosted database (a JSON array of records). Returns the row count.
    pub fn load_history_json(&mut self, json: &str) -> Result<usize> {
        let Some(user) = self.user.as_deref() else {
            return Err(StarmapError::History("not signed in".into()));
        };
        let records = records_from_json(json)?;
        Ok(self.history.replace(user, records))
    }

    /// Rows for the search results list, in displayed order.
    pub fn search_results(&self) -> Vec<SearchResult> {
        search_results(self.context().stars())
    }

    pub fn cursor(&self) -> CursorHint {
        match &self.mode {
            DisplayMode::Normal(ctx) if ctx.hover().is_some() => CursorHint::Pointer,
            _ => CursorHint::Default,
        }
    }

    pub fn take_events(&mut self) -> Vec<SkyEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// The signed-in user's history. Empty when signed out.
    pub fn observations(&self, query: &HistoryQuery) -> Vec<ObservationRecord> {
        match self.user.as_deref() {
            Some(user) => self.history.list(user, query),
            None => Vec::new(),
        }
    }

    pub fn delete_observation(&mut self, id: u64) -> Result<()> {
        match self.user.as_deref() {
            Some(user) => self.history.delete(user, id),
            None => Err(StarmapError::History("not signed in".into())),
        }
    }

    /// Returns the number of records removed.
    pub fn clear_observations(&mut self) -> usize {
        match self.user.as_deref() {
            Some(user) => self.history.clear(user),
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::command::{CommandList, DrawCommand};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 1, 21, 0, 0).unwrap()
    }

    fn app() -> StarMapApp {
        StarMapApp::new(StarmapConfig::default())
    }

    fn send(app: &mut StarMapApp, events: Vec<InputEvent>) {
        let mut queue = InputQueue::new();
        for e in events {
            queue.push(e);
        }
        app.update(&queue, now());
        queue.drain();
    }

    #[test]
    fn click_on_sirius_selects_it() {
        let mut app = app();
        send(&mut app, vec![InputEvent::Click { x: 225.0, y: 358.0 }]);
        assert_eq!(app.context().selection().unwrap().name, "Sirius");
        assert_eq!(app.cursor(), CursorHint::Pointer);
    }

    #[test]
    fn click_off_target_selects_nothing() {
        let mut app = app();
        app.sign_in("alice");
        send(&mut app, vec![InputEvent::Click { x: 225.0, y: 340.0 }]);
        assert!(app.context().selection().is_none());
        assert!(app.take_events().is_empty());
    }

    #[test]
    fn signed_in_click_queues_observation() {
        let mut app = app();
        app.sign_in("alice");
        send(&mut app, vec![InputEvent::Click { x: 225.0, y: 358.0 }]);

        let events = app.take_events();
        assert_eq!(events.len(), 1);
        let SkyEvent::Selected { observation } = &events[0];
        assert_eq!(observation.name, "Sirius");
        assert!(app.take_events().is_empty());

        // Nothing is listed until the host confirms the save.
        assert!(app.observations(&HistoryQuery::new()).is_empty());
        app.report_save("Sirius", Ok(()));
        let rows = app.observations(&HistoryQuery::new());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name(), "Sirius");
        assert_eq!(rows[0].observed_at, now());
    }

    #[test]
    fn failed_save_leaves_history_empty() {
        let mut app = app();
        app.sign_in("alice");
        send(&mut app, vec![InputEvent::Click { x: 225.0, y: 358.0 }]);
        assert_eq!(app.take_events().len(), 1);

        app.report_save("Sirius", Err("insert rejected".into()));
        assert!(app.observations(&HistoryQuery::new()).is_empty());
        assert_eq!(app.take_notices()[0].kind, NoticeKind::Error);

        // The dropped selection is not revived by a later success report.
        app.report_save("Sirius", Ok(()));
        assert!(app.observations(&HistoryQuery::new()).is_empty());
    }

    #[test]
    fn sign_out_drops_unconfirmed_selections() {
        let mut app = app();
        app.sign_in("alice");
        send(&mut app, vec![InputEvent::SelectByName { name: "Vega".into() }]);
        app.sign_out();
        app.sign_in("alice");
        app.report_save("Vega", Ok(()));
        assert!(app.observations(&HistoryQuery::new()).is_empty());
    }

    #[test]
    fn hosted_rows_replace_local_history() {
        let mut app = app();
        let hosted = r#"[
            { "id": 12, "user_id": "alice", "name": "Rigel", "type": "star",
              "magnitude": 0.13, "distance": 860, "ra": 78.63, "dec": -8.2,
              "description": "", "observed_at": "2025-01-30T20:00:00Z" },
            { "id": 15, "user_id": "alice", "name": "Vega", "type": "star",
              "magnitude": 0.03, "distance": 25, "ra": 279.23, "dec": 38.78,
              "description": "", "observed_at": "2025-01-31T20:00:00Z" }
        ]"#;
        assert!(matches!(app.load_history_json(hosted), Err(StarmapError::History(_))));

        app.sign_in("alice");
        send(&mut app, vec![InputEvent::SelectByName { name: "Deneb".into() }]);
        app.report_save("Deneb", Ok(()));
        assert_eq!(app.load_history_json(hosted).unwrap(), 2);

        let rows = app.observations(&HistoryQuery::new());
        let names: Vec<&str> = rows.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["Vega", "Rigel"]);
        assert_eq!(rows[0].id, 15);

        app.delete_observation(12).unwrap();
        assert_eq!(app.observations(&HistoryQuery::new()).len(), 1);

        assert!(app.load_history_json("{ nope").is_err());
        assert_eq!(app.observations(&HistoryQuery::new()).len(), 1);
    }

    #[test]
    fn signed_out_click_still_selects_but_queues_nothing() {
        let mut app = app();
        send(&mut app, vec![InputEvent::Click { x: 225.0, y: 358.0 }]);
        assert!(app.context().selection().is_some());
        assert!(app.take_events().is_empty());
        assert!(app.observations(&HistoryQuery::new()).is_empty());
    }

    #[test]
    fn search_narrows_displayed_stars_and_results() {
        let mut app = app();
        send(&mut app, vec![InputEvent::Search { term: "ar".into() }]);
        let names: Vec<String> = app.search_results().into_iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec!["Arcturus", "Achernar", "Hadar", "Aldebaran", "Antares", "Adhara"]
        );

        send(&mut app, vec![InputEvent::Search { term: String::new() }]);
        assert_eq!(app.context().stars().len(), app.catalog().len());
    }

    #[test]
    fn select_from_results_list_behaves_like_click() {
        let mut app = app();
        app.sign_in("alice");
        send(&mut app, vec![InputEvent::SelectByName { name: "Vega".into() }]);
        assert_eq!(app.context().selection().unwrap().name, "Vega");
        assert_eq!(app.take_events().len(), 1);
    }

    #[test]
    fn ar_mode_ignores_pointer_and_draws_placeholder() {
        let mut app = app();
        send(
            &mut app,
            vec![
                InputEvent::ToggleAr,
                InputEvent::Click { x: 225.0, y: 358.0 },
            ],
        );
        assert!(app.mode().is_ar());
        assert!(app.context().selection().is_none());

        let mut surface = CommandList::new();
        app.render(&mut surface);
        let texts: Vec<&str> = surface.texts().collect();
        assert!(texts.contains(&"AR Mode"));
        assert!(!texts.contains(&"Sirius"));

        send(&mut app, vec![InputEvent::ToggleAr]);
        assert!(!app.mode().is_ar());
    }

    #[test]
    fn location_failure_falls_back_with_advisory() {
        let mut app = app();
        app.set_location_outcome(&LocationOutcome::Failed("denied".into()));
        assert_eq!(app.context().location().unwrap().readout(), "40.7°, -74.0°");
        let notices = app.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, NoticeKind::Advisory);
        assert_eq!(notices[0].message, "Unable to get location. Using default view.");
    }

    #[test]
    fn save_outcomes_become_notices() {
        let mut app = app();
        app.report_save("Vega", Ok(()));
        app.report_save("Vega", Err("network".into()));
        let notices = app.take_notices();
        assert_eq!(notices[0].message, "Vega has been added to your observation history");
        assert_eq!(notices[1].kind, NoticeKind::Error);
        assert_eq!(notices[1].message, "Failed to save observation");
    }

    #[test]
    fn render_clears_dirty_and_hover_marks_it() {
        let mut app = app();
        let mut surface = CommandList::new();
        assert!(app.needs_redraw());
        app.render(&mut surface);
        assert!(!app.needs_redraw());
        assert!(matches!(surface.commands()[0], DrawCommand::Clear { .. }));

        send(&mut app, vec![InputEvent::PointerMove { x: 225.0, y: 356.0 }]);
        assert!(app.needs_redraw());
    }

    #[test]
    fn bad_catalog_json_keeps_current_catalog() {
        let mut app = app();
        let before = app.catalog().len();
        assert!(app.load_catalog_json("{ nope").is_err());
        assert_eq!(app.catalog().len(), before);

        app.load_catalog_json(r#"{"stars":[{"name":"Vega","ra":279.23,"dec":38.78,"magnitude":0.03}]}"#)
            .unwrap();
        assert_eq!(app.context().stars().len(), 1);
    }

    #[test]
    fn history_requires_sign_in() {
        let mut app = app();
        assert!(app.delete_observation(1).is_err());
        assert_eq!(app.clear_observations(), 0);

        app.sign_in("alice");
        send(&mut app, vec![InputEvent::SelectByName { name: "Deneb".into() }]);
        app.report_save("Deneb", Ok(()));
        let id = app.observations(&HistoryQuery::new())[0].id;
        app.delete_observation(id).unwrap();
        assert!(app.observations(&HistoryQuery::new()).is_empty());
    }
}
