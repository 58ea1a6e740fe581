use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;

use super::*;
use crate::config::FALLBACK_CENTER;
use crate::models::Status;
use crate::store::{MemoryStore, STORAGE_KEY};

/// Calls recorded by the fake widget
#[derive(Debug, Clone, PartialEq)]
enum Call {
    CreateMap(LatLng, u8),
    TileLayer(String),
    OnClick,
    AddMarker(usize, LatLng, MarkerStyle),
    RemoveMarker(usize),
    ShowPopup(LatLng),
    ClosePopup,
}

#[derive(Default)]
struct FakeMap {
    calls: Vec<Call>,
    next_handle: usize,
    /// Popups of the markers currently on the map, by handle
    live: Vec<(usize, Popup)>,
    open_popup: Option<Popup>,
}

impl FakeMap {
    fn live_popups(&self) -> Vec<&Popup> {
        self.live.iter().map(|(_, popup)| popup).collect()
    }
}

impl MapWidget for FakeMap {
    type Marker = usize;

    fn create_map(&mut self, center: LatLng, zoom: u8) -> Result<()> {
        self.calls.push(Call::CreateMap(center, zoom));
        Ok(())
    }

    fn add_tile_layer(&mut self, url: &str, _options: &TileLayerOptions) -> Result<()> {
        self.calls.push(Call::TileLayer(url.to_string()));
        Ok(())
    }

    fn on_click(&mut self, _sink: EventSink) -> Result<()> {
        self.calls.push(Call::OnClick);
        Ok(())
    }

    fn add_point_marker(
        &mut self,
        position: LatLng,
        style: MarkerStyle,
        popup: Popup,
    ) -> Result<usize> {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.calls.push(Call::AddMarker(handle, position, style));
        self.live.push((handle, popup));
        Ok(handle)
    }

    fn remove_marker(&mut self, marker: usize) {
        self.calls.push(Call::RemoveMarker(marker));
        self.live.retain(|(handle, _)| *handle != marker);
    }

    fn show_popup(&mut self, position: LatLng, content: Popup) -> Result<()> {
        self.calls.push(Call::ShowPopup(position));
        self.open_popup = Some(content);
        Ok(())
    }

    fn close_popup(&mut self) {
        self.calls.push(Call::ClosePopup);
        self.open_popup = None;
    }
}

/// Store whose writes always fail
struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get_item(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn set_item(&mut self, _key: &str, _value: &str) -> Result<()> {
        Err(Error::Storage("quota exceeded".to_string()))
    }
}

/// Answers immediately with a fixed result
struct FixedGeolocator(Option<LatLng>);

impl Geolocator for FixedGeolocator {
    fn locate(&self, sink: EventSink) {
        match self.0 {
            Some(position) => sink(MapEvent::Located(position)),
            None => sink(MapEvent::LocationUnavailable),
        }
    }
}

type Queue = Rc<RefCell<Vec<MapEvent>>>;

fn queue_sink() -> (EventSink, Queue) {
    let queue: Queue = Rc::default();
    let pushed = Rc::clone(&queue);
    let sink: EventSink = Rc::new(move |event| pushed.borrow_mut().push(event));
    (sink, queue)
}

fn controller_with(store: MemoryStore) -> (MapController<FakeMap, MemoryStore>, Queue) {
    let (sink, queue) = queue_sink();
    let controller =
        MapController::new(MapConfig::default(), store, FakeMap::default(), sink).unwrap();
    (controller, queue)
}

/// Feed every queued event to the controller
fn drain(controller: &mut MapController<FakeMap, MemoryStore>, queue: &Queue) {
    loop {
        let next = {
            let mut pending = queue.borrow_mut();
            if pending.is_empty() {
                None
            } else {
                Some(pending.remove(0))
            }
        };
        let Some(event) = next else { break };
        controller.handle(event).unwrap();
    }
}

fn ready_controller() -> (MapController<FakeMap, MemoryStore>, Queue) {
    let (mut controller, queue) = controller_with(MemoryStore::new());
    controller.start(&FixedGeolocator(None));
    drain(&mut controller, &queue);
    (controller, queue)
}

/// Activate the action labelled `label` on the live popup of marker `index`
fn click_action(controller: &MapController<FakeMap, MemoryStore>, index: usize, label: &str) -> MapEvent {
    let popups = controller.widget().live_popups();
    popups[index]
        .actions
        .iter()
        .find(|action| action.label == label)
        .map(|action| action.event.clone())
        .unwrap()
}

#[test]
fn test_startup_waits_for_location() {
    let (controller, queue) = controller_with(MemoryStore::new());
    assert_eq!(controller.phase(), Phase::AwaitingLocation);
    assert!(controller.widget().calls.is_empty());
    assert!(queue.borrow().is_empty());
}

#[test]
fn test_located_centers_on_user_position() {
    let (mut controller, queue) = controller_with(MemoryStore::new());
    let here = LatLng::new(-22.9068, -43.1729);
    controller.start(&FixedGeolocator(Some(here)));
    drain(&mut controller, &queue);

    assert_eq!(controller.phase(), Phase::Ready);
    assert_eq!(
        controller.widget().calls,
        vec![
            Call::CreateMap(here, 13),
            Call::TileLayer(MapConfig::default().tile_url),
            Call::OnClick,
        ]
    );
}

#[test]
fn test_unavailable_location_uses_fallback() {
    let (controller, _queue) = ready_controller();
    assert_eq!(controller.widget().calls[0], Call::CreateMap(FALLBACK_CENTER, 13));
}

#[test]
fn test_only_first_location_answer_is_honored() {
    let (mut controller, _queue) = ready_controller();
    controller
        .handle(MapEvent::Located(LatLng::new(1.0, 1.0)))
        .unwrap();
    controller.handle(MapEvent::LocationUnavailable).unwrap();

    let creates = controller
        .widget()
        .calls
        .iter()
        .filter(|call| matches!(call, Call::CreateMap(..)))
        .count();
    assert_eq!(creates, 1);
}

#[test]
fn test_clicks_before_ready_are_ignored() {
    let (mut controller, _queue) = controller_with(MemoryStore::new());
    controller
        .handle(MapEvent::Clicked(LatLng::new(0.0, 0.0)))
        .unwrap();
    assert!(controller.widget().calls.is_empty());
}

#[test]
fn test_stored_markers_render_on_startup() {
    let payload = r#"[
        {"lat":-23.5,"lng":-46.6,"gravidade":"high","status":"ativo","upvote":0,"downvote":0,"lastInteraction":"2024-05-01T12:00:00.000Z"},
        {"lat":-23.6,"lng":-46.7,"gravidade":"???","status":"ativo","upvote":0,"downvote":0,"lastInteraction":"2024-05-01T12:00:00.000Z"}
    ]"#;
    let (mut controller, queue) = controller_with(MemoryStore::with_item(STORAGE_KEY, payload));
    controller.start(&FixedGeolocator(None));
    drain(&mut controller, &queue);

    let added: Vec<_> = controller
        .widget()
        .calls
        .iter()
        .filter_map(|call| match call {
            Call::AddMarker(_, _, style) => Some(*style),
            _ => None,
        })
        .collect();
    assert_eq!(
        added,
        vec![
            MarkerStyle { color: "red", radius: 10 },
            MarkerStyle { color: "gray", radius: 5 },
        ]
    );
}

#[test]
fn test_click_then_choose_creates_marker() {
    let (mut controller, queue) = ready_controller();
    let spot = LatLng::new(-23.56, -46.65);

    controller.handle(MapEvent::Clicked(spot)).unwrap();
    let picker = controller.widget().open_popup.clone().unwrap();
    assert_eq!(picker.actions.len(), 3);

    let choose_high = picker
        .actions
        .iter()
        .find(|action| action.label == "high")
        .unwrap()
        .event
        .clone();
    queue.borrow_mut().push(choose_high);
    drain(&mut controller, &queue);

    let markers = controller.registry().list();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].position(), spot);
    assert_eq!(markers[0].severity.tier(), Some(Severity::High));
    assert!(controller.widget().open_popup.is_none());
    assert_eq!(controller.registry().store().inner().writes(), 1);
    assert_eq!(controller.widget().live.len(), 1);
}

#[test]
fn test_votes_rerender_every_marker() {
    let (mut controller, _queue) = ready_controller();
    for severity in [Severity::Low, Severity::High] {
        controller
            .handle(MapEvent::SeverityChosen {
                position: LatLng::new(0.0, 0.0),
                severity,
            })
            .unwrap();
    }
    let before = controller.widget().calls.len();

    let upvote = click_action(&controller, 1, "Upvote");
    controller.handle(upvote).unwrap();

    let calls = &controller.widget().calls[before..];
    let removed = calls
        .iter()
        .filter(|c| matches!(c, Call::RemoveMarker(_)))
        .count();
    let added = calls
        .iter()
        .filter(|c| matches!(c, Call::AddMarker(..)))
        .count();
    assert_eq!((removed, added), (2, 2));
    assert_eq!(controller.widget().live.len(), 2);
    assert_eq!(controller.registry().list()[1].upvotes, 1);
    assert_eq!(
        controller.widget().live_popups()[1].lines[2],
        "Upvotes: 1"
    );
}

#[test]
fn test_two_downvotes_turn_marker_green() {
    let (mut controller, _queue) = ready_controller();
    controller
        .handle(MapEvent::SeverityChosen {
            position: LatLng::new(0.0, 0.0),
            severity: Severity::Medium,
        })
        .unwrap();

    for _ in 0..2 {
        let downvote = click_action(&controller, 0, "Downvote");
        controller.handle(downvote).unwrap();
    }

    let marker = &controller.registry().list()[0];
    assert_eq!(marker.status, Status::Resolved);
    let last_add = controller
        .widget()
        .calls
        .iter()
        .rev()
        .find_map(|call| match call {
            Call::AddMarker(_, _, style) => Some(*style),
            _ => None,
        })
        .unwrap();
    assert_eq!(last_add, MarkerStyle { color: "green", radius: 7 });
}

#[test]
fn test_stale_vote_fails_loudly_without_writing() {
    let (mut controller, _queue) = ready_controller();
    let stale = MarkerId::new();
    let err = controller.handle(MapEvent::Upvote(stale)).unwrap_err();

    assert!(matches!(err, Error::MarkerNotFound(id) if id == stale));
    assert_eq!(controller.registry().store().inner().writes(), 0);
}

#[test]
fn test_invalid_config_is_rejected() {
    let (sink, _queue) = queue_sink();
    let config = MapConfig {
        storage_key: String::new(),
        ..MapConfig::default()
    };
    let result = MapController::new(config, MemoryStore::new(), FakeMap::default(), sink);
    assert!(matches!(result, Err(Error::InvalidInput(_))));
}

#[test]
fn test_click_past_antimeridian_is_wrapped() {
    let (mut controller, queue) = ready_controller();
    controller
        .handle(MapEvent::Clicked(LatLng::new(-23.55, 313.37)))
        .unwrap();

    let picker = controller.widget().open_popup.clone().unwrap();
    let choose = picker.actions[0].event.clone();
    let MapEvent::SeverityChosen { position, .. } = choose else {
        panic!("picker action should choose a severity");
    };
    assert!(position.is_valid());
    assert!((position.lng - -46.63).abs() < 1e-9);

    queue.borrow_mut().push(choose);
    drain(&mut controller, &queue);
    assert_eq!(controller.registry().list()[0].position(), position);
}

#[test]
fn test_failed_write_still_renders_new_marker() {
    let (sink, queue) = queue_sink();
    let mut controller =
        MapController::new(MapConfig::default(), FailingStore, FakeMap::default(), sink).unwrap();
    controller.start(&FixedGeolocator(None));
    let located = queue.borrow_mut().remove(0);
    controller.handle(located).unwrap();

    let spot = LatLng::new(-23.56, -46.65);
    let err = controller
        .handle(MapEvent::SeverityChosen {
            position: spot,
            severity: Severity::High,
        })
        .unwrap_err();

    assert!(matches!(err, Error::Storage(_)));
    assert_eq!(controller.registry().len(), 1);
    assert_eq!(controller.widget().live.len(), 1);
    assert!(controller
        .widget()
        .calls
        .contains(&Call::AddMarker(0, spot, MarkerStyle { color: "red", radius: 10 })));
}
