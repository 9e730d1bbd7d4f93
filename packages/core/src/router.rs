//! Navigation router: keeps the reading position, the sidebar, and the URL
//! fragment in step.
//!
//! The router's only observable state is the current [`ReaderState`], an
//! immutable snapshot of (document, position). Each transition replaces the
//! snapshot. It never mutates one in place. UI bindings register once through
//! [`NavigationRouter::subscribe`] and are told about every published change.
//!
//! Transitions:
//!
//! | Trigger | Method | Cause |
//! |---------|--------|-------|
//! | document finished loading | [`load`](NavigationRouter::load) | [`PositionChangeCause::Load`] |
//! | location fragment changed | [`fragment_changed`](NavigationRouter::fragment_changed) | [`PositionChangeCause::Fragment`] |
//! | user picked a section | [`navigate`](NavigationRouter::navigate) | [`PositionChangeCause::Navigate`] |

use std::fmt;
use std::sync::Arc;

use crate::fragment::{route_from_fragment, section_fragment};
use crate::locate::NavigationPosition;
use crate::types::{BookDocument, Chapter, Section};

/// What is being read right now.
#[derive(Debug, Clone, PartialEq)]
pub struct ReaderState {
    document: Arc<BookDocument>,
    position: NavigationPosition,
}

impl ReaderState {
    /// Returns `None` if `position` does not exist in `document`.
    pub fn new(document: Arc<BookDocument>, position: NavigationPosition) -> Option<Self> {
        position.is_valid_in(&document).then_some(Self { document, position })
    }

    pub fn document(&self) -> &Arc<BookDocument> {
        &self.document
    }

    pub fn position(&self) -> NavigationPosition {
        self.position
    }

    pub fn chapter(&self) -> &Chapter {
        &self.document.chapters[self.position.chapter_index]
    }

    pub fn section(&self) -> &Section {
        &self.chapter().sections[self.position.section_index]
    }

    /// The deep link for the current section (no leading `#`), or `None` if
    /// the document or the section has no id to address it by.
    pub fn fragment(&self) -> Option<String> {
        let section_id = self.section().id.as_deref()?;
        section_fragment(&self.document, section_id)
    }
}

/// Why the position changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionChangeCause {
    Load,
    Fragment,
    Navigate,
}

/// Handle returned by [`NavigationRouter::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&ReaderState, PositionChangeCause)>;

/// Router state machine. Single-threaded: listeners are plain `FnMut`
/// closures invoked synchronously on the caller's thread.
#[derive(Default)]
pub struct NavigationRouter {
    document: Option<Arc<BookDocument>>,
    state: Option<Arc<ReaderState>>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl fmt::Debug for NavigationRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationRouter")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl NavigationRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The document routes are resolved against.
    pub fn document(&self) -> Option<&Arc<BookDocument>> {
        self.document.as_ref()
    }

    /// The current snapshot. `None` until a document with at least one
    /// reachable section has been loaded.
    pub fn state(&self) -> Option<&Arc<ReaderState>> {
        self.state.as_ref()
    }

    pub fn position(&self) -> Option<NavigationPosition> {
        self.state.as_ref().map(|s| s.position)
    }

    /// Register a listener for every future position change.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&ReaderState, PositionChangeCause) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `true` if the listener was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(l, _)| *l != id);
        self.listeners.len() != before
    }

    /// Install a freshly loaded document and resolve the position from
    /// `fragment` (the location fragment current at load time).
    ///
    /// Always publishes when the resolved position exists, even if it equals
    /// the previous one: the document itself changed.
    pub fn load(
        &mut self,
        document: Arc<BookDocument>,
        fragment: &str,
    ) -> Option<NavigationPosition> {
        let position = route_from_fragment(fragment, &document);
        self.document = Some(Arc::clone(&document));
        // Whatever was showing belonged to the previous document.
        self.state = None;
        self.publish(document, position, PositionChangeCause::Load)
    }

    /// Re-resolve after an external fragment change.
    ///
    /// Does nothing before a document is loaded. A fragment that resolves to
    /// the position already shown is a no-op, which is what makes the
    /// write-fragment-then-hear-it-back cycle of [`navigate`](Self::navigate)
    /// idempotent.
    pub fn fragment_changed(&mut self, fragment: &str) -> Option<NavigationPosition> {
        let document = Arc::clone(self.document.as_ref()?);
        let position = route_from_fragment(fragment, &document);
        if self.position() == Some(position) {
            return Some(position);
        }
        self.publish(document, position, PositionChangeCause::Fragment)
    }

    /// Move to `position` on an explicit in-app request.
    ///
    /// Returns the fragment the host should write to the location (without
    /// the leading `#`). Returns `None` when there is nothing to write: no
    /// document is loaded, the position does not exist, or the target has no
    /// addressable id.
    pub fn navigate(&mut self, position: NavigationPosition) -> Option<String> {
        let document = Arc::clone(self.document.as_ref()?);
        self.publish(document, position, PositionChangeCause::Navigate)?;
        self.state.as_ref().and_then(|s| s.fragment())
    }

    fn publish(
        &mut self,
        document: Arc<BookDocument>,
        position: NavigationPosition,
        cause: PositionChangeCause,
    ) -> Option<NavigationPosition> {
        let Some(state) = ReaderState::new(document, position) else {
            tracing::debug!(?position, ?cause, "position not present in document, ignoring");
            return None;
        };
        let state = Arc::new(state);
        self.state = Some(Arc::clone(&state));

        tracing::debug!(
            chapter = position.chapter_index,
            section = position.section_index,
            ?cause,
            "position changed"
        );
        for (_, listener) in self.listeners.iter_mut() {
            listener(&state, cause);
        }
        Some(position)
    }
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn doc() -> Arc<BookDocument> {
        Arc::new(
            BookDocument::from_json(
                r#"{
                    "book": { "book_id": "b1" },
                    "chapters": [
                        { "chapter_id": "c1", "sections": [ {"section_id": "s1"}, {"section_id": "s2"} ] },
                        { "chapter_id": "c2", "sections": [ {"section_id": "s3"} ] }
                    ]
                }"#,
            )
            .unwrap(),
        )
    }

    type Log = Rc<RefCell<Vec<(NavigationPosition, PositionChangeCause)>>>;

    fn recording_router() -> (NavigationRouter, Log) {
        let log: Log = Rc::default();
        let mut router = NavigationRouter::new();
        let sink = Rc::clone(&log);
        router.subscribe(move |state, cause| sink.borrow_mut().push((state.position(), cause)));
        (router, log)
    }

    #[test]
    fn load_resolves_from_fragment() {
        let (mut router, log) = recording_router();
        assert_eq!(router.load(doc(), "#book$b1$s3"), Some(NavigationPosition::new(1, 0)));
        assert_eq!(router.state().unwrap().section().id.as_deref(), Some("s3"));
        assert_eq!(
            *log.borrow(),
            vec![(NavigationPosition::new(1, 0), PositionChangeCause::Load)]
        );
    }

    #[test]
    fn load_defaults_to_first_section() {
        let (mut router, _) = recording_router();
        assert_eq!(router.load(doc(), ""), Some(NavigationPosition::default()));
        assert_eq!(router.load(doc(), "#book$other$s3"), Some(NavigationPosition::default()));
    }

    #[test]
    fn empty_document_publishes_nothing() {
        let (mut router, log) = recording_router();
        assert_eq!(router.load(Arc::new(BookDocument::default()), ""), None);
        assert!(router.state().is_none());
        assert!(router.document().is_some());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn fragment_before_load_is_ignored() {
        let (mut router, log) = recording_router();
        assert_eq!(router.fragment_changed("#book$b1$s2"), None);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn fragment_change_re_resolves() {
        let (mut router, log) = recording_router();
        router.load(doc(), "");
        assert_eq!(router.fragment_changed("#book$b1$s2"), Some(NavigationPosition::new(0, 1)));
        assert_eq!(router.fragment_changed("#garbage"), Some(NavigationPosition::default()));
        let causes: Vec<_> = log.borrow().iter().map(|(_, c)| *c).collect();
        assert_eq!(
            causes,
            vec![
                PositionChangeCause::Load,
                PositionChangeCause::Fragment,
                PositionChangeCause::Fragment
            ]
        );
    }

    #[test]
    fn navigate_round_trips_through_fragment() {
        let (mut router, log) = recording_router();
        router.load(doc(), "");
        let fragment = router.navigate(NavigationPosition::new(1, 0)).unwrap();
        assert_eq!(fragment, "book$b1$s3");

        // The host writes the fragment; the change notification comes back.
        assert_eq!(
            router.fragment_changed(&format!("#{fragment}")),
            Some(NavigationPosition::new(1, 0))
        );
        // Load + Navigate only: hearing our own fragment back does not re-publish.
        assert_eq!(log.borrow().len(), 2);
        assert_eq!(log.borrow()[1].1, PositionChangeCause::Navigate);
    }

    #[test]
    fn navigate_to_missing_position_keeps_state() {
        let (mut router, log) = recording_router();
        router.load(doc(), "#book$b1$s2");
        assert_eq!(router.navigate(NavigationPosition::new(5, 0)), None);
        assert_eq!(router.position(), Some(NavigationPosition::new(0, 1)));
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let (mut router, log) = recording_router();
        let count = Rc::new(RefCell::new(0));
        let c = Rc::clone(&count);
        let id = router.subscribe(move |_, _| *c.borrow_mut() += 1);
        router.load(doc(), "");
        assert!(router.unsubscribe(id));
        assert!(!router.unsubscribe(id));
        router.navigate(NavigationPosition::new(0, 1));
        assert_eq!(*count.borrow(), 1);
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn snapshots_are_replaced_not_mutated() {
        let (mut router, _) = recording_router();
        router.load(doc(), "");
        let before = Arc::clone(router.state().unwrap());
        router.navigate(NavigationPosition::new(0, 1));
        assert_eq!(before.position(), NavigationPosition::default());
        assert_eq!(router.position(), Some(NavigationPosition::new(0, 1)));
    }
}
