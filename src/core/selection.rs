//! # Hover Selection
//!
//! The journey screen shows the same set of locations twice: as beacons on
//! the map and as a legend in the info panel. Hovering either one highlights
//! the location in both, so the two views share a single `active_id`.
//!
//! A [`HoverSync`] is either *uncontrolled* (it stores the value itself) or
//! *controlled* (it reads and writes an [`ActiveSelection`] handle owned by
//! its parent). The mode is fixed at construction.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::core::content::Location;

/// The ids a controller accepts, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationSet {
    ids: Vec<String>,
}

impl LocationSet {
    pub fn from_locations(locations: &[Location]) -> Self {
        Self {
            ids: locations.iter().map(|l| l.id.clone()).collect(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|known| known == id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|known| known == id)
    }
}

/// Shared, lifted-up selection. Clones point at the same value.
#[derive(Debug, Clone, Default)]
pub struct ActiveSelection(Rc<RefCell<Option<String>>>);

impl ActiveSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<String> {
        self.0.borrow().clone()
    }

    pub fn set(&self, id: Option<String>) {
        *self.0.borrow_mut() = id;
    }
}

#[derive(Debug)]
enum Binding {
    Internal(Option<String>),
    External(ActiveSelection),
}

#[derive(Debug)]
pub struct HoverSync {
    locations: LocationSet,
    binding: Binding,
}

impl HoverSync {
    /// A controller that owns its selection.
    pub fn uncontrolled(locations: LocationSet) -> Self {
        Self {
            locations,
            binding: Binding::Internal(None),
        }
    }

    /// A controller bound to a selection owned elsewhere.
    pub fn controlled(locations: LocationSet, selection: ActiveSelection) -> Self {
        Self {
            locations,
            binding: Binding::External(selection),
        }
    }

    pub fn is_controlled(&self) -> bool {
        matches!(self.binding, Binding::External(_))
    }

    pub fn locations(&self) -> &LocationSet {
        &self.locations
    }

    pub fn active(&self) -> Option<String> {
        match &self.binding {
            Binding::Internal(value) => value.clone(),
            Binding::External(selection) => selection.get(),
        }
    }

    /// Sets or clears the active location. Last write wins.
    ///
    /// Unknown ids are rejected and leave the selection unchanged. Returns
    /// `true` only if the selection actually changed.
    pub fn set_active(&mut self, id: Option<&str>) -> bool {
        if let Some(id) = id {
            if !self.locations.contains(id) {
                debug!("Ignoring hover on unknown location '{}'", id);
                return false;
            }
        }
        if self.active().as_deref() == id {
            return false;
        }

        let value = id.map(str::to_string);
        debug!("Active location -> {:?}", value);
        match &mut self.binding {
            Binding::Internal(current) => *current = value,
            Binding::External(selection) => selection.set(value),
        }
        true
    }

    /// Moves to the next location, wrapping. Starts at the first one.
    pub fn select_next(&mut self) -> bool {
        let len = self.locations.ids.len();
        if len == 0 {
            return false;
        }
        let next = match self.active().and_then(|id| self.locations.position(&id)) {
            Some(i) => (i + 1) % len,
            None => 0,
        };
        let id = self.locations.ids[next].clone();
        self.set_active(Some(&id))
    }

    /// Moves to the previous location, wrapping. Starts at the last one.
    pub fn select_prev(&mut self) -> bool {
        let len = self.locations.ids.len();
        if len == 0 {
            return false;
        }
        let prev = match self.active().and_then(|id| self.locations.position(&id)) {
            Some(i) => (i + len - 1) % len,
            None => len - 1,
        };
        let id = self.locations.ids[prev].clone();
        self.set_active(Some(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::PortfolioContent;

    fn set() -> LocationSet {
        LocationSet::from_locations(&PortfolioContent::default().locations)
    }

    #[test]
    fn test_uncontrolled_starts_empty() {
        let hover = HoverSync::uncontrolled(set());
        assert_eq!(hover.active(), None);
        assert!(!hover.is_controlled());
    }

    #[test]
    fn test_set_and_clear() {
        let mut hover = HoverSync::uncontrolled(set());
        assert!(hover.set_active(Some("canada")));
        assert_eq!(hover.active().as_deref(), Some("canada"));
        assert!(hover.set_active(None));
        assert_eq!(hover.active(), None);
    }

    #[test]
    fn test_same_id_twice_is_noop() {
        let mut hover = HoverSync::uncontrolled(set());
        assert!(hover.set_active(Some("china")));
        assert!(!hover.set_active(Some("china")));
        assert_eq!(hover.active().as_deref(), Some("china"));
    }

    #[test]
    fn test_unknown_id_rejected() {
        let mut hover = HoverSync::uncontrolled(set());
        hover.set_active(Some("australia"));
        assert!(!hover.set_active(Some("atlantis")));
        assert_eq!(hover.active().as_deref(), Some("australia"));
    }

    #[test]
    fn test_last_write_wins() {
        let mut hover = HoverSync::uncontrolled(set());
        hover.set_active(Some("china"));
        hover.set_active(Some("canada"));
        hover.set_active(Some("australia"));
        assert_eq!(hover.active().as_deref(), Some("australia"));
    }

    #[test]
    fn test_controlled_consumers_share_value() {
        let selection = ActiveSelection::new();
        let mut map = HoverSync::controlled(set(), selection.clone());
        let mut legend = HoverSync::controlled(set(), selection.clone());
        assert!(map.is_controlled());

        map.set_active(Some("canada"));
        assert_eq!(legend.active().as_deref(), Some("canada"));

        legend.set_active(Some("china"));
        assert_eq!(map.active().as_deref(), Some("china"));
        assert_eq!(selection.get().as_deref(), Some("china"));
    }

    #[test]
    fn test_controlled_reflects_external_writes() {
        let selection = ActiveSelection::new();
        let hover = HoverSync::controlled(set(), selection.clone());
        selection.set(Some("australia".into()));
        assert_eq!(hover.active().as_deref(), Some("australia"));
    }

    #[test]
    fn test_select_next_wraps() {
        let mut hover = HoverSync::uncontrolled(set());
        hover.select_next();
        assert_eq!(hover.active().as_deref(), Some("china"));
        hover.select_next();
        hover.select_next();
        assert_eq!(hover.active().as_deref(), Some("australia"));
        hover.select_next();
        assert_eq!(hover.active().as_deref(), Some("china"));
    }

    #[test]
    fn test_select_prev_wraps() {
        let mut hover = HoverSync::uncontrolled(set());
        hover.select_prev();
        assert_eq!(hover.active().as_deref(), Some("australia"));
        hover.select_prev();
        assert_eq!(hover.active().as_deref(), Some("canada"));
    }

    #[test]
    fn test_empty_set_navigation_is_noop() {
        let mut hover = HoverSync::uncontrolled(LocationSet::from_locations(&[]));
        assert!(!hover.select_next());
        assert!(!hover.select_prev());
        assert_eq!(hover.active(), None);
    }
}
