//! Ordered list of calendar events.
//!
//! Events are kept in insertion order. Nodes live in an arena and are linked
//! forward by slot index, so appending is O(1) and an [`EventId`] handed out
//! on insert stays valid until that event is deleted. Freed slots are reused;
//! each slot carries a generation so an old handle never matches the event
//! that replaced it.
//!
//! Traversal uses an explicit cursor: call [`EventList::reset_position`],
//! then [`EventList::next`] until it returns `None`.

use crate::event::Event;

/// Stable handle to an event stored in an [`EventList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventId {
    slot: usize,
    generation: u64,
}

#[derive(Debug)]
struct Node {
    event: Event,
    next: Option<usize>,
}

#[derive(Debug)]
struct Slot {
    generation: u64,
    node: Option<Node>,
}

/// An insertion-ordered list that owns its events.
#[derive(Debug, Default)]
pub struct EventList {
    slots: Vec<Slot>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    current: Option<usize>,
    len: usize,
}

impl EventList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Append an event to the end of the list.
    ///
    /// Returns `None` without touching the list when there is no event, or
    /// when storage for a new node cannot be allocated.
    pub fn insert_last(&mut self, event: Option<Event>) -> Option<EventId> {
        let event = event?;

        let slot = match self.free.pop() {
            Some(slot) => slot,
            None => {
                self.slots.try_reserve(1).ok()?;
                self.slots.push(Slot {
                    generation: 0,
                    node: None,
                });
                self.slots.len() - 1
            }
        };

        let entry = &mut self.slots[slot];
        entry.node = Some(Node { event, next: None });
        let id = EventId {
            slot,
            generation: entry.generation,
        };

        match self.tail {
            Some(tail) => {
                if let Some(node) = self.slots[tail].node.as_mut() {
                    node.next = Some(slot);
                }
            }
            None => self.head = Some(slot),
        }
        self.tail = Some(slot);
        self.len += 1;

        Some(id)
    }

    /// Append an event. See [`EventList::insert_last`].
    pub fn push(&mut self, event: Event) -> Option<EventId> {
        self.insert_last(Some(event))
    }

    /// Point the cursor at the first event.
    pub fn reset_position(&mut self) {
        self.current = self.head;
    }

    /// Return the event under the cursor and move the cursor forward.
    ///
    /// Keeps returning `None` once the end has been reached.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<(EventId, &Event)> {
        let slot = self.current?;
        let entry = &self.slots[slot];
        let node = entry.node.as_ref()?;

        self.current = node.next;

        Some((
            EventId {
                slot,
                generation: entry.generation,
            },
            &node.event,
        ))
    }

    /// Find the first event whose name is exactly `name`.
    ///
    /// This walks the list with the cursor: afterwards the cursor sits just
    /// past the match, or at the end if nothing matched.
    pub fn find(&mut self, name: &str) -> Option<(EventId, &Event)> {
        self.reset_position();

        let mut found = None;
        while let Some((id, event)) = self.next() {
            if event.name() == name {
                found = Some(id);
                break;
            }
        }

        let id = found?;
        self.get(id).map(|event| (id, event))
    }

    /// All events whose name contains `needle`, ignoring case.
    /// Does not move the cursor.
    pub fn find_all(&self, needle: &str) -> Vec<(EventId, &Event)> {
        let needle = needle.to_lowercase();
        self.iter()
            .filter(|(_, event)| event.name().to_lowercase().contains(&needle))
            .collect()
    }

    /// Remove the event with the given handle and drop it.
    ///
    /// Returns false, leaving the list untouched, if no such event is in
    /// the list.
    pub fn delete(&mut self, id: EventId) -> bool {
        let mut previous: Option<usize> = None;
        let mut cursor = self.head;

        while let Some(slot) = cursor {
            let next = self.slots[slot].node.as_ref().and_then(|n| n.next);

            if slot == id.slot && self.slots[slot].generation == id.generation {
                match previous {
                    Some(prev) => {
                        if let Some(node) = self.slots[prev].node.as_mut() {
                            node.next = next;
                        }
                    }
                    None => self.head = next,
                }
                if self.tail == Some(slot) {
                    self.tail = previous;
                }
                if self.current == Some(slot) {
                    self.current = next;
                }

                let entry = &mut self.slots[slot];
                entry.node = None;
                entry.generation += 1;
                self.free.push(slot);
                self.len -= 1;

                return true;
            }

            previous = Some(slot);
            cursor = next;
        }

        false
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.slots
            .get(id.slot)
            .filter(|entry| entry.generation == id.generation)
            .and_then(|entry| entry.node.as_ref())
            .map(|node| &node.event)
    }

    /// Mutable access, for editing an event in place.
    pub fn get_mut(&mut self, id: EventId) -> Option<&mut Event> {
        self.slots
            .get_mut(id.slot)
            .filter(|entry| entry.generation == id.generation)
            .and_then(|entry| entry.node.as_mut())
            .map(|node| &mut node.event)
    }

    pub fn head_id(&self) -> Option<EventId> {
        self.head.map(|slot| self.id_at(slot))
    }

    pub fn tail_id(&self) -> Option<EventId> {
        self.tail.map(|slot| self.id_at(slot))
    }

    /// Where the cursor currently points. `None` before a reset on a fresh
    /// list, and after the cursor has run off the end.
    pub fn current_id(&self) -> Option<EventId> {
        self.current.map(|slot| self.id_at(slot))
    }

    /// Iterate in list order without touching the cursor.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            next: self.head,
        }
    }

    fn id_at(&self, slot: usize) -> EventId {
        EventId {
            slot,
            generation: self.slots[slot].generation,
        }
    }
}

/// Borrowing iterator over an [`EventList`], see [`EventList::iter`].
pub struct Iter<'a> {
    list: &'a EventList,
    next: Option<usize>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (EventId, &'a Event);

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.next?;
        let entry = &self.list.slots[slot];
        let node = entry.node.as_ref()?;
        self.next = node.next;

        Some((
            EventId {
                slot,
                generation: entry.generation,
            },
            &node.event,
        ))
    }
}

impl<'a> IntoIterator for &'a EventList {
    type Item = (EventId, &'a Event);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Separator placed between events by [`event_list_string`].
pub const RECORD_SEPARATOR: &str = "\n\n";

/// Render every event's display string, in order, separated by a blank line.
pub fn event_list_string(list: &EventList) -> String {
    list.iter()
        .map(|(_, event)| event.display_string())
        .collect::<Vec<_>>()
        .join(RECORD_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(date: &str, name: &str) -> Event {
        Event::new(date, "06:15", 10, name, None).unwrap()
    }

    fn names(list: &EventList) -> Vec<String> {
        list.iter().map(|(_, e)| e.name().to_string()).collect()
    }

    /// Four events, returning the list and their ids in order.
    fn four_events() -> (EventList, Vec<EventId>) {
        let mut list = EventList::new();
        let ids = ["Event 1", "Event 2", "Event 3", "Event 4"]
            .iter()
            .map(|name| list.push(event("2010-05-24", name)).unwrap())
            .collect();
        (list, ids)
    }

    #[test]
    fn test_create_list() {
        let list = EventList::new();

        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.head_id(), None);
        assert_eq!(list.tail_id(), None);
        assert_eq!(list.current_id(), None);
    }

    #[test]
    fn test_insert_single() {
        let mut list = EventList::new();
        let id = list.push(event("2010-05-24", "Event 1")).unwrap();

        assert_eq!(list.head_id(), Some(id));
        assert_eq!(list.tail_id(), Some(id));
        assert_eq!(list.current_id(), None);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_insert_multiple_keeps_order() {
        let mut list = EventList::new();
        let one = list.push(event("2010-05-24", "Event 1")).unwrap();
        let two = list.push(event("2011-05-24", "Event 2")).unwrap();
        let three = list.push(event("2012-05-24", "Event 3")).unwrap();

        list.reset_position();
        assert_eq!(list.next().map(|(id, _)| id), Some(one));
        assert_eq!(list.next().map(|(id, _)| id), Some(two));
        assert_eq!(list.next().map(|(id, _)| id), Some(three));
        assert!(list.next().is_none());
        assert!(list.next().is_none());
    }

    #[test]
    fn test_insert_none_does_nothing() {
        let mut list = EventList::new();

        assert_eq!(list.insert_last(None), None);
        assert_eq!(list.head_id(), None);
        assert_eq!(list.tail_id(), None);
        assert!(list.is_empty());
    }

    #[test]
    fn test_cursor_persists_between_calls() {
        let (mut list, ids) = four_events();

        list.reset_position();
        list.next();
        assert_eq!(list.current_id(), Some(ids[1]));

        // A new traversal only starts after an explicit reset.
        assert_eq!(list.next().map(|(id, _)| id), Some(ids[1]));
        list.reset_position();
        assert_eq!(list.next().map(|(id, _)| id), Some(ids[0]));
    }

    #[test]
    fn test_find_by_name() {
        let (mut list, ids) = four_events();

        let (id, found) = list.find("Event 3").unwrap();
        assert_eq!(id, ids[2]);
        assert_eq!(found.name(), "Event 3");
        assert_eq!(list.current_id(), Some(ids[3]));

        assert!(list.find("event 3").is_none());
        assert!(list.find("Missing").is_none());
        assert_eq!(list.current_id(), None);
    }

    #[test]
    fn test_find_first_match_wins() {
        let mut list = EventList::new();
        let first = list.push(event("2010-05-24", "Same")).unwrap();
        list.push(event("2011-05-24", "Same")).unwrap();

        assert_eq!(list.find("Same").map(|(id, _)| id), Some(first));
    }

    #[test]
    fn test_find_all_ignores_case() {
        let (list, ids) = four_events();

        let found: Vec<_> = list.find_all("EVENT").into_iter().map(|(id, _)| id).collect();
        assert_eq!(found, ids);
        assert!(list.find_all("nope").is_empty());
    }

    #[test]
    fn test_delete_head() {
        let (mut list, ids) = four_events();

        assert!(list.delete(ids[0]));
        assert!(list.find("Event 1").is_none());
        assert_eq!(list.head_id(), Some(ids[1]));
        assert_eq!(names(&list), ["Event 2", "Event 3", "Event 4"]);
    }

    #[test]
    fn test_delete_middle() {
        let (mut list, ids) = four_events();

        assert!(list.delete(ids[2]));
        assert!(list.find("Event 3").is_none());
        assert_eq!(names(&list), ["Event 1", "Event 2", "Event 4"]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_delete_tail() {
        let (mut list, ids) = four_events();

        assert!(list.delete(ids[3]));
        assert!(list.find("Event 4").is_none());
        assert_eq!(list.tail_id(), Some(ids[2]));
        assert_eq!(names(&list), ["Event 1", "Event 2", "Event 3"]);

        // Appending after a tail delete links from the new tail.
        let id = list.push(event("2013-01-01", "Event 5")).unwrap();
        assert_eq!(list.tail_id(), Some(id));
        assert_eq!(names(&list), ["Event 1", "Event 2", "Event 3", "Event 5"]);
    }

    #[test]
    fn test_delete_until_empty() {
        let (mut list, ids) = four_events();

        for id in &ids {
            assert!(list.delete(*id));
        }

        assert!(list.is_empty());
        assert_eq!(list.head_id(), None);
        assert_eq!(list.tail_id(), None);
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn test_delete_missing_is_rejected() {
        let (mut list, ids) = four_events();

        assert!(list.delete(ids[1]));
        assert!(!list.delete(ids[1]));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_stale_id_does_not_match_reused_slot() {
        let (mut list, ids) = four_events();

        assert!(list.delete(ids[1]));
        let replacement = list.push(event("2014-01-01", "Replacement")).unwrap();

        assert!(list.get(ids[1]).is_none());
        assert!(!list.delete(ids[1]));
        assert_eq!(list.get(replacement).map(Event::name), Some("Replacement"));
        assert_eq!(
            names(&list),
            ["Event 1", "Event 3", "Event 4", "Replacement"]
        );
    }

    #[test]
    fn test_delete_under_cursor_moves_it_on() {
        let (mut list, ids) = four_events();

        list.reset_position();
        list.next();
        assert_eq!(list.current_id(), Some(ids[1]));

        assert!(list.delete(ids[1]));
        assert_eq!(list.next().map(|(id, _)| id), Some(ids[2]));
    }

    #[test]
    fn test_edit_through_get_mut() {
        let (mut list, ids) = four_events();

        list.get_mut(ids[0])
            .unwrap()
            .edit("2020-01-01", "10:00", 5, "Renamed", None)
            .unwrap();

        assert!(list.find("Renamed").is_some());
        assert_eq!(list.head_id(), Some(ids[0]));
    }

    #[test]
    fn test_event_list_string() {
        let mut list = EventList::new();
        assert_eq!(event_list_string(&list), "");

        list.push(Event::new("2010-10-10", "18:05", 75, "Blah", Some("Office")).unwrap());
        list.push(Event::new("2010-10-11", "12:00", 60, "Lunch", None).unwrap());

        assert_eq!(
            event_list_string(&list),
            "Blah @ Office (1 hour, 15 minutes)\n10 October 2010, 6:05pm\n\n\
             Lunch (1 hour)\n11 October 2010, 12pm"
        );
    }
}
