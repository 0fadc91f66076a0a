use crate::models::{EarthquakeEvent, LatLng};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(pub u64);

/// A rendered pin: one event plus the handle the map uses to address it.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: MarkerId,
    /// Request id of the response this marker came from.
    pub generation: u64,
    pub event: EarthquakeEvent,
}

impl Marker {
    pub fn position(&self) -> LatLng {
        self.event.position()
    }
}

/// Markers currently on the map. Only ever replaced wholesale, so every
/// marker shares one generation.
#[derive(Debug, Clone, Default)]
pub struct MarkerSet {
    markers: Vec<Marker>,
    generation: Option<u64>,
    next_id: u64,
}

impl MarkerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every marker, then add one per event in response order.
    pub fn replace_all(&mut self, generation: u64, events: Vec<EarthquakeEvent>) {
        self.markers.clear();
        self.markers.reserve(events.len());
        for event in events {
            let id = MarkerId(self.next_id);
            self.next_id += 1;
            self.markers.push(Marker {
                id,
                generation,
                event,
            });
        }
        self.generation = Some(generation);
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Marker> {
        self.markers.iter()
    }

    pub fn first(&self) -> Option<&Marker> {
        self.markers.first()
    }

    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id == id)
    }

    /// Generation of the response currently shown, `None` before the first.
    pub fn generation(&self) -> Option<u64> {
        self.generation
    }
}

impl<'a> IntoIterator for &'a MarkerSet {
    type Item = &'a Marker;
    type IntoIter = std::slice::Iter<'a, Marker>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
