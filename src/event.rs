/*!
Annotation events tied to a time and a location.
*/

use alloc::string::String;

use crate::range::DateTimeRange;

/// Something that happened at a place, over a span of time.
///
/// Events annotate time series data with context a plot or report wants to
/// show alongside the values: a flood, a sensor swap, a drought
/// declaration. The event itself is plain data; the location is an opaque
/// identifier that callers resolve against whatever station or site list
/// they maintain.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeLocationEvent {
    label: String,
    location_id: String,
    range: DateTimeRange,
}

impl TimeLocationEvent {
    /// Creates an event with the given label, location identifier, and
    /// time range.
    pub fn new(
        label: impl Into<String>,
        location_id: impl Into<String>,
        range: DateTimeRange,
    ) -> TimeLocationEvent {
        TimeLocationEvent {
            label: label.into(),
            location_id: location_id.into(),
            range,
        }
    }

    /// The human readable label of the event.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The opaque identifier of the location the event applies to.
    pub fn location_id(&self) -> &str {
        &self.location_id
    }

    /// The span of time the event covers.
    pub fn range(&self) -> &DateTimeRange {
        &self.range
    }
}

#[cfg(test)]
mod tests {
    use crate::value::PartialDateTime;

    use super::*;

    #[test]
    fn event_accessors() {
        let mut start = PartialDateTime::new();
        start.set_year(2013).unwrap();
        let range = DateTimeRange::new(Some(start), None);
        let event =
            TimeLocationEvent::new("flood", "USGS-09380000", range.clone());
        assert_eq!(event.label(), "flood");
        assert_eq!(event.location_id(), "USGS-09380000");
        assert_eq!(event.range(), &range);
    }
}
