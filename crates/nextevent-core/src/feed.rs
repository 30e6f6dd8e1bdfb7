//! RSS calendar feed parsing.
//!
//! The municipal feed is RSS 2.0 with a few extra fields under its own
//! namespace:
//!
//! ```text
//! rss
//! └── channel
//!     ├── title                 "Plano, TX - Calendar - <name>"
//!     └── item (repeated)
//!         ├── title
//!         ├── link
//!         ├── description       HTML event details
//!         ├── cal:EventDates    "February 26, 2019"
//!         ├── cal:EventTimes    "06:30 PM - 11:59 PM"
//!         └── cal:Location
//! ```
//!
//! [`parse_contents`] reads the document with a namespace-aware quick-xml
//! reader, runs each item through the extractors and keeps only items with
//! a usable name and start time.

use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;
use tracing::{debug, trace};

use crate::calendar::{Calendar, CalendarEntry};
use crate::datetime::parse_date_text;
use crate::error::{CalendarError, CalendarResult};
use crate::extract::{
    non_blank, parse_calendar_name, parse_description, parse_event_name, parse_link,
};

/// Namespace of the calendar-specific item fields.
pub const CALENDAR_NS: &str = "http://www.plano.gov/Calendar.aspx";

/// An element name resolved against its namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ElementName {
    namespace: Option<String>,
    local: String,
}

impl ElementName {
    fn is(&self, local: &str) -> bool {
        self.namespace.is_none() && self.local == local
    }

    fn is_calendar(&self, local: &str) -> bool {
        self.namespace.as_deref() == Some(CALENDAR_NS) && self.local == local
    }
}

/// The item fields the parser reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemField {
    Title,
    Link,
    Description,
    EventDates,
    EventTimes,
    Location,
}

impl ItemField {
    fn from_element(name: &ElementName) -> Option<Self> {
        if name.is("title") {
            Some(Self::Title)
        } else if name.is("link") {
            Some(Self::Link)
        } else if name.is("description") {
            Some(Self::Description)
        } else if name.is_calendar("EventDates") {
            Some(Self::EventDates)
        } else if name.is_calendar("EventTimes") {
            Some(Self::EventTimes)
        } else if name.is_calendar("Location") {
            Some(Self::Location)
        } else {
            None
        }
    }
}

/// Raw text collected for one `item`.
///
/// Only the first occurrence of each field is kept.
#[derive(Debug, Default)]
struct RawItem {
    title: Option<String>,
    link: Option<String>,
    description: Option<String>,
    event_dates: Option<String>,
    event_times: Option<String>,
    location: Option<String>,
}

impl RawItem {
    fn slot(&mut self, field: ItemField) -> &mut Option<String> {
        match field {
            ItemField::Title => &mut self.title,
            ItemField::Link => &mut self.link,
            ItemField::Description => &mut self.description,
            ItemField::EventDates => &mut self.event_dates,
            ItemField::EventTimes => &mut self.event_times,
            ItemField::Location => &mut self.location,
        }
    }

    /// Converts the raw text into an entry, if the item is usable.
    fn into_entry(self) -> Option<CalendarEntry> {
        let name = parse_event_name(self.title.as_deref());
        let (start, end) = parse_date_text(self.event_dates.as_deref(), self.event_times.as_deref());

        let (Some(name), Some(start)) = (name, start) else {
            trace!(
                title = ?self.title,
                dates = ?self.event_dates,
                times = ?self.event_times,
                "Skipping feed item"
            );
            return None;
        };

        Some(
            CalendarEntry::new(name, start)
                .with_end(end)
                .with_location(non_blank(self.location.as_deref()).map(str::to_string))
                .with_description(parse_description(self.description.as_deref()))
                .with_link(parse_link(self.link.as_deref())),
        )
    }
}

/// Where text currently being read should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextTarget {
    ChannelTitle,
    Item(ItemField),
}

/// Parses raw feed text into a [`Calendar`].
///
/// Entries come out sorted by start time. Items that are cancelled, lack a
/// name, lack a parseable start time or span several days are skipped.
///
/// # Errors
///
/// Returns [`CalendarError::MalformedFeed`] if the text is not well-formed
/// XML.
pub fn parse_contents(raw_feed_text: &str) -> CalendarResult<Calendar> {
    let mut reader = NsReader::from_str(raw_feed_text);

    let mut stack: Vec<ElementName> = Vec::new();
    let mut seen_root = false;
    let mut channel_title: Option<String> = None;
    let mut item: Option<RawItem> = None;
    let mut target: Option<TextTarget> = None;
    let mut entries = Vec::new();
    let mut skipped = 0usize;

    loop {
        let (resolved, event) = reader.read_resolved_event()?;
        match event {
            Event::Start(e) => {
                let name = element_name(resolved, e.local_name().as_ref())?;
                open_element(&mut stack, &mut seen_root, name)?;

                match stack.as_slice() {
                    [_, channel, title] if channel.is("channel") && title.is("title") => {
                        if channel_title.is_none() {
                            channel_title = Some(String::new());
                            target = Some(TextTarget::ChannelTitle);
                        }
                    }
                    [_, channel, it] if channel.is("channel") && it.is("item") => {
                        item = Some(RawItem::default());
                    }
                    [_, channel, it, field] if channel.is("channel") && it.is("item") => {
                        if let (Some(raw), Some(field)) = (item.as_mut(), ItemField::from_element(field)) {
                            let slot = raw.slot(field);
                            if slot.is_none() {
                                *slot = Some(String::new());
                                target = Some(TextTarget::Item(field));
                            }
                        }
                    }
                    _ => {}
                }
            }
            Event::Empty(e) => {
                let name = element_name(resolved, e.local_name().as_ref())?;
                open_element(&mut stack, &mut seen_root, name)?;
                stack.pop();
            }
            Event::End(e) => {
                let name = element_name(resolved, e.local_name().as_ref())?;
                if stack.last() != Some(&name) {
                    return Err(CalendarError::malformed(format!(
                        "unexpected closing tag `{}`",
                        name.local
                    )));
                }

                match stack.as_slice() {
                    [_, channel, title] if channel.is("channel") && title.is("title") => {
                        target = None;
                    }
                    [_, channel, it] if channel.is("channel") && it.is("item") => {
                        if let Some(raw) = item.take() {
                            match raw.into_entry() {
                                Some(entry) => entries.push(entry),
                                None => skipped += 1,
                            }
                        }
                    }
                    [_, channel, it, _] if channel.is("channel") && it.is("item") => {
                        target = None;
                    }
                    _ => {}
                }
                stack.pop();
            }
            Event::Text(e) => {
                let text = e.unescape()?;
                if stack.is_empty() {
                    if !text.trim().is_empty() {
                        return Err(CalendarError::malformed("text outside the root element"));
                    }
                } else {
                    append_text(target, &mut channel_title, &mut item, &text);
                }
            }
            Event::CData(e) => {
                if stack.is_empty() {
                    return Err(CalendarError::malformed("CDATA outside the root element"));
                }
                let text = String::from_utf8_lossy(&e).to_string();
                append_text(target, &mut channel_title, &mut item, &text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err(CalendarError::malformed("no root element"));
    }
    if let Some(open) = stack.last() {
        return Err(CalendarError::malformed(format!(
            "unclosed element `{}`",
            open.local
        )));
    }

    let name = parse_calendar_name(channel_title.as_deref());
    debug!(
        calendar = ?name,
        entries = entries.len(),
        skipped,
        "Parsed calendar feed"
    );

    Ok(Calendar::new(name, entries))
}

/// Resolves an element's namespace and local name.
fn element_name(resolved: ResolveResult<'_>, local: &[u8]) -> CalendarResult<ElementName> {
    let namespace = match resolved {
        ResolveResult::Unbound => None,
        ResolveResult::Bound(Namespace(ns)) => Some(String::from_utf8_lossy(ns).to_string()),
        ResolveResult::Unknown(prefix) => {
            return Err(CalendarError::malformed(format!(
                "undeclared namespace prefix `{}`",
                String::from_utf8_lossy(&prefix)
            )));
        }
    };

    Ok(ElementName {
        namespace,
        local: String::from_utf8_lossy(local).to_string(),
    })
}

/// Pushes an element, rejecting a second root.
fn open_element(
    stack: &mut Vec<ElementName>,
    seen_root: &mut bool,
    name: ElementName,
) -> CalendarResult<()> {
    if stack.is_empty() {
        if *seen_root {
            return Err(CalendarError::malformed(format!(
                "second root element `{}`",
                name.local
            )));
        }
        *seen_root = true;
    }
    stack.push(name);
    Ok(())
}

/// Appends text to whatever field is being read.
fn append_text(
    target: Option<TextTarget>,
    channel_title: &mut Option<String>,
    item: &mut Option<RawItem>,
    text: &str,
) {
    let slot = match target {
        Some(TextTarget::ChannelTitle) => channel_title,
        Some(TextTarget::Item(field)) => match item.as_mut() {
            Some(raw) => raw.slot(field),
            None => return,
        },
        None => return,
    };

    if let Some(buffer) = slot.as_mut() {
        buffer.push_str(text);
    }
}
