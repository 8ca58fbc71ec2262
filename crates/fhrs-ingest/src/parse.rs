//! Parsing of authority XML feeds into establishment records.
//!
//! Feeds look like
//!
//! ```xml
//! <FHRSEstablishment>
//!   <Header>...</Header>
//!   <EstablishmentCollection>
//!     <EstablishmentDetail>
//!       <FHRSID>123</FHRSID>
//!       <BusinessName>The Ship Inn</BusinessName>
//!       ...
//!     </EstablishmentDetail>
//!   </EstablishmentCollection>
//! </FHRSEstablishment>
//! ```
//!
//! Only direct children of `EstablishmentDetail` are read; nested blocks
//! such as `Scores` or `Geocode` are skipped.

use fhrs_core::{EstablishmentRecord, normalize::normalize_stored_postcode};
use quick_xml::{Reader, events::Event};

use crate::{Error, Result};

const ROOT: &str = "FHRSEstablishment";
const COLLECTION: &str = "EstablishmentCollection";
const DETAIL: &str = "EstablishmentDetail";

// ─── Detail accumulator ──────────────────────────────────────────────────────

#[derive(Default)]
struct DetailBuilder {
  id:          Option<String>,
  name:        Option<String>,
  rating:      Option<String>,
  rating_date: Option<String>,
  address:     [Option<String>; 4],
  postcode:    Option<String>,
}

impl DetailBuilder {
  fn set(&mut self, element: &str, value: String) {
    let slot = match element {
      "FHRSID" => &mut self.id,
      "BusinessName" => &mut self.name,
      "RatingValue" => &mut self.rating,
      "RatingDate" => &mut self.rating_date,
      "AddressLine1" => &mut self.address[0],
      "AddressLine2" => &mut self.address[1],
      "AddressLine3" => &mut self.address[2],
      "AddressLine4" => &mut self.address[3],
      "PostCode" => &mut self.postcode,
      _ => return,
    };
    *slot = Some(value);
  }

  fn build(self, detail: usize) -> Result<EstablishmentRecord> {
    let required = |value: Option<String>, element: &'static str| {
      value.ok_or(Error::MissingElement { element, detail })
    };
    let [address_line1, address_line2, address_line3, address_line4] = self.address;
    Ok(EstablishmentRecord {
      id: required(self.id, "FHRSID")?,
      name: required(self.name, "BusinessName")?,
      rating: required(self.rating, "RatingValue")?,
      rating_date: required(self.rating_date, "RatingDate")?,
      address_line1,
      address_line2,
      address_line3,
      address_line4,
      postcode: self.postcode.as_deref().and_then(normalize_stored_postcode),
    })
  }
}

// ─── Parser ──────────────────────────────────────────────────────────────────

/// Open element of a detail currently collecting text.
struct Field {
  name:  String,
  depth: usize,
  text:  String,
}

fn is_detail_path(stack: &[String]) -> bool {
  matches!(stack, [root, collection, detail]
    if root == ROOT && collection == COLLECTION && detail == DETAIL)
}

fn is_collection_path(stack: &[String]) -> bool {
  matches!(stack, [root, collection] if root == ROOT && collection == COLLECTION)
}

/// Records read from one feed, plus the details that were left out.
#[derive(Debug, Default)]
pub struct ParsedFeed {
  pub records:  Vec<EstablishmentRecord>,
  /// One [`Error::MissingElement`] per rejected detail, in document order.
  pub rejected: Vec<Error>,
}

impl ParsedFeed {
  fn accept(&mut self, detail: DetailBuilder) {
    let number = self.records.len() + self.rejected.len() + 1;
    match detail.build(number) {
      Ok(record) => self.records.push(record),
      Err(e) => self.rejected.push(e),
    }
  }
}

/// Parse one authority feed.
///
/// A detail missing `FHRSID`, `BusinessName`, `RatingValue` or `RatingDate`
/// is rejected on its own; the other details still parse. Malformed XML or
/// a feed with no `EstablishmentCollection` fails the whole feed. Empty
/// elements yield empty strings.
pub fn parse_feed(xml: &[u8]) -> Result<ParsedFeed> {
  let mut reader = Reader::from_reader(xml);
  reader.config_mut().trim_text(true);

  let mut stack: Vec<String> = Vec::new();
  let mut seen_collection = false;
  let mut detail: Option<DetailBuilder> = None;
  let mut field: Option<Field> = None;
  let mut parsed = ParsedFeed::default();
  let mut buf = Vec::new();

  loop {
    match reader.read_event_into(&mut buf) {
      Ok(Event::Start(ref e)) => {
        let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
        stack.push(name);
        if is_collection_path(&stack) {
          seen_collection = true;
        } else if is_detail_path(&stack) {
          detail = Some(DetailBuilder::default());
        } else if detail.is_some() && stack.len() == 4 {
          field = Some(Field {
            name:  stack[3].clone(),
            depth: stack.len(),
            text:  String::new(),
          });
        }
      }
      Ok(Event::Empty(ref e)) => {
        let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
        stack.push(name);
        if is_collection_path(&stack) {
          seen_collection = true;
        } else if is_detail_path(&stack) {
          parsed.accept(DetailBuilder::default());
        } else if let Some(d) = detail.as_mut()
          && stack.len() == 4
        {
          d.set(&stack[3], String::new());
        }
        stack.pop();
      }
      Ok(Event::Text(ref t)) => {
        if let Some(f) = field.as_mut()
          && f.depth == stack.len()
        {
          let text = t.unescape().map_err(|e| Error::Xml(e.to_string()))?;
          f.text.push_str(&text);
        }
      }
      Ok(Event::CData(c)) => {
        if let Some(f) = field.as_mut()
          && f.depth == stack.len()
        {
          f.text.push_str(&String::from_utf8_lossy(&c.into_inner()));
        }
      }
      Ok(Event::End(_)) => {
        if let Some(f) = field.take_if(|f| f.depth == stack.len())
          && let Some(d) = detail.as_mut()
        {
          d.set(&f.name, f.text);
        } else if is_detail_path(&stack)
          && let Some(d) = detail.take()
        {
          parsed.accept(d);
        }
        stack.pop();
      }
      Ok(Event::Eof) => break,
      Err(e) => return Err(Error::Xml(e.to_string())),
      _ => {}
    }
    buf.clear();
  }

  if !seen_collection {
    return Err(Error::MissingCollection);
  }
  Ok(parsed)
}
