//! Read view derived from a document: sorted guests plus aggregate counters.

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::{GuestRecord, Host, StoreDocument, MAX_GUESTS, MAX_GUESTS_PER_HOST};

/// A yes/no tally. `no` is always `total - yes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YesNo {
    pub yes: usize,
    pub no: usize,
}

/// Aggregate counters over the whole list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Counters {
    pub total: usize,
    /// Every host is present, zero counts included.
    pub by_host: BTreeMap<Host, usize>,
    pub paid: YesNo,
    pub confirmed: YesNo,
}

/// Capacity limits, sent along so clients need no extra call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Limits {
    pub total: usize,
    pub per_host: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            total: MAX_GUESTS,
            per_host: MAX_GUESTS_PER_HOST,
        }
    }
}

/// Payload returned by every guest list endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct GuestView {
    pub guests: Vec<GuestRecord>,
    pub counters: Counters,
    pub limits: Limits,
    pub hosts: Vec<Host>,
}

impl GuestView {
    /// Builds the view for `document`.
    pub fn build(document: &StoreDocument) -> Self {
        let mut guests = document.guests.clone();
        guests.sort_by(compare_guests);

        Self {
            counters: Counters::from_guests(&guests),
            guests,
            limits: Limits::default(),
            hosts: Host::ALL.to_vec(),
        }
    }
}

impl Counters {
    fn from_guests(guests: &[GuestRecord]) -> Self {
        let total = guests.len();
        let mut by_host: BTreeMap<Host, usize> = Host::ALL.iter().map(|h| (*h, 0)).collect();
        let mut paid = 0;
        let mut confirmed = 0;

        for guest in guests {
            *by_host.entry(guest.invited_by).or_default() += 1;
            paid += usize::from(guest.is_paid);
            confirmed += usize::from(guest.is_confirmed);
        }

        Self {
            total,
            by_host,
            paid: YesNo {
                yes: paid,
                no: total - paid,
            },
            confirmed: YesNo {
                yes: confirmed,
                no: total - confirmed,
            },
        }
    }
}

/// Name order ignoring case and accents, then exact lowercase, then id.
fn compare_guests(a: &GuestRecord, b: &GuestRecord) -> Ordering {
    collation_key(&a.name)
        .cmp(&collation_key(&b.name))
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.id.cmp(&b.id))
}

fn collation_key(name: &str) -> String {
    name.chars()
        .flat_map(char::to_lowercase)
        .map(fold_accent)
        .collect()
}

/// Strips diacritics from lowercase Latin letters (Latin-1 and Latin
/// Extended-A). Not a full locale collation: other scripts pass through and
/// sort by code point.
fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'ď' | 'đ' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => 'g',
        'ĥ' | 'ħ' => 'h',
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => 'i',
        'ĵ' => 'j',
        'ķ' => 'k',
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => 'l',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => 'o',
        'ŕ' | 'ŗ' | 'ř' => 'r',
        'ś' | 'ŝ' | 'ş' | 'š' => 's',
        'ţ' | 'ť' | 'ŧ' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'ŵ' => 'w',
        'ý' | 'ÿ' | 'ŷ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GuestInput;
    use chrono::Utc;
    use serde_json::json;

    fn doc_with(entries: &[(&str, &str, bool, bool)]) -> StoreDocument {
        let mut doc = StoreDocument::default();
        for (name, host, paid, confirmed) in entries {
            let input: GuestInput = serde_json::from_value(json!({
                "name": name,
                "invitedBy": host,
                "isPaid": paid,
                "isConfirmed": confirmed,
            }))
            .unwrap();
            doc.create(&input, Utc::now()).unwrap();
        }
        doc
    }

    #[test]
    fn test_sort_ignores_case_and_accents() {
        let doc = doc_with(&[
            ("bruno", "Diogo", false, false),
            ("Álvaro", "Diogo", false, false),
            ("ana", "Bruna", false, false),
            ("Ana", "Lucas", false, false),
            ("Caio", "Rafael", false, false),
        ]);
        let view = GuestView::build(&doc);
        let names: Vec<_> = view.guests.iter().map(|g| (g.name.as_str(), g.id)).collect();
        assert_eq!(
            names,
            vec![("Álvaro", 2), ("ana", 3), ("Ana", 4), ("bruno", 1), ("Caio", 5)]
        );
    }

    #[test]
    fn test_sort_folds_central_european_letters() {
        let doc = doc_with(&[
            ("Zofia", "Diogo", false, false),
            ("Łukasz", "Bruna", false, false),
            ("Šimon", "Rafael", false, false),
            ("Mateus", "Camila", false, false),
            ("Ōta", "Lucas", false, false),
            ("Čeněk", "Diogo", false, false),
        ]);
        let view = GuestView::build(&doc);
        let names: Vec<_> = view.guests.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Čeněk", "Łukasz", "Mateus", "Ōta", "Šimon", "Zofia"]
        );
        assert_eq!(collation_key("Łódź"), "lodz");
        assert_eq!(collation_key("Dvořák"), "dvorak");
    }

    #[test]
    fn test_counters() {
        let doc = doc_with(&[
            ("A", "Diogo", true, false),
            ("B", "Diogo", true, true),
            ("C", "Camila", false, true),
        ]);
        let view = GuestView::build(&doc);

        assert_eq!(view.counters.total, 3);
        assert_eq!(view.counters.by_host[&Host::Diogo], 2);
        assert_eq!(view.counters.by_host[&Host::Camila], 1);
        assert_eq!(view.counters.by_host[&Host::Lucas], 0);
        assert_eq!(view.counters.paid, YesNo { yes: 2, no: 1 });
        assert_eq!(view.counters.confirmed, YesNo { yes: 2, no: 1 });
    }

    #[test]
    fn test_empty_view_json() {
        let view = GuestView::build(&StoreDocument::default());
        let value = serde_json::to_value(&view).unwrap();

        assert_eq!(value["guests"], json!([]));
        assert_eq!(value["counters"]["total"], 0);
        assert_eq!(
            value["counters"]["byHost"],
            json!({"Diogo": 0, "Bruna": 0, "Rafael": 0, "Camila": 0, "Lucas": 0})
        );
        assert_eq!(value["counters"]["paid"], json!({"yes": 0, "no": 0}));
        assert_eq!(value["limits"], json!({"total": 120, "perHost": 24}));
        assert_eq!(
            value["hosts"],
            json!(["Diogo", "Bruna", "Rafael", "Camila", "Lucas"])
        );
    }
}
