//! Timeline module - an ordered chain of ownership periods
//!
//! Periods live in an arena owned by the timeline and are addressed by
//! [`PeriodId`]. Neighbour links are optional handles, and the
//! direct-transfer flag lives on the edge from a period to its successor.

use crate::acquisition::AcquisitionTable;
use crate::period::{Period, PeriodId};
use crate::record::PeriodRecord;
use crate::traits::AcquisitionLookup;
use chrono::{NaiveDate, Utc};
use std::ops::Index;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Link {
    previous: Option<PeriodId>,
    next: Option<PeriodId>,
    /// Edge to `next`; meaningless while `next` is unset
    direct_transfer: Option<bool>,
}

/// Ordered sequence of periods in document order
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    periods: Vec<Period>,
    links: Vec<Link>,
    head: Option<PeriodId>,
    tail: Option<PeriodId>,
}

impl Timeline {
    /// Create an empty timeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of periods
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Check if the timeline holds no periods
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Get a period by handle
    pub fn get(&self, id: PeriodId) -> Option<&Period> {
        self.periods.get(id.index())
    }

    /// Get a period mutably by handle
    pub fn get_mut(&mut self, id: PeriodId) -> Option<&mut Period> {
        self.periods.get_mut(id.index())
    }

    /// First period in the chain
    pub fn first(&self) -> Option<PeriodId> {
        self.head
    }

    /// Last period in the chain
    pub fn last(&self) -> Option<PeriodId> {
        self.tail
    }

    /// Handles in chain order
    pub fn ids(&self) -> Vec<PeriodId> {
        let mut ids = Vec::with_capacity(self.len());
        let mut cursor = self.head;
        while let Some(id) = cursor {
            ids.push(id);
            cursor = self.next(id);
        }
        ids
    }

    /// Periods in chain order
    pub fn iter(&self) -> impl Iterator<Item = &Period> + '_ {
        self.ids().into_iter().filter_map(move |id| self.get(id))
    }

    /// Append a period with an ordinary (not known to be direct) edge
    pub fn insert(&mut self, period: Period) -> PeriodId {
        self.append(period, false)
    }

    /// Append a period and mark the edge from the previous tail as direct
    pub fn insert_direct(&mut self, period: Period) -> PeriodId {
        self.append(period, true)
    }

    fn append(&mut self, period: Period, direct: bool) -> PeriodId {
        let id = PeriodId::from_index(self.periods.len());
        self.periods.push(period);
        self.links.push(Link::default());

        match self.tail {
            Some(tail) => {
                self.set_next(tail, Some(id));
                self.set_previous(id, Some(tail));
                self.set_direct_transfer(tail, direct);
            }
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        id
    }

    /// Point `id` at a new successor, clearing its direct-transfer edge
    pub fn set_next(&mut self, id: PeriodId, next: Option<PeriodId>) {
        if let Some(link) = self.links.get_mut(id.index()) {
            link.next = next;
            link.direct_transfer = None;
        }
    }

    /// Point `id` at a new predecessor, clearing the predecessor's edge
    pub fn set_previous(&mut self, id: PeriodId, previous: Option<PeriodId>) {
        if let Some(link) = self.links.get_mut(id.index()) {
            link.previous = previous;
        }
        if let Some(prev) = previous {
            if let Some(link) = self.links.get_mut(prev.index()) {
                link.direct_transfer = None;
            }
        }
    }

    /// Record whether the edge from `id` to its successor is direct
    pub fn set_direct_transfer(&mut self, id: PeriodId, direct: bool) {
        if let Some(link) = self.links.get_mut(id.index()) {
            link.direct_transfer = Some(direct);
        }
    }

    /// Direct-transfer flag on the edge to the next period
    ///
    /// `None` when there is no next period or the edge was cleared.
    pub fn direct_transfer(&self, id: PeriodId) -> Option<bool> {
        let link = self.links.get(id.index())?;
        link.next?;
        link.direct_transfer
    }

    /// Whether the previous period handed over directly to this one
    pub fn was_directly_transferred(&self, id: PeriodId) -> bool {
        self.previous(id)
            .and_then(|prev| self.direct_transfer(prev))
            .unwrap_or(false)
    }

    /// Predecessor handle
    pub fn previous(&self, id: PeriodId) -> Option<PeriodId> {
        self.links.get(id.index()).and_then(|l| l.previous)
    }

    /// Successor handle
    pub fn next(&self, id: PeriodId) -> Option<PeriodId> {
        self.links.get(id.index()).and_then(|l| l.next)
    }

    /// Provenance text of a single period, cased for its position
    pub fn provenance_of(&self, id: PeriodId) -> String {
        self.get(id)
            .map(|p| p.provenance(self.was_directly_transferred(id)))
            .unwrap_or_default()
    }

    /// Dates of a single period as natural text
    pub fn time_string(&self, id: PeriodId) -> String {
        self.get(id).map(Period::time_string).unwrap_or_default()
    }

    /// Round-trip check for one period against the standard vocabulary
    pub fn parsable(&self, id: PeriodId, strict: bool) -> bool {
        self.parsable_with(id, strict, AcquisitionTable::standard())
    }

    /// Round-trip check for one period against a custom vocabulary
    pub fn parsable_with<L: AcquisitionLookup>(&self, id: PeriodId, strict: bool, lookup: &L) -> bool {
        self.get(id).is_some_and(|p| p.parsable(strict, lookup))
    }

    /// Whole timeline as provenance text
    ///
    /// Periods joined by "; " across direct transfers and ". " otherwise;
    /// footnotes become "[n]" markers and a trailing "NOTES:" block.
    pub fn provenance(&self) -> String {
        let mut out = String::new();
        let mut notes: Vec<&str> = Vec::new();

        for id in self.ids() {
            out.push_str(&self.provenance_of(id));
            if let Some(period) = self.get(id) {
                for note in &period.footnotes {
                    notes.push(note);
                    out.push_str(&format!(" [{}]", notes.len()));
                }
            }
            match self.direct_transfer(id) {
                Some(true) => out.push_str("; "),
                Some(false) => out.push_str(". "),
                None => out.push('.'),
            }
        }

        if !notes.is_empty() {
            out.push_str("\n\nNOTES:\n");
            for (idx, note) in notes.iter().enumerate() {
                out.push_str(&format!("[{}] {}\n", idx + 1, note));
            }
        }
        out
    }

    /// Earliest day this period could have begun
    ///
    /// An explicit beginning wins. Otherwise the closest earlier period
    /// with a stated bound and the party's birth both bound it from below,
    /// and the later of the two is taken.
    pub fn earliest_possible(&self, id: PeriodId) -> Option<NaiveDate> {
        let period = self.get(id)?;
        if let Some(day) = period.beginning.and_then(|b| b.earliest()) {
            return Some(day);
        }

        let mut linked = None;
        let mut cursor = self.previous(id);
        while let Some(prev) = cursor {
            if let Some(p) = self.get(prev) {
                let bound = p
                    .ending
                    .and_then(|e| e.earliest())
                    .or_else(|| p.beginning.and_then(|b| b.earliest()));
                if bound.is_some() {
                    linked = bound;
                    break;
                }
            }
            cursor = self.previous(prev);
        }

        let birth = period
            .party
            .as_ref()
            .and_then(|party| party.birth)
            .map(|d| d.earliest());

        match (linked, birth) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        }
    }

    /// Latest day this period could have ended, measured against today
    pub fn latest_possible(&self, id: PeriodId) -> NaiveDate {
        self.latest_possible_at(id, Utc::now().date_naive())
    }

    /// Latest day this period could have ended, measured against `today`
    ///
    /// An explicit ending wins; an ongoing period (no ending, no successor)
    /// runs to `today`. Otherwise the closest later period with a stated
    /// bound and the party's death bound it from above, and the earlier of
    /// the two is taken.
    pub fn latest_possible_at(&self, id: PeriodId, today: NaiveDate) -> NaiveDate {
        let Some(period) = self.get(id) else {
            return today;
        };
        if let Some(day) = period.ending.and_then(|e| e.latest()) {
            return day;
        }
        if period.ending.is_none() && self.next(id).is_none() {
            return today;
        }

        let mut linked = None;
        let mut cursor = self.next(id);
        while let Some(next) = cursor {
            if let Some(p) = self.get(next) {
                let bound = p
                    .beginning
                    .and_then(|b| b.latest())
                    .or_else(|| p.ending.and_then(|e| e.latest()));
                if bound.is_some() {
                    linked = bound;
                    break;
                }
            }
            cursor = self.next(next);
        }

        let death = period
            .party
            .as_ref()
            .and_then(|party| party.death)
            .map(|d| d.latest());

        match (linked, death) {
            (Some(a), Some(b)) => a.min(b),
            (a, b) => a.or(b).unwrap_or(today),
        }
    }

    /// Whether `other` comes after `id` in the chain
    pub fn is_before(&self, id: PeriodId, other: PeriodId) -> bool {
        let mut cursor = self.next(id);
        while let Some(next) = cursor {
            if next == other {
                return true;
            }
            cursor = self.next(next);
        }
        false
    }

    /// Whether `other` comes before `id` in the chain
    pub fn is_after(&self, id: PeriodId, other: PeriodId) -> bool {
        let mut cursor = self.previous(id);
        while let Some(prev) = cursor {
            if prev == other {
                return true;
            }
            cursor = self.previous(prev);
        }
        false
    }

    /// The full chain containing `id`, in order, `id` included
    pub fn siblings(&self, id: PeriodId) -> Vec<PeriodId> {
        if self.get(id).is_none() {
            return Vec::new();
        }
        let mut start = id;
        while let Some(prev) = self.previous(start) {
            start = prev;
        }
        let mut chain = vec![start];
        let mut cursor = self.next(start);
        while let Some(next) = cursor {
            chain.push(next);
            cursor = self.next(next);
        }
        chain
    }

    /// Structured records, one per period in chain order
    pub fn to_records(&self) -> Vec<PeriodRecord> {
        self.ids()
            .into_iter()
            .filter_map(|id| {
                let period = self.get(id)?;
                Some(PeriodRecord::from_period(
                    period,
                    self.provenance_of(id),
                    period.parsable(false, AcquisitionTable::standard()),
                    self.direct_transfer(id),
                ))
            })
            .collect()
    }

    /// Structured records as a JSON array
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.to_records())
    }
}

impl Index<usize> for Timeline {
    type Output = Period;

    /// Periods are only ever appended, so arena order is chain order
    fn index(&self, index: usize) -> &Period {
        &self.periods[index]
    }
}
