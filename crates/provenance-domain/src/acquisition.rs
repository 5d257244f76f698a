//! Acquisition methods - the static vocabulary of how objects change hands

use crate::traits::AcquisitionLookup;
use once_cell::sync::Lazy;

/// Where a form sits relative to the party name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Before the name: "Sold to John Smith"
    Prefix,
    /// After the name: "John Smith, by purchase"
    Suffix,
}

/// One way of writing an acquisition method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Form {
    /// Text as it appears in provenance
    pub text: &'static str,
    /// Where the text attaches
    pub placement: Placement,
}

const fn prefix(text: &'static str) -> Form {
    Form {
        text,
        placement: Placement::Prefix,
    }
}

const fn suffix(text: &'static str) -> Form {
    Form {
        text,
        placement: Placement::Suffix,
    }
}

/// A canonical acquisition method with its synonym forms
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AcquisitionMethod {
    /// Stable identifier
    pub id: &'static str,

    /// Human-readable name
    pub name: &'static str,

    /// Form used when generating text
    pub preferred: Form,

    /// Every accepted way of writing the method, preferred form included
    pub forms: &'static [Form],

    /// Short definition
    pub definition: &'static str,
}

impl AcquisitionMethod {
    /// Attach the preferred form to a party name
    ///
    /// # Examples
    ///
    /// ```
    /// use provenance_domain::AcquisitionTable;
    /// use provenance_domain::traits::AcquisitionLookup;
    ///
    /// let table = AcquisitionTable::standard();
    /// let gift = table.find_by_name("Gift").unwrap();
    /// assert_eq!(gift.attach_to_name("Carnegie Museum"), "Gift to Carnegie Museum");
    /// ```
    pub fn attach_to_name(&self, name: &str) -> String {
        let name = name.trim();
        if name.is_empty() {
            return self.preferred.text.to_string();
        }
        match self.preferred.placement {
            Placement::Prefix => format!("{} {}", self.preferred.text, name),
            Placement::Suffix => format!("{}, {}", name, self.preferred.text),
        }
    }

    /// Every synonym text
    pub fn form_texts(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.forms.iter().map(|f| f.text)
    }
}

/// Standard vocabulary
pub static ACQUISITION_METHODS: &[AcquisitionMethod] = &[
    AcquisitionMethod {
        id: "sale",
        name: "Sale",
        preferred: prefix("Sold to"),
        forms: &[prefix("Sold to"), prefix("Sale to"), prefix("Sold, to"), prefix("Sale:"), suffix("by sale")],
        definition: "Transfer of ownership in exchange for payment",
    },
    AcquisitionMethod {
        id: "purchase",
        name: "Purchase",
        preferred: prefix("Purchased by"),
        forms: &[prefix("Purchased by"), prefix("Bought by"), prefix("Acquired by purchase by"), suffix("by purchase")],
        definition: "Acquisition by the named party in exchange for payment",
    },
    AcquisitionMethod {
        id: "auction",
        name: "Auction",
        preferred: prefix("Sold at auction to"),
        forms: &[prefix("Sold at auction to"), prefix("Sale at auction to"), prefix("Auctioned to"), suffix("at auction")],
        definition: "Sale through a public auction",
    },
    AcquisitionMethod {
        id: "gift",
        name: "Gift",
        preferred: prefix("Gift to"),
        forms: &[prefix("Gift to"), prefix("Given to"), prefix("Donated to"), prefix("Presented to"), suffix("by gift")],
        definition: "Transfer without payment during the giver's lifetime",
    },
    AcquisitionMethod {
        id: "bequest",
        name: "Bequest",
        preferred: prefix("Bequest to"),
        forms: &[prefix("Bequest to"), prefix("Bequeathed to"), prefix("Left by bequest to"), suffix("by bequest")],
        definition: "Transfer by the terms of a will",
    },
    AcquisitionMethod {
        id: "inheritance",
        name: "Inheritance",
        preferred: prefix("Inherited by"),
        forms: &[prefix("Inherited by"), prefix("Inheritance to"), suffix("by inheritance")],
        definition: "Transfer to an heir on the owner's death",
    },
    AcquisitionMethod {
        id: "by_descent",
        name: "By descent",
        preferred: prefix("By descent to"),
        forms: &[prefix("By descent to"), prefix("By descent through the family to"), prefix("Descended to"), suffix("by descent")],
        definition: "Passed down within a family",
    },
    AcquisitionMethod {
        id: "transfer",
        name: "Transfer",
        preferred: prefix("Transferred to"),
        forms: &[prefix("Transferred to"), prefix("Transfer to"), suffix("by transfer")],
        definition: "Administrative transfer between holders",
    },
    AcquisitionMethod {
        id: "exchange",
        name: "Exchange",
        preferred: prefix("Exchanged to"),
        forms: &[prefix("Exchanged to"), prefix("Traded to"), prefix("By exchange to"), suffix("by exchange")],
        definition: "Traded for other property",
    },
    AcquisitionMethod {
        id: "consignment",
        name: "Consignment",
        preferred: prefix("Consigned to"),
        forms: &[prefix("Consigned to"), prefix("On consignment to"), prefix("Consignment to")],
        definition: "Placed with an agent for sale without transfer of title",
    },
    AcquisitionMethod {
        id: "commission",
        name: "Commission",
        preferred: prefix("Commissioned by"),
        forms: &[prefix("Commissioned by"), prefix("Commissioned from the artist by"), suffix("by commission")],
        definition: "Made to order for the named party",
    },
    AcquisitionMethod {
        id: "restitution",
        name: "Restitution",
        preferred: prefix("Restituted to"),
        forms: &[prefix("Restituted to"), prefix("Restitution to"), prefix("Returned to"), suffix("by restitution")],
        definition: "Return to a rightful owner after a wrongful loss",
    },
    AcquisitionMethod {
        id: "confiscation",
        name: "Confiscation",
        preferred: prefix("Confiscated by"),
        forms: &[prefix("Confiscated by"), prefix("Seized by"), prefix("Sequestered by")],
        definition: "Taken by an authority",
    },
    AcquisitionMethod {
        id: "theft",
        name: "Theft",
        preferred: prefix("Stolen by"),
        forms: &[prefix("Stolen by"), prefix("Looted by"), prefix("Plundered by")],
        definition: "Taken without right",
    },
    AcquisitionMethod {
        id: "excavation",
        name: "Excavation",
        preferred: prefix("Excavated by"),
        forms: &[prefix("Excavated by"), prefix("Found by excavation by"), suffix("by excavation")],
        definition: "Recovered from an archaeological site",
    },
    AcquisitionMethod {
        id: "field_collection",
        name: "Field collection",
        preferred: prefix("Collected by"),
        forms: &[prefix("Collected by"), prefix("Field collected by"), prefix("Collected in the field by")],
        definition: "Gathered at its place of origin",
    },
    AcquisitionMethod {
        id: "found",
        name: "Found",
        preferred: prefix("Found by"),
        forms: &[prefix("Found by"), prefix("Discovered by")],
        definition: "Discovered without a prior owner of record",
    },
    AcquisitionMethod {
        id: "loan",
        name: "Loan",
        preferred: prefix("Lent to"),
        forms: &[prefix("Lent to"), prefix("Loaned to"), prefix("On loan to")],
        definition: "Temporary custody without transfer of title",
    },
];

/// Result of matching a form against clause text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodMatch<'a> {
    /// The matched method
    pub method: &'a AcquisitionMethod,
    /// The form that matched
    pub form: Form,
    /// Clause text with the form removed
    pub remainder: String,
}

/// Lookup over a slice of acquisition methods
#[derive(Debug, Clone)]
pub struct AcquisitionTable {
    methods: &'static [AcquisitionMethod],
    /// (lowercased form, method index, form) sorted longest first
    forms: Vec<(String, usize, Form)>,
}

static STANDARD: Lazy<AcquisitionTable> = Lazy::new(|| AcquisitionTable::new(ACQUISITION_METHODS));

impl AcquisitionTable {
    /// Build a table over the given methods
    pub fn new(methods: &'static [AcquisitionMethod]) -> Self {
        let mut forms: Vec<(String, usize, Form)> = methods
            .iter()
            .enumerate()
            .flat_map(|(idx, m)| m.forms.iter().map(move |f| (f.text.to_lowercase(), idx, *f)))
            .collect();
        forms.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Self { methods, forms }
    }

    /// The process-wide standard table
    pub fn standard() -> &'static AcquisitionTable {
        &STANDARD
    }

    /// All methods in the table
    pub fn methods(&self) -> &[AcquisitionMethod] {
        self.methods
    }
}

fn is_boundary(c: Option<char>) -> bool {
    c.map_or(true, |c| !c.is_alphanumeric())
}

impl AcquisitionLookup for AcquisitionTable {
    fn find(&self, text: &str) -> Option<MethodMatch<'_>> {
        let trimmed = text.trim();
        let lower = trimmed.to_lowercase();
        // Only ASCII forms are matched, so byte offsets line up
        if lower.len() != trimmed.len() {
            return self.find_ascii_fallback(trimmed);
        }

        for (form_lower, idx, form) in &self.forms {
            match form.placement {
                Placement::Prefix => {
                    if lower.starts_with(form_lower.as_str())
                        && is_boundary(lower[form_lower.len()..].chars().next())
                    {
                        let remainder = trimmed[form_lower.len()..]
                            .trim_start_matches([' ', ','])
                            .to_string();
                        return Some(MethodMatch {
                            method: &self.methods[*idx],
                            form: *form,
                            remainder,
                        });
                    }
                }
                Placement::Suffix => {
                    if let Some(pos) = find_suffix_segment(&lower, form_lower) {
                        let mut remainder = trimmed[..pos].trim_end_matches([' ', ',']).to_string();
                        let tail = trimmed[pos + form_lower.len()..].trim_start_matches([' ', ',']);
                        if !tail.is_empty() {
                            remainder.push_str(", ");
                            remainder.push_str(tail);
                        }
                        return Some(MethodMatch {
                            method: &self.methods[*idx],
                            form: *form,
                            remainder,
                        });
                    }
                }
            }
        }
        None
    }

    fn find_by_name(&self, name: &str) -> Option<&AcquisitionMethod> {
        let name = name.trim();
        self.methods
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name) || m.id.eq_ignore_ascii_case(name))
    }

    fn all_forms(&self) -> Vec<&'static str> {
        self.forms.iter().map(|(_, _, f)| f.text).collect()
    }
}

impl AcquisitionTable {
    fn find_ascii_fallback(&self, trimmed: &str) -> Option<MethodMatch<'_>> {
        // Non-ASCII text: fall back to char-safe prefix comparison only
        for (form_lower, idx, form) in &self.forms {
            if form.placement != Placement::Prefix {
                continue;
            }
            let head: String = trimmed.chars().take(form_lower.chars().count()).collect();
            if head.to_lowercase() == *form_lower
                && is_boundary(trimmed[head.len()..].chars().next())
            {
                return Some(MethodMatch {
                    method: &self.methods[*idx],
                    form: *form,
                    remainder: trimmed[head.len()..].trim_start_matches([' ', ',']).to_string(),
                });
            }
        }
        None
    }
}

/// Position of a suffix form standing as its own comma segment
fn find_suffix_segment(lower: &str, form: &str) -> Option<usize> {
    let mut search_from = 0;
    while let Some(found) = lower[search_from..].find(form) {
        let pos = search_from + found;
        let before = lower[..pos].trim_end_matches(' ');
        let after = lower[pos + form.len()..].trim_start_matches(' ');
        if pos > 0 && before.ends_with(',') && (after.is_empty() || after.starts_with(',')) {
            return Some(pos);
        }
        search_from = pos + form.len();
    }
    None
}
