use crate::formatter::FormatError;

/// A single schema change: one forward statement and its optional reverse.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Change {
    /// Forward SQL statement, without a trailing semicolon.
    pub cmd: String,

    /// Statement undoing `cmd`. Empty when the change cannot be reverted.
    #[cfg_attr(feature = "serde", serde(default))]
    pub reverse: String,

    /// Human-readable description rendered as a line comment.
    #[cfg_attr(feature = "serde", serde(default))]
    pub comment: String,
}

impl Change {
    pub fn new(cmd: impl Into<String>) -> Self {
        Change {
            cmd: cmd.into(),
            reverse: String::new(),
            comment: String::new(),
        }
    }

    pub fn with_reverse(mut self, reverse: impl Into<String>) -> Self {
        self.reverse = reverse.into();
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn cmd(&self) -> &str {
        &self.cmd
    }

    pub fn reverse(&self) -> Option<&str> {
        if self.reverse.is_empty() {
            None
        } else {
            Some(&self.reverse)
        }
    }

    pub fn comment(&self) -> Option<&str> {
        if self.comment.is_empty() {
            None
        } else {
            Some(&self.comment)
        }
    }

    pub fn is_reversible(&self) -> bool {
        !self.reverse.is_empty()
    }
}

/// An ordered set of changes forming one migration.
///
/// `reversible` holds exactly when every change has a reverse statement.
/// The constructors derive it, and [`Plan::validate`] rejects a plan whose
/// flag disagrees with its changes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(from = "PlanRecord"))]
pub struct Plan {
    pub name: String,
    pub reversible: bool,
    pub changes: Vec<Change>,
}

/// Serialized form of a plan. `reversible` is derived when left out.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct PlanRecord {
    name: String,
    #[serde(default)]
    reversible: Option<bool>,
    #[serde(default)]
    changes: Vec<Change>,
}

#[cfg(feature = "serde")]
impl From<PlanRecord> for Plan {
    fn from(record: PlanRecord) -> Plan {
        match record.reversible {
            Some(reversible) => Plan {
                name: record.name,
                reversible,
                changes: record.changes,
            },
            None => Plan::from_changes(record.name, record.changes),
        }
    }
}

impl Default for Plan {
    fn default() -> Self {
        Plan::new(String::new())
    }
}

impl Plan {
    /// Create an empty plan. An empty plan counts as reversible.
    pub fn new(name: impl Into<String>) -> Self {
        Plan {
            name: name.into(),
            reversible: true,
            changes: Vec::new(),
        }
    }

    /// Build a plan whose `reversible` flag is derived from its changes.
    pub fn from_changes(name: impl Into<String>, changes: Vec<Change>) -> Self {
        let reversible = changes.iter().all(Change::is_reversible);
        Plan {
            name: name.into(),
            reversible,
            changes,
        }
    }

    /// Append a change and re-derive `reversible` from all changes.
    pub fn with_change(mut self, change: Change) -> Self {
        self.changes.push(change);
        self.reversible = self.changes.iter().all(Change::is_reversible);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    pub fn is_reversible(&self) -> bool {
        self.reversible
    }

    /// True when a separate down/undo section must be rendered.
    pub fn has_down(&self) -> bool {
        self.reversible && !self.changes.is_empty()
    }

    /// Check the invariants every formatter relies on.
    pub fn validate(&self) -> Result<(), FormatError> {
        if self.name.is_empty() {
            return Err(FormatError::EmptyName);
        }
        if self.name == "." || self.name == ".." || self.name.contains(&['/', '\\', '\0'][..]) {
            return Err(FormatError::NameNotFileSafe {
                name: self.name.clone(),
            });
        }
        match self.changes.iter().position(|c| !c.is_reversible()) {
            Some(index) if self.reversible => Err(FormatError::MissingReverse {
                name: self.name.clone(),
                index: index + 1,
            }),
            None if !self.reversible && !self.changes.is_empty() => {
                Err(FormatError::NotMarkedReversible {
                    name: self.name.clone(),
                })
            }
            _ => Ok(()),
        }
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({} changes, {})",
            self.name,
            self.changes.len(),
            if self.reversible {
                "reversible"
            } else {
                "irreversible"
            }
        )
    }
}
