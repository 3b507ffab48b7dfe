//! Entity-kind discriminant shared by errors, logs and messages.

use std::fmt;

/// Which of the two tables an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
  Subject,
  Object,
}

impl EntityKind {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Subject => "subject",
      Self::Object => "object",
    }
  }

  /// Capitalised form used in user-facing confirmation messages.
  pub fn title(self) -> &'static str {
    match self {
      Self::Subject => "Subject",
      Self::Object => "Object",
    }
  }
}

impl fmt::Display for EntityKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
