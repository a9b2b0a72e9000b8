//! # Record Operations
//!
//! The five operations over the record store. Each takes the raw request
//! body, validates it into domain types, performs its store calls, and
//! returns a typed result. None of them check the token: they are only ever
//! invoked through [`AuthorizedOperation`](crate::gate::AuthorizedOperation).
//!
//! | Operation | Store calls |
//! |-----------|-------------|
//! | create    | `insert` (reject policy) or `put` (upsert policy) |
//! | list      | `scan` |
//! | get       | `get` |
//! | update    | `merge` |
//! | delete    | `delete` |

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

pub use create::CreatePolicy;

/// Operation name, used as the `operation` label on metrics and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    List,
    Get,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::List => "list",
            Self::Get => "get",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
