//! Task status and priority, mapped to the `task_status` / `task_priority`
//! PostgreSQL enum types.
//!
//! Variant order matches the enum declaration order in the migration, so
//! comparisons in SQL (`ORDER BY priority DESC`) and in Rust agree.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! define_text_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($pg_type:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            Serialize, Deserialize, sqlx::Type,
        )]
        #[sqlx(type_name = $pg_type, rename_all = "snake_case")]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            /// Wire/database representation.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }

            /// Lenient parse used by list filters: unknown values yield `None`.
            pub fn parse(value: &str) -> Option<Self> {
                value.parse().ok()
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $( $text => Ok($name::$variant), )+
                    other => Err(format!(
                        "Invalid {} '{other}'. Must be one of: {}",
                        $pg_type,
                        [$( $text ),+].join(", ")
                    )),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

define_text_enum! {
    /// Task lifecycle status.
    TaskStatus ("task_status") {
        Todo => "todo",
        InProgress => "in_progress",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

define_text_enum! {
    /// Task priority, lowest first.
    TaskPriority ("task_priority") {
        Low => "low",
        Medium => "medium",
        High => "high",
        Urgent => "urgent",
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Todo
    }
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}
