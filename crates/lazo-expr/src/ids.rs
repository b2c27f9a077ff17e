use std::sync::atomic::{AtomicU32, Ordering};

macro_rules! define_id_type {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Get the inner u32 value.
            pub fn inner(self) -> u32 {
                self.0
            }

            /// Create an ID from a u32 value.
            pub fn new(value: u32) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id_type!(VariableId);
define_id_type!(ConstraintId);
define_id_type!(ProblemId);

static NEXT_VARIABLE_ID: AtomicU32 = AtomicU32::new(0);
static NEXT_PROBLEM_ID: AtomicU32 = AtomicU32::new(0);

impl VariableId {
    /// Allocate a process-unique variable ID.
    pub fn allocate() -> Self {
        Self(NEXT_VARIABLE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl ProblemId {
    /// Allocate a process-unique problem ID.
    pub fn allocate() -> Self {
        Self(NEXT_PROBLEM_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::{ConstraintId, ProblemId, VariableId};

    #[test]
    fn variable_id_roundtrip() {
        let id = VariableId::new(7);
        assert_eq!(id.inner(), 7);
    }

    #[test]
    fn constraint_id_display() {
        assert_eq!(ConstraintId::new(11).to_string(), "11");
    }

    #[test]
    fn allocated_ids_are_distinct_and_increasing() {
        let a = VariableId::allocate();
        let b = VariableId::allocate();
        assert!(b > a);

        let p = ProblemId::allocate();
        let q = ProblemId::allocate();
        assert_ne!(p, q);
    }
}
