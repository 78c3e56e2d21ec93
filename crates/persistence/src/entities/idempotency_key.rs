//! Ledger idempotency key scope.

/// Which ledger a key was consumed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerScope {
    Mutation,
    Opname,
}

impl LedgerScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerScope::Mutation => "mutation",
            LedgerScope::Opname => "opname",
        }
    }
}
