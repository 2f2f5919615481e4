//! Greenplum SQL dialect.
//!
//! Greenplum is PostgreSQL underneath: same folding, quoting and reserved
//! words. It only differs in the table storage clauses handled by
//! [`GreenplumTableTranslator`](super::GreenplumTableTranslator).

use crate::core::identifier::{self, IdentCase};
use crate::core::traits::{Dialect, DialectKind};
use crate::drivers::postgres::POSTGRES_RESERVED;
use crate::error::Result;

#[derive(Debug, Clone, Default)]
pub struct GreenplumDialect;

impl GreenplumDialect {
    pub fn new() -> Self {
        Self
    }
}

impl Dialect for GreenplumDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::Greenplum
    }

    fn ident_case(&self) -> IdentCase {
        IdentCase::Lower
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        POSTGRES_RESERVED
    }

    fn quote_ident(&self, name: &str) -> Result<String> {
        identifier::quote_double(name)
    }
}
