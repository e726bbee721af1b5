use crate::js::{JsDecl, JsStmt};
use crate::naming::{alias_name, SELF_ALIAS_SEQ};

/// Per-file table of external references and the aliases they are imported under.
///
/// Insertion order is first-use order; the same reference always maps to the same alias.
#[derive(Debug, Default)]
pub struct ImportTable {
    entries: Vec<(String, String)>,
}

impl ImportTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Alias for `source`, allocating the next one on first use.
    pub fn alias_for(&mut self, source: &str) -> String {
        if let Some((_, alias)) = self.entries.iter().find(|(s, _)| s == source) {
            return alias.clone();
        }
        let seq = SELF_ALIAS_SEQ + 1 + self.entries.len() as u32;
        let alias = alias_name(seq);
        self.entries.push((source.to_string(), alias.clone()));
        alias
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One default import per entry, in first-use order. Consumes the table.
    pub fn into_declarations(self) -> Vec<JsStmt> {
        self.entries
            .into_iter()
            .map(|(source, local)| JsStmt::Decl(JsDecl::Import { local, source }))
            .collect()
    }
}
