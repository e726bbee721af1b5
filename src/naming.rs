//! Identifier sanitization and generated-name helpers.

/// Words that cannot be used as bare binding names in the output language.
const RESERVED: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false", "finally",
    "for", "function", "if", "implements", "import", "in", "instanceof", "interface", "let",
    "new", "null", "package", "private", "protected", "public", "return", "static", "super",
    "switch", "this", "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

pub fn is_reserved(name: &str) -> bool {
    RESERVED.contains(&name)
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphabetic()
}

fn is_ident_part(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphanumeric()
}

/// True if `name` can appear as a bare identifier (binding or `obj.name` key).
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if is_ident_start(c) => chars.all(is_ident_part) && !is_reserved(name),
        _ => false,
    }
}

/// Turn `name` into a safe identifier that `is_taken` does not claim.
///
/// Invalid characters become `_` and a name that cannot start an identifier gets a `_`
/// prefix. Reserved words get a `_` suffix; collisions are broken with `_1`, `_2`, ...
pub fn sanitize(name: &str, is_taken: impl Fn(&str) -> bool) -> String {
    let mut base: String = name
        .chars()
        .map(|c| if is_ident_part(c) { c } else { '_' })
        .collect();
    if base.is_empty() {
        base.push('_');
    }
    if base.starts_with(|c: char| !is_ident_start(c)) {
        base.insert(0, '_');
    }
    if is_reserved(&base) {
        base.push('_');
    }

    if !is_taken(&base) {
        return base;
    }
    let mut n = 1usize;
    loop {
        let candidate = format!("{base}_{n}");
        if !is_taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Sanitize with no collision set.
pub fn sanitize_name(name: &str) -> String {
    sanitize(name, |_| false)
}

/// Sequence number reserved for a file referring to its own default export.
pub const SELF_ALIAS_SEQ: u32 = 0;

/// Local alias for the import with sequence number `seq`.
pub fn alias_name(seq: u32) -> String {
    format!("$import{seq}")
}
